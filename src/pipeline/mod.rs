//! Pipeline stages for text-to-Markdown conversion and persistence.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different chunking policy) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! classify ──▶ prompt ──▶ (LLM) ──▶ title + chunk ──▶ persist
//! (category)   (plan)    (convert)  (page payload)    (file / Notion)
//! ```
//!
//! 1. [`classify`] — decide whether the input is already Markdown, a speech
//!    transcription, or plain prose
//! 2. [`prompt`]   — turn the category into a completion prompt, or signal
//!    that no conversion is needed
//! 3. [`title`]    — derive a short document title (AI with deterministic
//!    fallbacks); the only stage here with network I/O
//! 4. [`chunk`]    — split final content into size-bounded blocks for the
//!    remote page store

pub mod chunk;
pub mod classify;
pub mod prompt;
pub mod title;
