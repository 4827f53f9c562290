//! # scribedown
//!
//! Convert raw notes and speech transcripts to structured Markdown with an
//! LLM, then save the result to disk and/or a Notion database.
//!
//! ## Why this crate?
//!
//! Speech-to-text output and hastily pasted notes are painful to file:
//! timestamps and speaker labels everywhere, no headings, no structure.
//! This crate classifies the input, asks an LLM to format (or summarise) it
//! only when that is actually needed, and takes care of the fiddly
//! persistence details — title derivation, filename sanitisation, and the
//! block-size ceiling of the Notion API.
//!
//! ## Pipeline Overview
//!
//! ```text
//! text
//!  │
//!  ├─ 1. Classify  already-Markdown / transcription / plain prose
//!  ├─ 2. Prompt    pick the conversion or summary instruction (or skip)
//!  ├─ 3. LLM       one chat completion, no retry
//!  ├─ 4. Title     AI title → heading → first line
//!  ├─ 5. Chunk     1900-char blocks at sentence boundaries
//!  └─ 6. Persist   <date>-<title>.md on disk, one page in Notion
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scribedown::{convert, ConversionConfig, ConversionRequest, OpenAiProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let provider = OpenAiProvider::new(std::env::var("OPENAI_API_KEY").unwrap()).unwrap();
//!     let request = ConversionRequest::new("(00:12) morning standup notes …");
//!     let result = convert(&request, &ConversionConfig::default(), Some(&provider)).await;
//!     match result.error {
//!         None => println!("{}", result.text),
//!         Some(e) => eprintln!("{e}"),
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `scribedown` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! scribedown = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod llm;
pub mod notion;
pub mod persist;
pub mod pipeline;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, DEFAULT_MODEL};
pub use convert::{convert, convert_sync, ConversionRequest, ConversionResult, Document};
pub use error::ScribedownError;
pub use llm::{CompletionProvider, CompletionRequest, LlmError, OpenAiProvider};
pub use notion::{CreatedPage, NotionClient, PageStore};
pub use persist::{persist, PersistReport, PersistTargets, SaveOptions, SaveOutcome, SavePicker};
pub use pipeline::chunk::{chunk_blocks, BLOCK_CHUNK_SIZE};
pub use pipeline::classify::{classify, InputMode, TextCategory};
pub use pipeline::title::derive_title;
