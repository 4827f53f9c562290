//! Prompt construction: turn a classified input into a completion prompt.
//!
//! This stage is intentionally thin — all instruction text lives in
//! [`crate::prompts`] so it can be changed without touching the branching
//! logic here, and the branching logic can be tested without a provider.

use crate::pipeline::classify::TextCategory;
use crate::prompts;

/// What the conversion orchestrator should do with the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPlan {
    /// The text is already structured Markdown; return it verbatim without
    /// calling the completion provider.
    Skip,
    /// Send this prompt to the completion provider.
    Complete(String),
}

/// Build the prompt for the given category.
///
/// * `StructuredMarkup` → [`PromptPlan::Skip`].
/// * `Transcription` with `wants_summary` → the caller's override (if any,
///   with the text appended) or the default two-section summary instruction.
/// * Everything else → the default Markdown-conversion instruction.
///
/// A transcription without a summary request goes down the conversion path:
/// the user asked for formatting, not condensation.
pub fn build_prompt(
    category: TextCategory,
    wants_summary: bool,
    text: &str,
    summary_override: Option<&str>,
) -> PromptPlan {
    match category {
        TextCategory::StructuredMarkup => PromptPlan::Skip,
        TextCategory::Transcription if wants_summary => {
            let instruction = summary_override
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(prompts::DEFAULT_SUMMARY_PROMPT);
            PromptPlan::Complete(prompts::with_text(instruction, text))
        }
        _ => PromptPlan::Complete(prompts::with_text(prompts::DEFAULT_CONVERT_PROMPT, text)),
    }
}
