//! Conversion orchestration: classify, build the prompt, call the model.
//!
//! ## Why a result struct instead of `Result`?
//!
//! Every failure here is a user-facing outcome, not a programming error:
//! missing API key, a failed completion call. The front-end renders the
//! message either way, so [`convert`] always returns a [`ConversionResult`]
//! carrying an optional [`ScribedownError`] — nothing unwinds past the
//! orchestrator boundary.
//!
//! Calls are strictly sequential and one-shot. There is no retry: a failed
//! completion surfaces verbatim and the user decides whether to try again.

use std::time::Instant;
use tracing::{debug, info};

use crate::config::ConversionConfig;
use crate::error::ScribedownError;
use crate::llm::{CompletionProvider, CompletionRequest};
use crate::pipeline::classify::{classify, is_transcription, InputMode, TextCategory};
use crate::pipeline::prompt::{build_prompt, PromptPlan};
use crate::prompts;

/// One conversion request. Immutable value passed to [`convert`].
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Raw input text.
    pub text: String,
    /// Summarise transcriptions instead of merely formatting them.
    pub wants_summary: bool,
    /// Externally selected input mode; gates Markdown detection.
    pub mode: InputMode,
}

impl ConversionRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wants_summary: false,
            mode: InputMode::default(),
        }
    }
}

/// Outcome of one conversion.
///
/// `text` is the original input when the classifier decided no conversion
/// was needed (`was_already_markup`), the model output on success, and empty
/// when `error` is set.
#[derive(Debug)]
pub struct ConversionResult {
    pub text: String,
    pub was_already_markup: bool,
    pub was_transcription: bool,
    pub error: Option<ScribedownError>,
}

impl ConversionResult {
    /// True when the conversion produced usable text.
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    fn failure(error: ScribedownError, was_transcription: bool) -> Self {
        Self {
            text: String::new(),
            was_already_markup: false,
            was_transcription,
            error: Some(error),
        }
    }
}

/// A document moving through the pipeline.
///
/// Created from user input or a file read; `text` is replaced by the
/// conversion result before persistence. `title` short-circuits title
/// derivation when the caller already knows the name.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub category: TextCategory,
    pub mode: InputMode,
    pub title: Option<String>,
}

impl Document {
    /// Classify `text` under `mode` and wrap it.
    pub fn new(text: impl Into<String>, mode: InputMode) -> Self {
        let text = text.into();
        let category = classify(&text, mode);
        Self {
            text,
            category,
            mode,
            title: None,
        }
    }

    /// Replace the document text with a conversion result.
    pub fn replace_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.category = classify(&self.text, self.mode);
    }
}

/// Convert raw text to structured Markdown.
///
/// * No provider → immediate not-configured failure, no call attempted.
/// * Already-Markdown input → success with the input verbatim and
///   `was_already_markup = true`.
/// * Otherwise one completion call; its output (or failure message) becomes
///   the result.
pub async fn convert(
    request: &ConversionRequest,
    config: &ConversionConfig,
    provider: Option<&dyn CompletionProvider>,
) -> ConversionResult {
    let was_transcription = is_transcription(&request.text);

    let Some(provider) = provider else {
        return ConversionResult::failure(ScribedownError::NotConfigured, was_transcription);
    };

    let category = classify(&request.text, request.mode);
    debug!(?category, was_transcription, wants_summary = request.wants_summary, "classified input");

    let plan = build_prompt(
        category,
        request.wants_summary,
        &request.text,
        config.summary_prompt.as_deref(),
    );

    let prompt = match plan {
        PromptPlan::Skip => {
            info!("input is already markdown, returning as-is");
            return ConversionResult {
                text: request.text.clone(),
                was_already_markup: true,
                was_transcription,
                error: None,
            };
        }
        PromptPlan::Complete(prompt) => prompt,
    };

    let start = Instant::now();
    let completion = provider
        .complete(CompletionRequest {
            model: config.model.clone(),
            system: prompts::SYSTEM_PROMPT.to_string(),
            user: prompt,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
        .await;

    match completion {
        Ok(text) => {
            info!(
                model = %config.model,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "conversion complete"
            );
            ConversionResult {
                text,
                was_already_markup: false,
                was_transcription,
                error: None,
            }
        }
        Err(e) => ConversionResult::failure(
            ScribedownError::CompletionFailed {
                message: e.to_string(),
            },
            was_transcription,
        ),
    }
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    request: &ConversionRequest,
    config: &ConversionConfig,
    provider: Option<&dyn CompletionProvider>,
) -> ConversionResult {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(convert(request, config, provider)),
        Err(e) => ConversionResult::failure(
            ScribedownError::Internal(format!("Failed to create tokio runtime: {e}")),
            false,
        ),
    }
}
