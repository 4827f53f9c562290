//! Title derivation: AI-generated title with deterministic fallbacks.
//!
//! The chain is an ordered list of strategies evaluated until one yields a
//! non-empty title:
//!
//! 1. Ask the completion provider for a short title from a bounded prefix of
//!    the content (low temperature, tight output cap). Skipped when no
//!    provider is configured; a failed call falls through rather than
//!    failing the caller.
//! 2. The first `# heading` line, if any.
//! 3. The literal first line of the content.
//!
//! The deriver is limit-agnostic: filenames truncate to 30 characters,
//! remote page titles to 100 — each caller applies its own
//! [`truncate_chars`].

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::llm::{CompletionProvider, CompletionRequest};
use crate::prompts;

/// How much of the content the title model sees.
pub const TITLE_EXCERPT_CHARS: usize = 1500;

/// Output budget for the title call. Titles are ≤30 characters; 50 tokens is
/// plenty and keeps a rambling model cheap to ignore.
const TITLE_MAX_TOKENS: u32 = 50;

/// Low-creativity sampling for titles.
const TITLE_TEMPERATURE: f32 = 0.2;

/// Title length limit when used in a filename.
pub const FILENAME_TITLE_CHARS: usize = 30;

/// Title length limit for the remote page store.
pub const PAGE_TITLE_CHARS: usize = 100;

static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

/// Derive a human-readable title for `content`.
///
/// Never fails: the deterministic fallbacks guarantee a result, and an empty
/// result degrades to the default title. The returned string is untruncated
/// and unsanitised — callers apply [`truncate_chars`] and, for filenames,
/// [`sanitize_filename_component`].
pub async fn derive_title(
    content: &str,
    model: &str,
    provider: Option<&dyn CompletionProvider>,
) -> String {
    if let Some(provider) = provider {
        match ai_title(content, model, provider).await {
            Some(title) => return title,
            None => debug!("AI title unavailable, using heuristic fallback"),
        }
    }

    let fallbacks: [fn(&str) -> Option<String>; 2] = [heading_title, first_line_title];
    fallbacks
        .iter()
        .find_map(|f| f(content))
        .unwrap_or_else(|| prompts::DEFAULT_TITLE.to_string())
}

/// Strategy 1: ask the model. `None` on failure or blank output.
async fn ai_title(content: &str, model: &str, provider: &dyn CompletionProvider) -> Option<String> {
    let excerpt: String = content.chars().take(TITLE_EXCERPT_CHARS).collect();
    let request = CompletionRequest {
        model: model.to_string(),
        system: prompts::SYSTEM_PROMPT.to_string(),
        user: prompts::with_text(prompts::TITLE_PROMPT, &excerpt),
        temperature: TITLE_TEMPERATURE,
        max_tokens: Some(TITLE_MAX_TOKENS),
    };

    match provider.complete(request).await {
        Ok(text) => {
            let title = text.trim().to_string();
            (!title.is_empty()).then_some(title)
        }
        Err(e) => {
            warn!("title generation failed: {e}");
            None
        }
    }
}

/// Strategy 2: first `# heading` capture.
fn heading_title(content: &str) -> Option<String> {
    RE_HEADING
        .captures(content)
        .map(|caps| caps[1].trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Strategy 3: literal first line.
fn first_line_title(content: &str) -> Option<String> {
    content
        .lines()
        .next()
        .map(|l| l.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Truncate to at most `max_chars` Unicode scalar values.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Replace filesystem-illegal characters (`\ / : * ? " < > |`) with `-`.
pub fn sanitize_filename_component(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            other => other,
        })
        .collect()
}
