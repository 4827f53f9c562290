//! Text classification: structured Markdown vs. transcription vs. prose.
//!
//! Classification is mode-gated on purpose. The user picks an input mode in
//! the front-end (Markdown or plain text), and identical text classifies
//! differently depending on that choice: a `#` in plain-text mode is just a
//! character, not a heading. The mode is threaded through as an explicit
//! parameter — never ambient state — so [`classify`] stays a pure function.

use once_cell::sync::Lazy;
use regex::Regex;

/// Externally selected input mode. Influences Markdown detection only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Treat Markdown syntax in the input as meaningful.
    #[default]
    Markdown,
    /// Treat the input as plain text; Markdown markers are ignored.
    Text,
}

/// The category assigned to a piece of input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCategory {
    /// Already contains Markdown formatting signals; no conversion needed.
    StructuredMarkup,
    /// Bears timestamp or speaker-label markers typical of speech-to-text output.
    Transcription,
    /// Neither of the above.
    PlainProse,
}

/// Markers that indicate the text is already Markdown.
///
/// Substring checks, not line-anchored: `**bold**` mid-paragraph counts just
/// as much as a heading line. This matches how users paste partially
/// formatted notes.
const MARKDOWN_MARKERS: [&str; 6] = ["#", "**", "__", "```", "- ", "1. "];

/// Timestamp (`[MM:SS]`, `(MM:SS)`) and speaker-label (`話者A:`,
/// `Speaker A:`) markers produced by common transcription tools.
static RE_TRANSCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\[\d{2}:\d{2}\]|\(\d{2}:\d{2}\)|話者[A-Z]:|Speaker [A-Z]:)").unwrap()
});

/// Classify `text` under the given input mode.
///
/// * `StructuredMarkup` — only in [`InputMode::Markdown`], when any Markdown
///   marker is present.
/// * `Transcription` — independent of mode, when a timestamp or speaker
///   label matches.
/// * `PlainProse` — everything else.
///
/// Markdown detection wins over transcription detection: a transcript that
/// was already converted (and so contains headings) must not be converted
/// again.
pub fn classify(text: &str, mode: InputMode) -> TextCategory {
    if mode == InputMode::Markdown && MARKDOWN_MARKERS.iter().any(|m| text.contains(m)) {
        return TextCategory::StructuredMarkup;
    }
    if RE_TRANSCRIPTION.is_match(text) {
        return TextCategory::Transcription;
    }
    TextCategory::PlainProse
}

/// True when the text bears transcription markers, regardless of mode.
///
/// The conversion orchestrator needs this even for text classified as
/// `StructuredMarkup`, because the result flags report both properties.
pub fn is_transcription(text: &str) -> bool {
    RE_TRANSCRIPTION.is_match(text)
}
