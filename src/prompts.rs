//! Prompt text for LLM-based conversion, summarisation, and title generation.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing the default behaviour (e.g.
//!    tweaking the summary section names) requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect assembled prompts directly
//!    without spinning up a real LLM, making prompt regressions easy to catch.
//!
//! The instruction text is Japanese, matching the speech-memo workflow the
//! tool was built for. Callers can override the summary instruction via
//! [`crate::config::ConversionConfig::summary_prompt`]; the constants here
//! are used only when no override is provided.

/// System message sent with every conversion request.
pub const SYSTEM_PROMPT: &str = "あなたはテキストをマークダウン形式に変換する専門家です。";

/// Default instruction for summarising a transcription.
///
/// Requests two sections: the summary under 「# サマリー」 and the untouched
/// transcript under 「# 元の書き起こし」.
pub const DEFAULT_SUMMARY_PROMPT: &str = "以下は音声書き起こしテキストです。このテキストを要約し、マークダウン形式で整形してください。\n要約は「# サマリー」セクションに、元のテキストは「# 元の書き起こし」セクションに含めてください。";

/// Default instruction for converting plain prose to structured Markdown.
pub const DEFAULT_CONVERT_PROMPT: &str = "以下のテキストをマークダウン形式に変換してください。\n適切な見出し、箇条書き、強調などを使用して、読みやすく構造化されたマークダウンにしてください。";

/// Instruction for generating a short document title.
///
/// The model sees only a bounded prefix of the content (see
/// [`crate::pipeline::title::TITLE_EXCERPT_CHARS`]) and is asked for a
/// ≤30-character title with nothing else in the response.
pub const TITLE_PROMPT: &str = "以下のテキストにふさわしい簡潔なタイトルを生成してください。\nタイトルは30文字以内とし、タイトルのみを返してください。";

/// Title used when the content yields nothing usable.
pub const DEFAULT_TITLE: &str = "未タイトル";

/// Separator between an instruction and the text it applies to.
const TEXT_SEPARATOR: &str = "\n\nテキスト:\n";

/// Append `text` to an instruction with the standard separator.
pub fn with_text(instruction: &str, text: &str) -> String {
    format!("{instruction}{TEXT_SEPARATOR}{text}")
}
