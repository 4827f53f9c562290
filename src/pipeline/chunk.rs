//! Content chunking: split text into size-bounded blocks for the page store.
//!
//! Notion caps a rich-text item at 2000 characters; we stay under it with a
//! 1900-character ceiling so the payload never bounces. Each paragraph of the
//! document becomes (at least) one block — paragraphs are never merged, so
//! the page keeps its block-per-paragraph structure. Oversized paragraphs are
//! cut at sentence boundaries where possible.
//!
//! All sizes are in Unicode scalar values, not bytes: a Japanese transcript
//! would blow through a byte budget at a third of the visible length, and a
//! byte-indexed cut could split a code point in half.
//!
//! Empty paragraphs (from consecutive blank lines) are kept as empty blocks
//! rather than dropped, so the emitted block count always matches the
//! paragraph structure of the input.

/// Block-size ceiling used for remote page submission.
pub const BLOCK_CHUNK_SIZE: usize = 1900;

/// Sentence terminators, searched right-to-left within a cut window.
///
/// ASCII terminators require a following space to avoid cutting inside
/// "3.5" or "e.g."; the full-width Japanese 句点 terminates on its own.
const SENTENCE_TERMINATORS: [&[char]; 6] = [
    &['.', ' '],
    &['。'],
    &['!', ' '],
    &['?', ' '],
    &['！', ' '],
    &['？', ' '],
];

/// Split `text` into ordered blocks of at most `max_chars` characters.
///
/// Paragraphs (split on `"\n\n"`) are emitted in order; a paragraph longer
/// than `max_chars` is split after the rightmost sentence terminator that
/// ends at or before the ceiling, or hard-cut at exactly `max_chars` when no
/// terminator falls inside the window.
///
/// Invariants:
/// * concatenating the blocks of one oversized paragraph reproduces that
///   paragraph exactly;
/// * joining per-paragraph output with `"\n\n"` reproduces `text` exactly.
pub fn chunk_blocks(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut blocks = Vec::new();
    for paragraph in text.split("\n\n") {
        if paragraph.chars().count() <= max_chars {
            blocks.push(paragraph.to_string());
        } else {
            split_paragraph(paragraph, max_chars, &mut blocks);
        }
    }
    blocks
}

/// Split one oversized paragraph, pushing each piece onto `out`.
fn split_paragraph(paragraph: &str, max_chars: usize, out: &mut Vec<String>) {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut start = 0;
    while chars.len() - start > max_chars {
        let window = &chars[start..start + max_chars];
        let cut = sentence_cut(window).unwrap_or(max_chars);
        out.push(chars[start..start + cut].iter().collect());
        start += cut;
    }
    out.push(chars[start..].iter().collect());
}

/// Rightmost sentence-terminator end within `window`, if any.
///
/// For each terminator, find the last occurrence whose end index fits the
/// window; the overall cut is the maximum end index across all terminators.
fn sentence_cut(window: &[char]) -> Option<usize> {
    SENTENCE_TERMINATORS
        .iter()
        .filter_map(|term| rfind_end(window, term))
        .max()
}

/// End index (exclusive) of the last occurrence of `needle` in `haystack`.
fn rfind_end(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .rev()
        .find(|&i| &haystack[i..i + needle.len()] == needle)
        .map(|i| i + needle.len())
}
