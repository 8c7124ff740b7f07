use std::borrow::Cow;

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetOptions {
    /// Window length in characters, before any span extension.
    pub max_chars: usize,
    /// Characters kept ahead of the first highlight.
    pub left_context: usize,
}

impl Default for SnippetOptions {
    fn default() -> Self {
        Self {
            max_chars: 100,
            left_context: 10,
        }
    }
}

pub fn highlighted_snippet(text: &str) -> Cow<'_, str> {
    highlighted_snippet_with(text, SnippetOptions::default())
}

/// Cuts a window of `max_chars` characters starting `left_context` characters
/// before the first `<mark>`. A highlight cut by the window end is extended
/// through its `</mark>` when one exists. Text without markers is returned as is.
pub fn highlighted_snippet_with(text: &str, options: SnippetOptions) -> Cow<'_, str> {
    let Some(first_mark) = text.find(MARK_OPEN) else {
        return Cow::Borrowed(text);
    };

    let mark_char = text[..first_mark].chars().count();
    let start = byte_offset_of_char(text, 0, mark_char.saturating_sub(options.left_context));
    let mut end = byte_offset_of_char(text, start, options.max_chars);

    let window = &text[start..end];
    if window.rfind(MARK_OPEN) > window.rfind(MARK_CLOSE) {
        if let Some(close) = text[end..].find(MARK_CLOSE) {
            end += close + MARK_CLOSE.len();
        }
    }

    let mut snippet = String::with_capacity(end - start + 2 * ELLIPSIS.len());
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.push_str(&text[start..end]);
    if end < text.len() {
        snippet.push_str(ELLIPSIS);
    }
    Cow::Owned(snippet)
}

// Byte offset reached by stepping `chars` characters forward from byte `from`,
// clamped to the end of `text`.
fn byte_offset_of_char(text: &str, from: usize, chars: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(chars)
        .map(|(offset, _)| from + offset)
        .unwrap_or(text.len())
}
