//! Detection of the `AND` keyword inside a condition group.

use std::sync::LazyLock;

use regex::Regex;

/// Matches ` AND `, `)AND `, ` AND(` and `)AND(`, or the same at the start of
/// the group text.
static AND_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[ )])and[ (]$").unwrap_or_else(|_| unreachable!())
});

/// Number of keyword letters already buffered when the keyword is detected.
pub(super) const BUFFERED_KEYWORD_LEN: usize = 2;

/// Return `true` when `text[index]` is the final letter of an `AND` keyword.
///
/// The peek looks at most three characters back and one ahead. When the
/// window reaches the start of `text`, the keyword may open the group.
pub(super) fn ends_and_keyword(text: &[char], index: usize) -> bool {
    let Some(window) = text.get(index.saturating_sub(3)..index + 2) else {
        return false;
    };
    let window: String = window.iter().collect();
    AND_KEYWORD_RE.is_match(&window)
}
