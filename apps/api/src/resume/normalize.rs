//! Whitespace normalization applied to every extracted or pasted resume.

use regex::Regex;
use std::sync::LazyLock;

static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Trims the text, folds CRLF pairs to LF, and collapses any run of three or
/// more newlines down to exactly two. Total — any input string maps to a
/// well-formed output.
pub fn clean_text(text: &str) -> String {
    let trimmed = text.trim().replace("\r\n", "\n");
    EXCESS_BLANK_LINES.replace_all(&trimmed, "\n\n").into_owned()
}
