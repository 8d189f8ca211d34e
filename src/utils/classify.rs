//! Line classification for the lightweight highlighting heuristics.

use crate::domain::ColorCategory;
use once_cell::sync::Lazy;
use regex::Regex;

/// Keywords that tint a line when they open it as a whole word.
pub const KEYWORDS: &[&str] = &[
    "function",
    "const",
    "let",
    "var",
    "class",
    "import",
    "export",
    "return",
    "if",
    "else",
    "for",
    "while",
    "async",
    "await",
    "interface",
    "type",
    "enum",
];

static COMMENT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:#|//)").unwrap());

static KEYWORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^(?:{})\b", KEYWORDS.join("|"))).unwrap());

/// Classify a line by its leading token.
///
/// Rules are checked in order and the first match wins:
/// 1. `#` or `//` prefix is a comment
/// 2. a keyword from [`KEYWORDS`] followed by a word boundary
/// 3. everything else
///
/// Markdown headings also start with `#`, so the comment rule shadows any
/// heading treatment and they classify as comments.
pub fn classify_line(line: &str) -> ColorCategory {
    let trimmed = line.trim();

    if COMMENT_PATTERN.is_match(trimmed) {
        ColorCategory::Comment
    } else if KEYWORD_PATTERN.is_match(trimmed) {
        ColorCategory::Keyword
    } else {
        ColorCategory::Default
    }
}
