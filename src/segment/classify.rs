//! Content classification for message chunks.
//!
//! Classifies text the way a chat renderer would read it, in a fixed
//! precedence order: code beats quote beats list beats emphasis beats
//! plain text. A unit is classified once and every chunk split from it
//! inherits the classification.

use crate::core::ContentType;
use regex::Regex;
use std::sync::OnceLock;

/// Marker opening and closing fenced code blocks.
pub(crate) const FENCE: &str = "```";

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {{
        static $name: OnceLock<Regex> = OnceLock::new();
        $name.get_or_init(|| Regex::new($pattern).expect("valid regex"))
    }};
}

/// Matches a single inline code span on one line.
fn inline_code_pattern() -> &'static Regex {
    static_regex!(INLINE_CODE, r"`[^`\n]+`")
}

/// Matches a markdown quote line.
fn quote_line_pattern() -> &'static Regex {
    static_regex!(QUOTE_LINE, r"(?m)^[ \t]*>")
}

/// Matches the start of a bulleted or numbered list item line.
pub(crate) fn list_item_pattern() -> &'static Regex {
    static_regex!(LIST_ITEM, r"(?m)^[ \t]*(?:[-*\x{2022}]|\d+\.)[ \t]+")
}

/// Matches WhatsApp-style emphasis spans.
fn emphasis_pattern() -> &'static Regex {
    static_regex!(EMPHASIS, r"\*[^*\n]+\*|_[^_\n]+_|~[^~\n]+~")
}

/// Classifies text content for pacing purposes.
///
/// Precedence: code > quote > list > emphasis > plain text.
///
/// # Examples
///
/// ```
/// use cadence_rs::core::ContentType;
/// use cadence_rs::segment::classify;
///
/// assert_eq!(classify("let x = 1; // in `main`\nsee `lib.rs`"), ContentType::Code);
/// assert_eq!(classify("- eggs\n- milk"), ContentType::List);
/// assert_eq!(classify("just words"), ContentType::Text);
/// ```
#[must_use]
pub fn classify(text: &str) -> ContentType {
    if is_code(text) {
        ContentType::Code
    } else if is_quote(text) {
        ContentType::Quote
    } else if is_list(text) {
        ContentType::List
    } else if is_emphasis(text) {
        ContentType::Emphasis
    } else {
        ContentType::Text
    }
}

/// Code means a fenced block, or at least two inline spans.
fn is_code(text: &str) -> bool {
    text.contains(FENCE) || inline_code_pattern().find_iter(text).count() >= 2
}

/// Quote means a markdown `>` line or a fully quoted paragraph.
fn is_quote(text: &str) -> bool {
    if quote_line_pattern().is_match(text) {
        return true;
    }
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) => {
            matches!(open, '"' | '\u{201c}') && matches!(close, '"' | '\u{201d}')
        }
        _ => false,
    }
}

fn is_list(text: &str) -> bool {
    list_item_pattern().is_match(text)
}

fn is_emphasis(text: &str) -> bool {
    emphasis_pattern().is_match(text)
}
