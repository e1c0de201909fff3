//! Leading emoji detection for group names
use regex::Regex;
use std::sync::LazyLock;

/// Matches one emoji sequence anchored at the start of the string:
/// - a pair of regional indicators (flags)
/// - a keycap (`#`, `*` or a digit followed by U+20E3)
/// - a symbol or pictograph, optionally followed by a variation selector,
///   skin tone and hair modifiers, and ZWJ-joined continuations
static LEADING_EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:",
        r"[\x{1F1E6}-\x{1F1FF}]{2}",
        r"|[#*0-9]\x{20E3}",
        r"|(?:\x{00A9}|\x{00AE}|[\x{2000}-\x{3300}]|[\x{1F000}-\x{1FBFF}])\x{FE0F}?",
        r"(?:[\x{1F3FB}-\x{1F3FF}]?[\x{1F9B0}-\x{1F9B3}]?",
        r"(?:\x{FE0F}?\x{200D}(?:[\x{2000}-\x{3300}]|[\x{1F000}-\x{1FBFF}])\x{FE0F}?)?)*",
        r")"
    ))
    .expect("leading emoji pattern is valid")
});

/// Get the emoji sequence at the start of `text`, if any
pub fn leading_emoji(text: &str) -> Option<&str> {
    LEADING_EMOJI
        .find(text)
        .map(|m| m.as_str())
        .filter(|emoji| !emoji.is_empty())
}

/// Remove the leading emoji sequence and trim what is left
pub fn strip_leading_emoji(text: &str) -> &str {
    match leading_emoji(text) {
        Some(emoji) => text[emoji.len()..].trim(),
        None => text.trim(),
    }
}
