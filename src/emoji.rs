//! Emoji shortcode expansion.
//!
//! Message text and reaction names use `:shortcode:` notation (`:thumbsup:`,
//! `:tada:`). The report shows the glyph instead. Unknown shortcodes, such as
//! workspace custom emoji, are left as written.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static SHORTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([a-zA-Z0-9_+\-]+):").expect("shortcode pattern is valid")
});

/// Replaces every known `:shortcode:` in `text` with its emoji glyph.
///
/// # Example
///
/// ```rust
/// use slackbook::emoji::expand;
///
/// assert_eq!(expand("nice :thumbsup:"), "nice 👍");
/// assert_eq!(expand(":partyparrot:"), ":partyparrot:");
/// ```
pub fn expand(text: &str) -> Cow<'_, str> {
    SHORTCODE.replace_all(text, |caps: &Captures<'_>| {
        match emojis::get_by_shortcode(&caps[1]) {
            Some(emoji) => emoji.as_str().to_string(),
            None => caps[0].to_string(),
        }
    })
}

/// Returns the glyph for a reaction name, if it is a known emoji.
///
/// Slack appends modifiers after `::` (`thumbsup::skin-tone-2`); only the
/// base name is looked up.
pub fn glyph(name: &str) -> Option<&'static str> {
    let base = name.split("::").next().unwrap_or(name);
    emojis::get_by_shortcode(base).map(|e| e.as_str())
}
