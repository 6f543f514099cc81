//! Reaction rendering.
//!
//! A reaction renders as `"<glyph>(<count>) - [<names>]"`, for example
//! `"👍(2) - [Alice,Bob]"`. Where a reaction ends up in the sheet depends on
//! the [`ReactionLayout`].

use serde::{Deserialize, Serialize};

use crate::emoji;
use crate::identity::UserDirectory;
use crate::message::Reaction;

/// Where reactions are placed in a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionLayout {
    /// All reactions of a message in its `reactions` cell, one per line.
    #[default]
    Inline,
    /// One extra row per reaction, directly below the message row.
    Rows,
}

impl ReactionLayout {
    /// Returns all supported layout names.
    pub fn all_names() -> &'static [&'static str] {
        &["inline", "rows"]
    }
}

impl std::fmt::Display for ReactionLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReactionLayout::Inline => write!(f, "inline"),
            ReactionLayout::Rows => write!(f, "rows"),
        }
    }
}

impl std::str::FromStr for ReactionLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inline" | "text" => Ok(ReactionLayout::Inline),
            "rows" | "row" => Ok(ReactionLayout::Rows),
            _ => Err(format!(
                "Unknown reaction layout: '{}'. Expected one of: {}",
                s,
                ReactionLayout::all_names().join(", ")
            )),
        }
    }
}

/// Renders reactions, resolving each reactor through a [`UserDirectory`].
///
/// Reactors missing from the directory contribute an empty name, so the
/// list keeps its length.
///
/// # Example
///
/// ```rust
/// use slackbook::identity::{Identity, UserDirectory};
/// use slackbook::message::Reaction;
/// use slackbook::reaction::ReactionRenderer;
///
/// let dir = UserDirectory::new([Identity::new("U1", "Alice"), Identity::new("U2", "Bob")]);
/// let reaction = Reaction::new("thumbsup", ["U1", "U2"], 2);
///
/// let renderer = ReactionRenderer::new(&dir);
/// assert_eq!(renderer.render(&reaction), "👍(2) - [Alice,Bob]");
///
/// let raw = renderer.with_emoji_expansion(false);
/// assert_eq!(raw.render(&reaction), ":thumbsup:(2) - [Alice,Bob]");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReactionRenderer<'a> {
    directory: &'a UserDirectory,
    expand_emoji: bool,
}

impl<'a> ReactionRenderer<'a> {
    pub fn new(directory: &'a UserDirectory) -> Self {
        Self {
            directory,
            expand_emoji: true,
        }
    }

    /// Sets whether `:name:` is replaced by the emoji glyph.
    #[must_use]
    pub fn with_emoji_expansion(mut self, enabled: bool) -> Self {
        self.expand_emoji = enabled;
        self
    }

    /// Renders a single reaction as `"<emoji>(<count>) - [<names>]"`.
    pub fn render(&self, reaction: &Reaction) -> String {
        let names: Vec<String> = reaction
            .users
            .iter()
            .map(|id| self.directory.resolve_id(id).display_name)
            .collect();

        let shortcode = format!(":{}:", reaction.name);
        let glyph = if self.expand_emoji {
            emoji::glyph(&reaction.name).map_or(shortcode, str::to_string)
        } else {
            shortcode
        };

        format!("{}({}) - [{}]", glyph, reaction.count, names.join(","))
    }

    /// Renders every reaction of a message, in export order.
    pub fn render_all(&self, reactions: &[Reaction]) -> Vec<String> {
        reactions.iter().map(|r| self.render(r)).collect()
    }

    /// Renders every reaction of a message into a single cell, one per line.
    pub fn render_inline(&self, reactions: &[Reaction]) -> String {
        self.render_all(reactions).join("\n")
    }
}
