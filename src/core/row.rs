//! Flattening messages into sheet rows.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::ExportConfig;
use crate::emoji;
use crate::error::Result;
use crate::identity::UserDirectory;
use crate::message::Message;
use crate::reaction::{ReactionLayout, ReactionRenderer};
use crate::thread::{PendingThread, ThreadMatcher};
use crate::timestamp::decode;

/// Column names, written as row 1 of every sheet.
pub const HEADER: [&str; 6] = ["index", "user", "text", "thread", "reactions", "datetime"];

/// One data row of a channel sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    /// 1-based, contiguous within a sheet.
    pub index: usize,
    /// `"<display name> (<id>)"`, empty on reaction rows.
    pub user: String,
    pub text: String,
    pub thread: String,
    pub reactions: String,
    /// Wall-clock send time in the configured zone.
    pub datetime: NaiveDateTime,
}

/// Builds the rows of one channel sheet, message by message.
///
/// Owns the channel's [`ThreadMatcher`], so a builder must not be reused
/// across channels.
///
/// # Example
///
/// ```rust
/// use slackbook::config::ExportConfig;
/// use slackbook::core::RowBuilder;
/// use slackbook::identity::{Identity, UserDirectory};
/// use slackbook::message::{Message, Reaction};
/// use slackbook::reaction::ReactionLayout;
///
/// let dir = UserDirectory::new([Identity::new("U1", "Alice")]);
/// let config = ExportConfig::new().with_layout(ReactionLayout::Rows);
/// let mut builder = RowBuilder::new(&dir, config);
///
/// let msg = Message::new("U1", "hi", "100.0").with_reaction(Reaction::new("tada", ["U1"], 1));
/// let rows = builder.push(&msg)?;
///
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].user, "Alice (U1)");
/// assert_eq!(rows[1].index, 2);
/// assert_eq!(rows[1].reactions, "🎉(1) - [Alice]");
/// # Ok::<(), slackbook::ExportError>(())
/// ```
#[derive(Debug)]
pub struct RowBuilder<'a> {
    directory: &'a UserDirectory,
    config: ExportConfig,
    matcher: ThreadMatcher,
    next_index: usize,
}

impl<'a> RowBuilder<'a> {
    pub fn new(directory: &'a UserDirectory, config: ExportConfig) -> Self {
        Self {
            directory,
            matcher: ThreadMatcher::new(config.strict_reply_timestamps, config.time_zone),
            config,
            next_index: 1,
        }
    }

    /// Converts one message into its rows.
    ///
    /// Returns one row with the [`Inline`](ReactionLayout::Inline) layout, and
    /// one row plus one per reaction with [`Rows`](ReactionLayout::Rows).
    pub fn push(&mut self, msg: &Message) -> Result<Vec<OutputRow>> {
        let sender = self
            .directory
            .resolve(&msg.sender_id, &msg.bot_id, &msg.sub_kind);
        let datetime = self.config.time_zone.to_naive(decode(&msg.timestamp)?);

        let index = self.next_index;
        let thread = self
            .matcher
            .annotate(msg, &sender, index, self.directory)?;

        let renderer =
            ReactionRenderer::new(self.directory).with_emoji_expansion(self.config.expand_emoji);
        let text = if self.config.expand_emoji {
            emoji::expand(&msg.text).into_owned()
        } else {
            msg.text.clone()
        };

        let mut row = OutputRow {
            index,
            user: sender.label(),
            text,
            thread,
            reactions: String::new(),
            datetime,
        };

        let rows = match self.config.layout {
            ReactionLayout::Inline => {
                row.reactions = renderer.render_inline(&msg.reactions);
                vec![row]
            }
            ReactionLayout::Rows => {
                let mut rows = Vec::with_capacity(msg.reactions.len() + 1);
                rows.push(row);
                for (offset, reactions) in renderer.render_all(&msg.reactions).into_iter().enumerate() {
                    rows.push(OutputRow {
                        index: index + offset + 1,
                        user: String::new(),
                        text: String::new(),
                        thread: String::new(),
                        reactions,
                        datetime,
                    });
                }
                rows
            }
        };

        self.next_index += rows.len();
        Ok(rows)
    }

    /// Number of rows emitted so far.
    pub fn rows_emitted(&self) -> usize {
        self.next_index - 1
    }

    /// Read access to the channel's thread state.
    pub fn matcher(&self) -> &ThreadMatcher {
        &self.matcher
    }

    /// Ends the channel and returns announced replies that never appeared.
    pub fn finish(mut self) -> Vec<PendingThread> {
        self.matcher.drain_unmatched()
    }
}
