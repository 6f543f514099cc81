//! Records read from a workspace export.
//!
//! An export directory looks like this:
//!
//! ```text
//! export/
//! ├── users.json          [{"id": "U1", "real_name": "Alice"}, ...]
//! ├── channels.json       [{"id": "C1", "name": "general"}, ...]
//! └── general/
//!     ├── 2021-01-07.json [message, message, ...]
//!     └── 2021-01-08.json
//! ```
//!
//! The types here deserialize those files directly. Every message field is
//! optional in the JSON and defaults to an empty value, since different
//! message subtypes carry different subsets.
//!
//! # Example
//!
//! ```rust
//! use slackbook::Message;
//!
//! let json = r#"{
//!     "user": "U1", "type": "message", "ts": "1610000000.000100",
//!     "text": "hi", "replies": [{"user": "U2", "ts": "1610000100.000200"}]
//! }"#;
//! let msg: Message = serde_json::from_str(json)?;
//!
//! assert!(msg.is_thread_root());
//! assert!(!msg.is_orphaned_reply());
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// A channel from `channels.json`. Each channel becomes one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Reads an explicit JSON `null` as the field's default value.
///
/// `#[serde(default)]` only covers missing fields; exports also write
/// `"text": null` and similar.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single message record from a channel's message batch file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    /// Id of the posting user (`user`).
    #[serde(rename = "user", deserialize_with = "null_as_default")]
    pub sender_id: String,

    #[serde(deserialize_with = "null_as_default")]
    pub text: String,

    /// Record type, normally `"message"` (`type`).
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,

    /// Message subtype such as `"bot_message"` (`subtype`).
    #[serde(rename = "subtype", deserialize_with = "null_as_default")]
    pub sub_kind: String,

    /// Raw `"<seconds>.<fraction>"` timestamp, unique within a channel (`ts`).
    #[serde(rename = "ts", deserialize_with = "null_as_default")]
    pub timestamp: String,

    #[serde(deserialize_with = "null_as_default")]
    pub bot_id: String,

    /// `ts` of the thread root this message belongs to (`thread_ts`).
    #[serde(rename = "thread_ts", deserialize_with = "null_as_default")]
    pub thread_root_timestamp: String,

    /// Sender of the thread root, set on replies only (`parent_user_id`).
    #[serde(rename = "parent_user_id", deserialize_with = "null_as_default")]
    pub parent_sender_id: String,

    #[serde(deserialize_with = "null_as_default")]
    pub reactions: Vec<Reaction>,

    /// Replies announced on a thread root.
    #[serde(deserialize_with = "null_as_default")]
    pub replies: Vec<ReplyRef>,
}

impl Message {
    /// Creates a plain message from `sender_id` at `timestamp`.
    pub fn new(
        sender_id: impl Into<String>,
        text: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            sender_id: sender_id.into(),
            text: text.into(),
            kind: "message".to_string(),
            timestamp: timestamp.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the subtype.
    #[must_use]
    pub fn with_sub_kind(mut self, sub_kind: impl Into<String>) -> Self {
        self.sub_kind = sub_kind.into();
        self
    }

    /// Builder method to set the bot id.
    #[must_use]
    pub fn with_bot_id(mut self, bot_id: impl Into<String>) -> Self {
        self.bot_id = bot_id.into();
        self
    }

    /// Builder method to announce a reply on this (thread root) message.
    #[must_use]
    pub fn with_reply(mut self, sender_id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        if self.thread_root_timestamp.is_empty() {
            self.thread_root_timestamp = self.timestamp.clone();
        }
        self.replies.push(ReplyRef {
            sender_id: sender_id.into(),
            timestamp: timestamp.into(),
        });
        self
    }

    /// Builder method to mark this message as a reply in another thread.
    #[must_use]
    pub fn in_thread(
        mut self,
        root_timestamp: impl Into<String>,
        parent_sender_id: impl Into<String>,
    ) -> Self {
        self.thread_root_timestamp = root_timestamp.into();
        self.parent_sender_id = parent_sender_id.into();
        self
    }

    /// Builder method to add a reaction.
    #[must_use]
    pub fn with_reaction(mut self, reaction: Reaction) -> Self {
        self.reactions.push(reaction);
        self
    }

    /// Returns `true` if this message announces replies.
    pub fn is_thread_root(&self) -> bool {
        !self.replies.is_empty()
    }

    /// Returns `true` if this is a reply that must be tied back to its root.
    ///
    /// A thread root is never treated as an orphaned reply, even when the
    /// export sets `parent_user_id` on it.
    pub fn is_orphaned_reply(&self) -> bool {
        !self.is_thread_root() && !self.parent_sender_id.is_empty()
    }
}

/// A reply announced on a thread root.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyRef {
    #[serde(rename = "user", deserialize_with = "null_as_default")]
    pub sender_id: String,
    #[serde(rename = "ts", deserialize_with = "null_as_default")]
    pub timestamp: String,
}

/// An emoji reaction on a message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reaction {
    /// Emoji shortcode without colons, e.g. `"thumbsup"`.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Ids of the reacting users, in export order.
    #[serde(deserialize_with = "null_as_default")]
    pub users: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub count: u32,
}

impl Reaction {
    pub fn new<I, S>(name: impl Into<String>, users: I, count: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            users: users.into_iter().map(Into::into).collect(),
            count,
        }
    }
}
