//! User directory and sender identity resolution.
//!
//! `users.json` maps user ids to real names. Messages in an export can come
//! from accounts that are not in the directory: the built-in system account,
//! integrations posting as bots, and users that were deleted before the
//! export was taken. [`UserDirectory::resolve`] covers all of them without
//! ever failing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sender id of the platform's built-in system account.
pub const SYSTEM_SENDER_ID: &str = "USLACKBOT";

/// `subtype` value marking a message posted by an integration.
pub const BOT_MESSAGE_SUBTYPE: &str = "bot_message";

/// Display name given to integration senders.
pub const BOT_DISPLAY_NAME: &str = "Bot";

/// A resolved sender: user id plus the name shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(
        rename = "real_name",
        default,
        deserialize_with = "crate::message::null_as_default"
    )]
    pub display_name: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Formats the identity as `"<display name> (<id>)"` for the user column.
    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name, self.id)
    }

    /// Returns `true` if the directory had no name for this identity.
    pub fn is_unresolved(&self) -> bool {
        self.display_name.is_empty()
    }
}

/// Read-only lookup from user id to [`Identity`], loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<String, Identity>,
}

impl UserDirectory {
    /// Builds a directory from `users.json` entries. Later duplicates win.
    pub fn new(users: impl IntoIterator<Item = Identity>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Identity> {
        self.users.get(id)
    }

    /// Resolves the sender of a message.
    ///
    /// Order of precedence:
    /// 1. a directory entry for `sender_id`
    /// 2. the system account: `{bot_id, "USLACKBOT"}` (the raw id doubles as
    ///    the display name)
    /// 3. an integration message: `{bot_id, "Bot"}`
    /// 4. anything else: `{sender_id, ""}`
    ///
    /// # Example
    ///
    /// ```rust
    /// use slackbook::identity::{Identity, UserDirectory};
    ///
    /// let dir = UserDirectory::new([Identity::new("U1", "Alice")]);
    ///
    /// assert_eq!(dir.resolve("U1", "", "").display_name, "Alice");
    /// assert_eq!(dir.resolve("", "B7", "bot_message"), Identity::new("B7", "Bot"));
    /// assert_eq!(dir.resolve("USLACKBOT", "B0", ""), Identity::new("B0", "USLACKBOT"));
    /// assert!(dir.resolve("U404", "", "").is_unresolved());
    /// ```
    pub fn resolve(&self, sender_id: &str, bot_id: &str, sub_kind: &str) -> Identity {
        if let Some(identity) = self.users.get(sender_id) {
            return identity.clone();
        }

        if sender_id == SYSTEM_SENDER_ID {
            return Identity::new(bot_id, sender_id);
        }

        if sub_kind == BOT_MESSAGE_SUBTYPE {
            return Identity::new(bot_id, BOT_DISPLAY_NAME);
        }

        debug!(sender_id, "sender not found in user directory");
        Identity::new(sender_id, "")
    }

    /// Resolves a bare user id (thread replies, reactors).
    ///
    /// No bot fallbacks apply; an unknown id keeps its id and gets an empty
    /// display name.
    pub fn resolve_id(&self, id: &str) -> Identity {
        match self.users.get(id) {
            Some(identity) => identity.clone(),
            None => {
                debug!(user_id = id, "user not found in user directory");
                Identity::new(id, "")
            }
        }
    }
}

impl FromIterator<Identity> for UserDirectory {
    fn from_iter<I: IntoIterator<Item = Identity>>(iter: I) -> Self {
        Self::new(iter)
    }
}
