//! Thread reconstruction.
//!
//! In an export, a thread root lists its replies as `(user, ts)` pairs, and
//! each reply shows up again later in the stream as a top-level message
//! carrying `parent_user_id`. The two halves are tied together only by the
//! reply's `ts`:
//!
//! ```text
//! row 1  U1 "hi"      replies: [(U2, "100.0")]   -> registers pending "100.0"
//! row 2  U3 "other"
//! row 3  U2 "hey"     ts "100.0", parent U1      -> consumes pending "100.0"
//! ```
//!
//! [`ThreadMatcher`] holds the pending replies of one channel. Messages must
//! be fed in chronological order, since a reply can only be matched after its
//! root has been seen.

use std::collections::{HashMap, VecDeque};

use crate::error::{ExportError, Result};
use crate::identity::{Identity, UserDirectory};
use crate::message::Message;
use crate::timestamp::{TimeZoneMode, decode, format_reply_time};

/// First line of the annotation on a thread root.
pub const THREAD_ROOT_HEADER: &str = "Thread posts:";

/// A reply announced by a thread root, waiting for its own message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingThread {
    /// Row index of the thread root in the sheet.
    pub parent_row_index: usize,
    /// `ts` of the announced reply; the matching key.
    pub reply_timestamp: String,
    /// Resolved sender of the thread root.
    pub parent_sender: Identity,
    /// Resolved author of the reply.
    pub reply_user: Identity,
}

/// Correlates thread roots with their replies within one channel.
///
/// Create one matcher per channel so pending state never crosses channels.
#[derive(Debug)]
pub struct ThreadMatcher {
    pending: HashMap<String, VecDeque<PendingThread>>,
    strict: bool,
    time_zone: TimeZoneMode,
}

impl ThreadMatcher {
    /// Creates a matcher.
    ///
    /// With `strict` set, a reply timestamp announced twice while still
    /// pending is a [`ExportError::ThreadConsistency`]. Otherwise duplicates
    /// queue up and are consumed in registration order.
    pub fn new(strict: bool, time_zone: TimeZoneMode) -> Self {
        Self {
            pending: HashMap::new(),
            strict,
            time_zone,
        }
    }

    /// Computes the thread annotation for `msg` placed at `row_index`.
    ///
    /// - thread root: registers each reply and returns `"Thread posts:"`
    ///   followed by one `"<n>: <name>(<time>)"` line per reply
    /// - orphaned reply: consumes the matching pending reply and returns
    ///   `"Thread parent index: <row>"`
    /// - anything else: an empty string
    ///
    /// # Example
    ///
    /// ```rust
    /// use slackbook::identity::{Identity, UserDirectory};
    /// use slackbook::thread::ThreadMatcher;
    /// use slackbook::timestamp::TimeZoneMode;
    /// use slackbook::Message;
    ///
    /// let dir = UserDirectory::new([Identity::new("U1", "Alice"), Identity::new("U2", "Bob")]);
    /// let mut matcher = ThreadMatcher::new(true, TimeZoneMode::Utc);
    ///
    /// let root = Message::new("U1", "hi", "50.0").with_reply("U2", "100.0");
    /// let alice = dir.resolve("U1", "", "");
    /// let note = matcher.annotate(&root, &alice, 1, &dir)?;
    /// assert_eq!(note, "Thread posts:\n1: Bob(1970/1/1 00:01:40)");
    ///
    /// let reply = Message::new("U2", "hey", "100.0").in_thread("50.0", "U1");
    /// let bob = dir.resolve("U2", "", "");
    /// assert_eq!(matcher.annotate(&reply, &bob, 2, &dir)?, "Thread parent index: 1");
    /// assert!(matcher.is_idle());
    /// # Ok::<(), slackbook::ExportError>(())
    /// ```
    pub fn annotate(
        &mut self,
        msg: &Message,
        sender: &Identity,
        row_index: usize,
        directory: &UserDirectory,
    ) -> Result<String> {
        if msg.is_thread_root() {
            self.register_root(msg, sender, row_index, directory)
        } else if msg.is_orphaned_reply() {
            let parent = self.consume_reply(msg)?;
            Ok(format!("Thread parent index: {}", parent.parent_row_index))
        } else {
            Ok(String::new())
        }
    }

    fn register_root(
        &mut self,
        msg: &Message,
        sender: &Identity,
        row_index: usize,
        directory: &UserDirectory,
    ) -> Result<String> {
        let mut lines = Vec::with_capacity(msg.replies.len() + 1);
        lines.push(THREAD_ROOT_HEADER.to_string());

        for (n, reply) in msg.replies.iter().enumerate() {
            let reply_user = directory.resolve_id(&reply.sender_id);
            let reply_time = format_reply_time(decode(&reply.timestamp)?, self.time_zone);
            lines.push(format!(
                "{}: {}({})",
                n + 1,
                reply_user.display_name,
                reply_time
            ));

            self.register(PendingThread {
                parent_row_index: row_index,
                reply_timestamp: reply.timestamp.clone(),
                parent_sender: sender.clone(),
                reply_user,
            })?;
        }

        Ok(lines.join("\n"))
    }

    fn register(&mut self, pending: PendingThread) -> Result<()> {
        let queue = self
            .pending
            .entry(pending.reply_timestamp.clone())
            .or_default();

        if self.strict && !queue.is_empty() {
            return Err(ExportError::thread_consistency(
                pending.reply_timestamp,
                format!(
                    "reply timestamp announced by row {} is already pending for row {}",
                    pending.parent_row_index, queue[0].parent_row_index
                ),
            ));
        }

        queue.push_back(pending);
        Ok(())
    }

    fn consume_reply(&mut self, msg: &Message) -> Result<PendingThread> {
        let Some(queue) = self.pending.get_mut(&msg.timestamp) else {
            return Err(ExportError::thread_consistency(
                &msg.timestamp,
                format!(
                    "no thread root announced a reply at this ts (parent user {})",
                    msg.parent_sender_id
                ),
            ));
        };

        let parent_id = queue
            .front()
            .map(|p| p.parent_sender.id.as_str())
            .unwrap_or_default();
        if parent_id != msg.parent_sender_id {
            return Err(ExportError::thread_consistency(
                &msg.timestamp,
                format!(
                    "reply names parent user {} but the pending thread root was posted by {}",
                    msg.parent_sender_id, parent_id
                ),
            ));
        }

        let matched = queue.pop_front();
        if queue.is_empty() {
            self.pending.remove(&msg.timestamp);
        }

        matched.ok_or_else(|| {
            ExportError::thread_consistency(&msg.timestamp, "pending thread queue was empty")
        })
    }

    /// Number of announced replies not yet matched.
    pub fn pending_len(&self) -> usize {
        self.pending.values().map(VecDeque::len).sum()
    }

    /// Returns `true` when every announced reply has been matched.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns the replies that never showed up, ordered by
    /// parent row and then timestamp.
    pub fn drain_unmatched(&mut self) -> Vec<PendingThread> {
        let mut unmatched: Vec<PendingThread> =
            self.pending.drain().flat_map(|(_, queue)| queue).collect();
        unmatched.sort_by(|a, b| {
            a.parent_row_index
                .cmp(&b.parent_row_index)
                .then_with(|| a.reply_timestamp.cmp(&b.reply_timestamp))
        });
        unmatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> UserDirectory {
        UserDirectory::new([
            Identity::new("U1", "Alice"),
            Identity::new("U2", "Bob"),
            Identity::new("U3", "Carol"),
        ])
    }

    fn annotate(
        matcher: &mut ThreadMatcher,
        dir: &UserDirectory,
        msg: &Message,
        row: usize,
    ) -> Result<String> {
        let sender = dir.resolve(&msg.sender_id, &msg.bot_id, &msg.sub_kind);
        matcher.annotate(msg, &sender, row, dir)
    }

    #[test]
    fn test_plain_message_has_no_annotation() {
        let dir = directory();
        let mut matcher = ThreadMatcher::new(true, TimeZoneMode::Utc);
        let msg = Message::new("U1", "hello", "10.0");
        assert_eq!(annotate(&mut matcher, &dir, &msg, 1).unwrap(), "");
        assert!(matcher.is_idle());
    }

    #[test]
    fn test_thread_round_trip() {
        let dir = directory();
        let mut matcher = ThreadMatcher::new(true, TimeZoneMode::Utc);

        let root = Message::new("U1", "root", "10.0")
            .with_reply("U2", "20.0")
            .with_reply("U3", "30.0");
        let note = annotate(&mut matcher, &dir, &root, 1).unwrap();
        assert_eq!(
            note,
            "Thread posts:\n1: Bob(1970/1/1 00:00:20)\n2: Carol(1970/1/1 00:00:30)"
        );
        assert_eq!(matcher.pending_len(), 2);

        let first = Message::new("U2", "a", "20.0").in_thread("10.0", "U1");
        let second = Message::new("U3", "b", "30.0").in_thread("10.0", "U1");
        assert_eq!(
            annotate(&mut matcher, &dir, &first, 2).unwrap(),
            "Thread parent index: 1"
        );
        assert_eq!(matcher.pending_len(), 1);
        assert_eq!(
            annotate(&mut matcher, &dir, &second, 3).unwrap(),
            "Thread parent index: 1"
        );
        assert!(matcher.is_idle());
        assert_eq!(matcher.pending_len(), 0);
    }

    #[test]
    fn test_reply_is_consumed_once() {
        let dir = directory();
        let mut matcher = ThreadMatcher::new(true, TimeZoneMode::Utc);

        let root = Message::new("U1", "root", "10.0").with_reply("U2", "20.0");
        annotate(&mut matcher, &dir, &root, 1).unwrap();

        let reply = Message::new("U2", "a", "20.0").in_thread("10.0", "U1");
        annotate(&mut matcher, &dir, &reply, 2).unwrap();

        let err = annotate(&mut matcher, &dir, &reply, 3).unwrap_err();
        assert!(err.is_thread_consistency());
    }

    #[test]
    fn test_parent_sender_mismatch_is_rejected() {
        let dir = directory();
        let mut matcher = ThreadMatcher::new(true, TimeZoneMode::Utc);

        let root = Message::new("U1", "root", "10.0").with_reply("U2", "20.0");
        annotate(&mut matcher, &dir, &root, 1).unwrap();

        let reply = Message::new("U2", "a", "20.0").in_thread("10.0", "U3");
        let err = annotate(&mut matcher, &dir, &reply, 2).unwrap_err();
        assert!(err.is_thread_consistency());
        assert!(err.to_string().contains("U3"));
        // The pending reply is left untouched
        assert_eq!(matcher.pending_len(), 1);
    }

    #[test]
    fn test_reply_without_root_is_rejected() {
        let dir = directory();
        let mut matcher = ThreadMatcher::new(true, TimeZoneMode::Utc);
        let reply = Message::new("U2", "a", "20.0").in_thread("10.0", "U1");
        let err = annotate(&mut matcher, &dir, &reply, 1).unwrap_err();
        assert!(err.is_thread_consistency());
    }

    #[test]
    fn test_strict_mode_rejects_duplicate_reply_timestamps() {
        let dir = directory();
        let mut matcher = ThreadMatcher::new(true, TimeZoneMode::Utc);

        let a = Message::new("U1", "a", "10.0").with_reply("U2", "20.0");
        let b = Message::new("U3", "b", "11.0").with_reply("U2", "20.0");
        annotate(&mut matcher, &dir, &a, 1).unwrap();
        let err = annotate(&mut matcher, &dir, &b, 2).unwrap_err();
        assert!(err.is_thread_consistency());
    }

    #[test]
    fn test_lenient_mode_matches_first_registered() {
        let dir = directory();
        let mut matcher = ThreadMatcher::new(false, TimeZoneMode::Utc);

        let a = Message::new("U1", "a", "10.0").with_reply("U2", "20.0");
        let b = Message::new("U1", "b", "11.0").with_reply("U2", "20.0");
        annotate(&mut matcher, &dir, &a, 1).unwrap();
        annotate(&mut matcher, &dir, &b, 2).unwrap();
        assert_eq!(matcher.pending_len(), 2);

        let reply = Message::new("U2", "r", "20.0").in_thread("10.0", "U1");
        assert_eq!(
            annotate(&mut matcher, &dir, &reply, 3).unwrap(),
            "Thread parent index: 1"
        );
        assert_eq!(
            annotate(&mut matcher, &dir, &reply, 4).unwrap(),
            "Thread parent index: 2"
        );
        assert!(matcher.is_idle());
    }

    #[test]
    fn test_unknown_reply_user_renders_empty_name() {
        let dir = directory();
        let mut matcher = ThreadMatcher::new(true, TimeZoneMode::Utc);
        let root = Message::new("U1", "root", "10.0").with_reply("U404", "20.0");
        let note = annotate(&mut matcher, &dir, &root, 1).unwrap();
        assert_eq!(note, "Thread posts:\n1: (1970/1/1 00:00:20)");
    }

    #[test]
    fn test_malformed_reply_timestamp_fails() {
        let dir = directory();
        let mut matcher = ThreadMatcher::new(true, TimeZoneMode::Utc);
        let root = Message::new("U1", "root", "10.0").with_reply("U2", "soon");
        let err = annotate(&mut matcher, &dir, &root, 1).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_drain_unmatched_is_ordered() {
        let dir = directory();
        let mut matcher = ThreadMatcher::new(true, TimeZoneMode::Utc);
        let a = Message::new("U1", "a", "10.0")
            .with_reply("U2", "40.0")
            .with_reply("U3", "30.0");
        let b = Message::new("U2", "b", "11.0").with_reply("U1", "20.0");
        annotate(&mut matcher, &dir, &a, 1).unwrap();
        annotate(&mut matcher, &dir, &b, 2).unwrap();

        let unmatched = matcher.drain_unmatched();
        let keys: Vec<_> = unmatched
            .iter()
            .map(|p| (p.parent_row_index, p.reply_timestamp.as_str()))
            .collect();
        assert_eq!(keys, vec![(1, "30.0"), (1, "40.0"), (2, "20.0")]);
        assert_eq!(unmatched[0].reply_user.display_name, "Carol");
        assert!(matcher.is_idle());
    }
}
