//! Property-based tests for slackbook.
//!
//! These tests generate random channels to find edge cases in row numbering,
//! timestamp handling and thread matching.

use proptest::prelude::*;

use slackbook::config::ExportConfig;
use slackbook::core::RowBuilder;
use slackbook::core::output::sanitize_sheet_name;
use slackbook::emoji;
use slackbook::identity::{Identity, UserDirectory};
use slackbook::message::Reaction;
use slackbook::reaction::ReactionLayout;
use slackbook::timestamp::{SortKey, TimeZoneMode, decode};
use slackbook::Message;

const BASE_TS: i64 = 1_600_000_000;

fn directory() -> UserDirectory {
    UserDirectory::new([Identity::new("U1", "Alice"), Identity::new("U2", "Bob")])
}

fn config(layout: ReactionLayout) -> ExportConfig {
    ExportConfig::new()
        .with_layout(layout)
        .with_time_zone(TimeZoneMode::Utc)
}

/// A plain message without a timestamp; the channel strategy assigns one.
fn arb_message() -> impl Strategy<Value = Message> {
    (
        // Fast: select from predefined senders, including an unknown one
        prop::sample::select(vec!["U1", "U2", "U404", ""]),
        prop::sample::select(vec![
            "Hello",
            "Ship it :rocket:",
            ":not_a_real_emoji:",
            "Привет мир",
            "",
            "Special,chars\"here\nnewline",
        ]),
        prop::collection::vec(
            (
                prop::sample::select(vec!["thumbsup", "tada", "custom_party"]),
                prop::collection::vec(prop::sample::select(vec!["U1", "U2", "U9"]), 1..4),
            ),
            0..4,
        ),
    )
        .prop_map(|(sender, text, reactions)| {
            let mut msg = Message::new(sender, text, "");
            for (name, users) in reactions {
                let count = users.len() as u32;
                msg = msg.with_reaction(Reaction::new(name, users, count));
            }
            msg
        })
}

/// A channel of messages with strictly increasing timestamps.
fn arb_channel(max_len: usize) -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec(arb_message(), 0..max_len).prop_map(|messages| {
        messages
            .into_iter()
            .enumerate()
            .map(|(i, mut msg)| {
                msg.timestamp = format!("{}.{:06}", BASE_TS + i as i64 * 10, i);
                msg
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // ROW NUMBERING PROPERTIES
    // ============================================

    /// Inline layout emits exactly one row per message, numbered from 1
    #[test]
    fn inline_rows_match_messages(messages in arb_channel(20)) {
        let dir = directory();
        let mut builder = RowBuilder::new(&dir, config(ReactionLayout::Inline));

        let mut indices = Vec::new();
        for msg in &messages {
            let rows = builder.push(msg).unwrap();
            prop_assert_eq!(rows.len(), 1);
            indices.push(rows[0].index);
        }

        let expected: Vec<usize> = (1..=messages.len()).collect();
        prop_assert_eq!(indices, expected);
        prop_assert_eq!(builder.rows_emitted(), messages.len());
    }

    /// Rows layout adds one row per reaction and keeps numbering contiguous
    #[test]
    fn rows_layout_numbering_is_contiguous(messages in arb_channel(20)) {
        let dir = directory();
        let mut builder = RowBuilder::new(&dir, config(ReactionLayout::Rows));

        let mut indices = Vec::new();
        for msg in &messages {
            let rows = builder.push(msg).unwrap();
            prop_assert_eq!(rows.len(), msg.reactions.len() + 1);
            prop_assert!(rows[1..].iter().all(|r| r.user.is_empty() && r.text.is_empty()));
            indices.extend(rows.iter().map(|r| r.index));
        }

        let total: usize = messages.iter().map(|m| m.reactions.len() + 1).sum();
        let expected: Vec<usize> = (1..=total).collect();
        prop_assert_eq!(indices, expected);
    }

    // ============================================
    // THREAD PROPERTIES
    // ============================================

    /// A root followed by all its replies leaves nothing pending
    #[test]
    fn announced_replies_all_match(reply_count in 1usize..8) {
        let dir = directory();
        let mut builder = RowBuilder::new(&dir, config(ReactionLayout::Inline));

        let root_ts = format!("{BASE_TS}.000000");
        let mut root = Message::new("U1", "root", root_ts.clone());
        let reply_ts: Vec<String> = (1..=reply_count)
            .map(|i| format!("{}.000000", BASE_TS + i as i64))
            .collect();
        for ts in &reply_ts {
            root = root.with_reply("U2", ts.clone());
        }

        let root_rows = builder.push(&root).unwrap();
        prop_assert_eq!(root_rows[0].thread.lines().count(), reply_count + 1);

        for ts in &reply_ts {
            let reply = Message::new("U2", "reply", ts.clone()).in_thread(root_ts.clone(), "U1");
            let rows = builder.push(&reply).unwrap();
            prop_assert_eq!(rows[0].thread.as_str(), "Thread parent index: 1");
        }

        prop_assert!(builder.matcher().is_idle());
        prop_assert!(builder.finish().is_empty());
    }

    // ============================================
    // TIMESTAMP PROPERTIES
    // ============================================

    /// Decoding ignores the fraction
    #[test]
    fn decode_truncates_to_seconds(secs in 0i64..4_000_000_000, frac in 0u32..1_000_000) {
        let with_fraction = decode(&format!("{secs}.{frac:06}")).unwrap();
        let whole = decode(&format!("{secs}.000000")).unwrap();
        prop_assert_eq!(with_fraction, whole);
        prop_assert_eq!(with_fraction.timestamp(), secs);
    }

    /// Sort keys order like (seconds, fraction)
    #[test]
    fn sort_key_matches_numeric_order(
        a in (0i64..2_000_000_000, 0u32..1_000_000),
        b in (0i64..2_000_000_000, 0u32..1_000_000),
    ) {
        let key_a = SortKey::parse(&format!("{}.{:06}", a.0, a.1)).unwrap();
        let key_b = SortKey::parse(&format!("{}.{:06}", b.0, b.1)).unwrap();
        prop_assert_eq!(key_a.cmp(&key_b), a.cmp(&b));
    }

    // ============================================
    // TEXT PROPERTIES
    // ============================================

    /// Text without colons is never touched by emoji expansion
    #[test]
    fn expand_without_colons_is_identity(text in "[^:]{0,40}") {
        let expanded = emoji::expand(&text);
        prop_assert_eq!(expanded.as_ref(), text.as_str());
    }

    /// Sheet names always satisfy the worksheet naming rules
    #[test]
    fn sanitized_sheet_names_are_valid(name in ".{0,64}") {
        let sheet = sanitize_sheet_name(&name);
        prop_assert!(!sheet.is_empty());
        prop_assert!(sheet.chars().count() <= 31);
        prop_assert!(!sheet.chars().any(|c| "[]:*?/\\".contains(c)));
        prop_assert!(!sheet.starts_with('\''));
        prop_assert!(!sheet.ends_with('\''));
    }
}
