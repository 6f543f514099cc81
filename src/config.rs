//! Export configuration.
//!
//! [`ExportConfig`] collects the switches that change how an export is laid
//! out, without any CLI framework dependencies.
//!
//! # Example
//!
//! ```rust
//! use slackbook::config::ExportConfig;
//! use slackbook::reaction::ReactionLayout;
//! use slackbook::timestamp::TimeZoneMode;
//!
//! let config = ExportConfig::new()
//!     .with_layout(ReactionLayout::Rows)
//!     .with_time_zone(TimeZoneMode::Utc);
//!
//! assert_eq!(config.layout, ReactionLayout::Rows);
//! assert!(config.strict_reply_timestamps);
//! ```

use serde::{Deserialize, Serialize};

pub use crate::reaction::ReactionLayout;
pub use crate::timestamp::TimeZoneMode;

/// Configuration for one export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Where reactions go: inline text or one row each (default: inline)
    pub layout: ReactionLayout,

    /// Zone for the datetime column and reply times (default: local)
    pub time_zone: TimeZoneMode,

    /// Sort each channel's messages by `ts` before thread matching, on top
    /// of the file-name order (default: true)
    pub sort_by_timestamp: bool,

    /// Fail when two thread roots announce the same reply `ts`
    /// (default: true)
    pub strict_reply_timestamps: bool,

    /// Replace `:shortcode:` with emoji glyphs in text and reactions
    /// (default: true)
    pub expand_emoji: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            layout: ReactionLayout::Inline,
            time_zone: TimeZoneMode::Local,
            sort_by_timestamp: true,
            strict_reply_timestamps: true,
            expand_emoji: true,
        }
    }
}

impl ExportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reaction layout.
    #[must_use]
    pub fn with_layout(mut self, layout: ReactionLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the display time zone.
    #[must_use]
    pub fn with_time_zone(mut self, time_zone: TimeZoneMode) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Enables or disables sorting messages by timestamp.
    #[must_use]
    pub fn with_sort_by_timestamp(mut self, enabled: bool) -> Self {
        self.sort_by_timestamp = enabled;
        self
    }

    /// Sets whether duplicate reply timestamps are an error.
    #[must_use]
    pub fn with_strict_reply_timestamps(mut self, strict: bool) -> Self {
        self.strict_reply_timestamps = strict;
        self
    }

    /// Enables or disables emoji shortcode expansion.
    #[must_use]
    pub fn with_emoji_expansion(mut self, enabled: bool) -> Self {
        self.expand_emoji = enabled;
        self
    }
}
