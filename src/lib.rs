//! # Slackbook
//!
//! A Rust library for turning an unpacked Slack workspace export into a
//! spreadsheet report, one sheet per channel.
//!
//! ## Overview
//!
//! A Slack export is a directory holding `users.json`, `channels.json` and
//! one folder per channel with a JSON batch file per day. Slackbook reads
//! that directory and produces one row per message with:
//! - **user** - `Display Name (USERID)`, with bot and system fallbacks
//! - **text** - the message body with `:shortcode:` emoji expanded
//! - **thread** - a reply listing on thread roots, a back-reference on replies
//! - **reactions** - `👍(2) - [Alice,Bob]`, inline or one row per reaction
//! - **datetime** - the `ts` value as a real date cell
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use slackbook::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let archive = ExportArchive::open("acme-export")?;
//!     let config = ExportConfig::new().with_layout(ReactionLayout::Rows);
//!     let report = Exporter::new(config).export(&archive)?;
//!
//!     write_xlsx(&report, "acme-export.xlsx")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`identity`] - [`UserDirectory`](identity::UserDirectory) and sender resolution
//! - [`timestamp`] - `ts` decoding, reply time formatting, [`SortKey`](timestamp::SortKey)
//! - [`emoji`] - shortcode expansion
//! - [`thread`] - [`ThreadMatcher`](thread::ThreadMatcher), pairing replies with roots
//! - [`reaction`] - [`ReactionRenderer`](reaction::ReactionRenderer) and layouts
//! - [`message`] - the export's [`Message`], [`Channel`](message::Channel), [`Reaction`](message::Reaction)
//! - [`config`] - [`ExportConfig`](config::ExportConfig)
//! - [`core`] - row building, the exporter and output writers
//! - [`format`] - [`ReportFormat`](format::ReportFormat) and [`write_to_format`](format::write_to_format)
//! - [`error`] - [`ExportError`] and [`Result`]
//! - `cli` - clap argument types (requires the `cli` feature)

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod emoji;
pub mod error;
pub mod format;
pub mod identity;
pub mod message;
pub mod reaction;
pub mod thread;
pub mod timestamp;

// Re-export the main types at the crate root for convenience
pub use error::{ExportError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use slackbook::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;
    pub use crate::error::{ExportError, Result};

    pub use crate::config::ExportConfig;
    pub use crate::identity::{Identity, UserDirectory};
    pub use crate::message::{Channel, Reaction};
    pub use crate::reaction::ReactionLayout;
    pub use crate::timestamp::TimeZoneMode;

    pub use crate::core::{ExportArchive, Exporter, OutputRow, Report, RowBuilder, Sheet};
    pub use crate::format::{ReportFormat, write_to_format};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "xlsx-output")]
    pub use crate::core::output::{to_xlsx, write_xlsx};
}
