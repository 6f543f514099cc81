//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Reactions`] - Reaction layout options
//! - [`OutputFormat`] - Output format options
//!
//! Both enums convert into their library counterparts, so the rest of the
//! crate never depends on clap:
//!
//! ```rust
//! use slackbook::cli::{OutputFormat, Reactions};
//! use slackbook::format::ReportFormat;
//! use slackbook::reaction::ReactionLayout;
//!
//! assert_eq!(ReactionLayout::from(Reactions::Rows), ReactionLayout::Rows);
//! assert_eq!(ReportFormat::from(OutputFormat::Csv), ReportFormat::Csv);
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ExportConfig;
use crate::format::ReportFormat;
use crate::reaction::ReactionLayout;
use crate::timestamp::TimeZoneMode;

/// Convert a Slack workspace export into a spreadsheet,
/// one sheet per channel.
#[derive(Parser, Debug, Clone)]
#[command(name = "slackbook")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    slackbook ./acme-export
    slackbook ./acme-export -o report.xlsx --utc
    slackbook ./acme-export --reactions rows
    slackbook ./acme-export --format csv -o sheets/")]
pub struct Args {
    /// Path to the unpacked export directory
    ///
    /// Optional at the clap level so a missing path is reported by the
    /// application with exit code 1.
    #[arg(value_name = "EXPORT_DIR")]
    pub export_dir: Option<PathBuf>,

    /// Output path (default: `<EXPORT_DIR>.xlsx` next to the export)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// How reactions are laid out
    #[arg(short, long, value_enum, default_value = "inline")]
    pub reactions: Reactions,

    /// Output format
    #[arg(short, long, value_enum, default_value = "xlsx")]
    pub format: OutputFormat,

    /// Render datetimes in UTC instead of the local time zone
    #[arg(long)]
    pub utc: bool,

    /// Keep messages in file order instead of sorting by timestamp
    #[arg(long)]
    pub no_sort: bool,

    /// Match duplicate reply timestamps first-in first-out instead of failing
    #[arg(long)]
    pub allow_duplicate_replies: bool,
}

impl Args {
    /// Builds the library configuration from the parsed flags.
    pub fn to_config(&self) -> ExportConfig {
        ExportConfig::new()
            .with_layout(self.reactions.into())
            .with_time_zone(if self.utc {
                TimeZoneMode::Utc
            } else {
                TimeZoneMode::Local
            })
            .with_sort_by_timestamp(!self.no_sort)
            .with_strict_reply_timestamps(!self.allow_duplicate_replies)
    }
}

/// Reaction layout options.
///
/// - [`Inline`](Reactions::Inline) - all reactions in the `reactions` cell
/// - [`Rows`](Reactions::Rows) - one extra row per reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reactions {
    /// Reactions joined by newlines in the message's own row (default)
    #[default]
    #[value(alias = "text")]
    Inline,

    /// One row per reaction right after the message
    #[value(alias = "row")]
    Rows,
}

impl From<Reactions> for ReactionLayout {
    fn from(reactions: Reactions) -> ReactionLayout {
        match reactions {
            Reactions::Inline => ReactionLayout::Inline,
            Reactions::Rows => ReactionLayout::Rows,
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Excel workbook, one worksheet per channel (default)
    #[default]
    Xlsx,

    /// Directory of CSV files, one per channel
    Csv,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> ReportFormat {
        match format {
            OutputFormat::Xlsx => ReportFormat::Xlsx,
            OutputFormat::Csv => ReportFormat::Csv,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ReportFormat::from(*self).fmt(f)
    }
}
