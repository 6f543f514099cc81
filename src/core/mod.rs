//! Core export pipeline.
//!
//! This module contains:
//! - [`row`] - Flattening messages into sheet rows ([`RowBuilder`], [`OutputRow`])
//! - [`export`] - Reading the archive and building a [`Report`]
//! - [`output`] - Format writers (XLSX, CSV)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use slackbook::core::{ExportArchive, Exporter};
//! use slackbook::config::ExportConfig;
//!
//! let archive = ExportArchive::open("my-workspace")?;
//! let report = Exporter::new(ExportConfig::new()).export(&archive)?;
//! for sheet in &report.sheets {
//!     println!("{}: {} rows", sheet.name, sheet.rows.len());
//! }
//! # Ok::<(), slackbook::ExportError>(())
//! ```

pub mod export;
pub mod output;
pub mod row;

// Re-export main types for convenience
pub use export::{ExportArchive, ExportStats, Exporter, Report, Sheet, read_json};
pub use row::{HEADER, OutputRow, RowBuilder};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "xlsx-output")]
pub use output::{to_xlsx, write_xlsx};
