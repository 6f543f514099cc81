//! Report writers.
//!
//! This module provides writers for the supported report formats:
//! - [`write_xlsx`] / [`to_xlsx`] - one worksheet per channel, real datetime
//!   cells - requires `xlsx-output` feature
//! - [`write_csv`] / [`to_csv`] - one CSV file per channel in an output
//!   directory - requires `csv-output` feature
//!
//! Every sheet starts with the [`HEADER`](crate::core::row::HEADER) row.
//! Writers receive a complete [`Report`](crate::core::Report), so a failed
//! export never leaves a partial file behind.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "xlsx-output")]
//! # fn main() -> slackbook::Result<()> {
//! use slackbook::core::output::write_xlsx;
//! use slackbook::core::{ExportArchive, Exporter};
//!
//! let archive = ExportArchive::open("my-workspace")?;
//! let report = Exporter::default().export(&archive)?;
//! write_xlsx(&report, "my-workspace.xlsx")?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "xlsx-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "xlsx-output")]
mod xlsx_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "xlsx-output")]
pub use xlsx_writer::{DATETIME_NUM_FORMAT, sanitize_sheet_name, to_xlsx, write_xlsx};

/// Datetime rendering for text-based formats.
pub const DATETIME_TEXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
