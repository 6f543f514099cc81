//! Report format selection.
//!
//! # Example
//!
//! ```rust
//! use slackbook::format::ReportFormat;
//! use std::path::Path;
//!
//! let format: ReportFormat = "xlsx".parse().unwrap();
//! assert_eq!(
//!     format.default_output(Path::new("exports/acme")),
//!     Path::new("exports/acme.xlsx")
//! );
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::Report;
use crate::error::{ExportError, Result};

/// Output format for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ReportFormat {
    /// A single workbook with one worksheet per channel (default).
    #[default]
    Xlsx,

    /// A directory with one CSV file per channel.
    Csv,
}

impl ReportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["xlsx", "csv"]
    }

    /// Default output location for an export directory.
    ///
    /// - XLSX: `<parent>/<dir name>.xlsx`
    /// - CSV: `<parent>/<dir name>_csv/`
    pub fn default_output(&self, export_dir: &Path) -> PathBuf {
        let base = export_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "export".to_string());
        let parent = export_dir.parent().unwrap_or_else(|| Path::new(""));

        match self {
            ReportFormat::Xlsx => parent.join(format!("{base}.xlsx")),
            ReportFormat::Csv => parent.join(format!("{base}_csv")),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Xlsx => write!(f, "XLSX"),
            ReportFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ReportFormat::Xlsx),
            "csv" => Ok(ReportFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ReportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes a report to `path` in the given format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The output cannot be written
#[allow(unused_variables)]
pub fn write_to_format(report: &Report, path: &Path, format: ReportFormat) -> Result<()> {
    match format {
        #[cfg(feature = "xlsx-output")]
        ReportFormat::Xlsx => crate::core::output::write_xlsx(report, path),
        #[cfg(feature = "csv-output")]
        ReportFormat::Csv => crate::core::output::write_csv(report, path).map(|_| ()),
        #[allow(unreachable_patterns)]
        _ => Err(ExportError::invalid_format(
            "output",
            format!(
                "Output format {} requires the '{}' feature to be enabled",
                format,
                match format {
                    ReportFormat::Xlsx => "xlsx-output",
                    ReportFormat::Csv => "csv-output",
                }
            ),
        )),
    }
}
