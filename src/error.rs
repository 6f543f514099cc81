//! Unified error types for slackbook.
//!
//! Every fallible operation in the crate returns [`ExportError`]. The variants
//! mirror the ways an export run can go wrong:
//!
//! - **I/O** - a lookup file or message batch is missing or unreadable
//! - **Parse** - malformed JSON or a malformed `ts` value
//! - **Thread consistency** - an orphaned reply cannot be tied back to the
//!   thread root that announced it
//! - **Sink** - the workbook or CSV files could not be written
//!
//! All of them are fatal for the run. A sender or reactor id missing from
//! `users.json` is *not* an error; it resolves to an identity with an empty
//! display name.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for slackbook operations.
///
/// # Example
///
/// ```rust
/// use slackbook::error::Result;
/// use slackbook::timestamp::decode;
///
/// fn year_of(ts: &str) -> Result<i32> {
///     use chrono::Datelike;
///     Ok(decode(ts)?.year())
/// }
///
/// assert_eq!(year_of("1610000000.000100").unwrap(), 2021);
/// ```
pub type Result<T> = std::result::Result<T, ExportError>;

/// The error type for all slackbook operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// A file could not be read or written.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// The file or directory involved
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A file was read but its content could not be parsed.
    #[error("Failed to parse {format}{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// What was being parsed (e.g. "users.json", "message batch")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// A `ts` value whose seconds component is not an integer.
    #[error("Malformed timestamp '{input}': expected \"<seconds>.<fraction>\"")]
    MalformedTimestamp {
        /// The raw timestamp string
        input: String,
    },

    /// An orphaned reply does not line up with any announced thread reply.
    ///
    /// Only an inconsistent export produces this.
    #[error("Found invalid thread data at ts {timestamp}: {message}")]
    ThreadConsistency {
        /// The reply timestamp being matched
        timestamp: String,
        /// What did not line up
        message: String,
    },

    /// The requested output is not available or not well-formed.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// The XLSX workbook could not be assembled or saved.
    #[cfg(feature = "xlsx-output")]
    #[error("Workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// A CSV sheet could not be written.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// JSON parsing error
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ExportError {
    /// Creates an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a JSON parse error for one of the export files.
    pub fn json(format: &'static str, source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ExportError::Parse {
            format,
            source: ParseErrorKind::Json(source),
            path,
        }
    }

    /// Creates a malformed timestamp error.
    pub fn malformed_timestamp(input: impl Into<String>) -> Self {
        ExportError::MalformedTimestamp {
            input: input.into(),
        }
    }

    /// Creates a thread consistency error.
    pub fn thread_consistency(timestamp: impl Into<String>, message: impl Into<String>) -> Self {
        ExportError::ThreadConsistency {
            timestamp: timestamp.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ExportError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ExportError::Io { .. })
    }

    /// Returns `true` if this is a parse error (malformed JSON or timestamp).
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            ExportError::Parse { .. } | ExportError::MalformedTimestamp { .. }
        )
    }

    /// Returns `true` if this is a thread consistency error.
    pub fn is_thread_consistency(&self) -> bool {
        matches!(self, ExportError::ThreadConsistency { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
