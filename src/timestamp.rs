//! Codec for the export's `ts` strings.
//!
//! Every message, reply and thread reference carries a `ts` of the form
//! `"<unix seconds>.<microseconds>"`, e.g. `"1610000000.000100"`. The report
//! shows whole seconds, so [`decode`] keeps only the integer part. The full
//! string is still used verbatim as the thread-matching key, and
//! [`SortKey`] keeps the fraction for ordering.

use std::cmp::Ordering;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// Format used for reply times inside thread annotations (`2021/1/7 06:13:20`).
pub const REPLY_TIME_FORMAT: &str = "%Y/%-m/%-d %H:%M:%S";

/// Time zone used when rendering instants for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneMode {
    /// The zone of the machine running the export.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
}

impl TimeZoneMode {
    /// Converts an instant to a wall-clock time in this zone.
    pub fn to_naive(self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            TimeZoneMode::Local => instant.with_timezone(&Local).naive_local(),
            TimeZoneMode::Utc => instant.naive_utc(),
        }
    }
}

/// Decodes a `ts` string to an instant, truncated to whole seconds.
///
/// # Example
///
/// ```rust
/// use slackbook::timestamp::decode;
///
/// assert_eq!(decode("1610000000.123456")?, decode("1610000000.000000")?);
/// assert!(decode("not-a-number.0").is_err());
/// # Ok::<(), slackbook::ExportError>(())
/// ```
pub fn decode(raw: &str) -> Result<DateTime<Utc>> {
    let seconds = seconds_of(raw)?;
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| ExportError::malformed_timestamp(raw))
}

/// Renders a reply time for a thread annotation line.
pub fn format_reply_time(instant: DateTime<Utc>, zone: TimeZoneMode) -> String {
    zone.to_naive(instant).format(REPLY_TIME_FORMAT).to_string()
}

fn seconds_of(raw: &str) -> Result<i64> {
    let prefix = raw.split('.').next().unwrap_or_default();
    prefix
        .parse::<i64>()
        .map_err(|_| ExportError::malformed_timestamp(raw))
}

/// Chronological ordering key for a `ts` string, fraction included.
///
/// The fraction is compared as a decimal: `"5.1"` sorts after `"5.09"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    seconds: i64,
    micros: u32,
}

impl SortKey {
    const FRACTION_DIGITS: usize = 6;

    /// Parses the ordering key of a `ts` string.
    ///
    /// Like [`decode`], fails only when the seconds prefix is not an
    /// integer. The fraction contributes its leading digits (up to
    /// microseconds); anything after them is ignored.
    pub fn parse(raw: &str) -> Result<Self> {
        let seconds = seconds_of(raw)?;
        let fraction = raw.split_once('.').map(|(_, f)| f).unwrap_or_default();

        let mut micros = 0;
        let mut width = 0;
        for digit in fraction.chars().map_while(|c| c.to_digit(10)) {
            if width == Self::FRACTION_DIGITS {
                break;
            }
            micros = micros * 10 + digit;
            width += 1;
        }
        micros *= 10u32.pow((Self::FRACTION_DIGITS - width) as u32);

        Ok(Self { seconds, micros })
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.seconds, self.micros).cmp(&(other.seconds, other.micros))
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
