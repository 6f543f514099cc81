//! XLSX output writer.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::warn;

use crate::core::export::{Report, Sheet};
use crate::core::row::HEADER;
use crate::error::{ExportError, Result};

/// Number format applied to the datetime column.
pub const DATETIME_NUM_FORMAT: &str = "yyyy/m/d hh:mm:ss";

const MAX_SHEET_NAME_LEN: usize = 31;
const ILLEGAL_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Writes the report as an XLSX workbook, one worksheet per sheet.
///
/// # Format
/// - Row 1: `index`, `user`, `text`, `thread`, `reactions`, `datetime`
/// - `index` is numeric, `datetime` is a native date cell
/// - No placeholder sheet besides the channel sheets
///
/// The workbook is assembled in memory and written with a single call.
pub fn write_xlsx(report: &Report, output_path: impl AsRef<Path>) -> Result<()> {
    let output_path = output_path.as_ref();
    let bytes = to_xlsx(report)?;
    fs::write(output_path, bytes).map_err(|e| ExportError::io(output_path, e))
}

/// Builds the XLSX workbook in memory.
pub fn to_xlsx(report: &Report) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format(DATETIME_NUM_FORMAT);
    let mut used_names = HashSet::new();

    for sheet in &report.sheets {
        let name = unique_sheet_name(&sheet.name, &mut used_names);
        if name != sheet.name {
            warn!(channel = %sheet.name, sheet = %name, "channel name is not a valid sheet name, renamed");
        }

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&name)?;
        write_sheet(worksheet, sheet, &date_format)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet, date_format: &Format) -> Result<()> {
    for (col, title) in HEADER.iter().enumerate() {
        worksheet.write_string(0, col as u16, *title)?;
    }

    for (i, row) in sheet.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_number(r, 0, row.index as f64)?;
        for (col, value) in [(1, &row.user), (2, &row.text), (3, &row.thread), (4, &row.reactions)] {
            if !value.is_empty() {
                worksheet.write_string(r, col, value)?;
            }
        }
        worksheet.write_datetime_with_format(r, 5, &row.datetime, date_format)?;
    }

    Ok(())
}

/// Makes a channel name usable as a worksheet name.
///
/// Replaces `[]:*?/\` with `_`, cuts the name to 31 characters and trims
/// surrounding apostrophes. An empty result becomes `"channel"`.
///
/// # Example
///
/// ```rust
/// use slackbook::core::output::sanitize_sheet_name;
///
/// assert_eq!(sanitize_sheet_name("general"), "general");
/// assert_eq!(sanitize_sheet_name("q&a/help"), "q&a_help");
/// assert_eq!(sanitize_sheet_name(&"x".repeat(40)).len(), 31);
/// ```
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if ILLEGAL_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let cleaned: String = cleaned
        .trim_start_matches('\'')
        .chars()
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim_end_matches('\'');

    if cleaned.is_empty() {
        "channel".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Sanitizes `name` and suffixes it until it is unique (case-insensitive).
fn unique_sheet_name(name: &str, used: &mut HashSet<String>) -> String {
    let base = sanitize_sheet_name(name);
    let mut candidate = base.clone();
    let mut n = 2;

    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!("~{n}");
        let keep = MAX_SHEET_NAME_LEN - suffix.chars().count();
        candidate = base.chars().take(keep).collect::<String>() + &suffix;
        n += 1;
    }

    used.insert(candidate.to_lowercase());
    candidate
}
