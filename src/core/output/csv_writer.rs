//! CSV output writer.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::export::{Report, Sheet};
use crate::core::output::DATETIME_TEXT_FORMAT;
use crate::core::row::HEADER;
use crate::error::{ExportError, Result};

/// Writes one `<channel>.csv` per sheet into `output_dir`.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `index`, `user`, `text`, `thread`, `reactions`, `datetime`
/// - Datetime: `YYYY-MM-DD HH:MM:SS`
/// - Encoding: UTF-8
///
/// All sheets are rendered before the first file is created. Returns the
/// paths written, in sheet order.
pub fn write_csv(report: &Report, output_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let output_dir = output_dir.as_ref();

    let mut rendered = Vec::with_capacity(report.sheets.len());
    for sheet in &report.sheets {
        rendered.push((file_name(&sheet.name), to_csv(sheet)?));
    }

    fs::create_dir_all(output_dir).map_err(|e| ExportError::io(output_dir, e))?;

    let mut written = Vec::with_capacity(rendered.len());
    for (name, content) in rendered {
        let path = output_dir.join(name);
        fs::write(&path, content).map_err(|e| ExportError::io(&path, e))?;
        written.push(path);
    }
    Ok(written)
}

/// Renders one sheet as CSV text, header included.
pub fn to_csv(sheet: &Sheet) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for row in &sheet.rows {
        let index = row.index.to_string();
        let datetime = row.datetime.format(DATETIME_TEXT_FORMAT).to_string();
        writer.write_record([
            index.as_str(),
            row.user.as_str(),
            row.text.as_str(),
            row.thread.as_str(),
            row.reactions.as_str(),
            datetime.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::io("<csv buffer>", e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn file_name(sheet_name: &str) -> String {
    let stem: String = sheet_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    format!("{stem}.csv")
}
