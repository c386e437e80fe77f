//! Spreadsheet export of the current tallies.
//!
//! One sheet, a header row, then one `{id, name, votes}` row per item in id
//! order. The workbook is produced in memory; handing it to the user is the
//! caller's job.

use chrono::NaiveDate;
use log::info;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Item;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Workbook error: {0}")]
    Workbook(#[from] XlsxError),

    #[error("Download failed: {0}")]
    Download(String),
}

/// Naming of the exported file and sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportLayout {
    /// File name prefix, before the date
    pub label: String,
    pub sheet_name: String,
    pub id_header: String,
    pub name_header: String,
    pub votes_header: String,
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self {
            label: "votes".into(),
            sheet_name: "Votes".into(),
            id_header: "ID".into(),
            name_header: "Name".into(),
            votes_header: "Votes".into(),
        }
    }
}

/// One exported line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub id: u32,
    pub name: String,
    pub votes: u32,
}

/// Snapshot rows in ascending id order. Images are not exported.
pub fn export_rows(items: &[Item]) -> Vec<ExportRow> {
    let mut rows: Vec<ExportRow> = items
        .iter()
        .map(|item| ExportRow {
            id: item.id,
            name: item.name.clone(),
            votes: item.votes,
        })
        .collect();
    rows.sort_by_key(|row| row.id);
    rows
}

/// `<label>_<YYYY-MM-DD>.xlsx`
pub fn export_file_name(label: &str, date: NaiveDate) -> String {
    format!("{}_{}.xlsx", label, date.format("%Y-%m-%d"))
}

/// Serialize `rows` into an xlsx workbook
pub fn build_workbook(rows: &[ExportRow], layout: &ExportLayout) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(&layout.sheet_name)?;

    let headers = [&layout.id_header, &layout.name_header, &layout.votes_header];
    for (col, title) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, title.as_str(), &header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_number(r, 0, row.id)?;
        sheet.write_string(r, 1, row.name.as_str())?;
        sheet.write_number(r, 2, row.votes)?;
    }
    sheet.set_column_width(1, 24)?;

    let bytes = workbook.save_to_buffer()?;
    info!("[EXPORT] Built workbook with {} rows ({} bytes)", rows.len(), bytes.len());
    Ok(bytes)
}
