//! Read client workbooks into raw records

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::consolidate::{CellValue, RawRecord, RecordOrigin};

/// One sheet of a source workbook
#[derive(Debug, Clone)]
pub struct SourceSheet {
    pub file: String,
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl SourceSheet {
    /// A sheet needs a header row and at least one data row to be useful
    pub fn is_empty(&self) -> bool {
        self.headers.iter().all(|h| h.trim().is_empty()) || self.rows.is_empty()
    }
}

/// Read every sheet of an `.xlsx` workbook, in workbook order.
///
/// The first row of each sheet's used range is the header row.
pub fn read_workbook(path: &Path) -> Result<Vec<SourceSheet>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let mut sheets = Vec::new();
    for sheet_name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

        // Used range may start below row 1
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header) => header.iter().map(header_text).collect(),
            None => Vec::new(),
        };

        let records = rows
            .enumerate()
            .map(|(idx, row)| {
                let cells = headers
                    .iter()
                    .enumerate()
                    .map(|(col, header)| {
                        let value = row.get(col).map(cell_value).unwrap_or_default();
                        (header.clone(), value)
                    })
                    .collect();
                RawRecord::new(
                    RecordOrigin {
                        file: file.clone(),
                        sheet: sheet_name.clone(),
                        // +1 for the header row, +1 for 1-based numbering
                        row: first_row + idx + 2,
                    },
                    cells,
                )
            })
            .collect();

        sheets.push(SourceSheet {
            file: file.clone(),
            name: sheet_name,
            headers,
            rows: records,
        });
    }

    Ok(sheets)
}

/// Header cells are rendered the same way as values
fn header_text(cell: &Data) -> String {
    cell_value(cell).to_text()
}

pub(crate) fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                CellValue::Float(dt.as_f64())
            } else {
                excel_serial_to_datetime(dt.as_f64())
                    .map(CellValue::DateTime)
                    .unwrap_or(CellValue::Float(dt.as_f64()))
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
    }
}

/// Convert an Excel serial date (1900 system) to a date-time
fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    // Serial 0 is 1899-12-30 once the 1900 leap-year bug is accounted for
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * 86_400.0).round() as i64;
    epoch.checked_add_signed(TimeDelta::try_seconds(seconds)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_dates() {
        let date = excel_serial_to_datetime(44256.0).unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2021-03-01");

        let with_time = excel_serial_to_datetime(44256.5).unwrap();
        assert_eq!(with_time.format("%H:%M").to_string(), "12:00");

        assert_eq!(excel_serial_to_datetime(-1.0), None);
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(cell_value(&Data::String("  ".to_string())), CellValue::Empty);
        assert_eq!(cell_value(&Data::Float(12345678.0)).to_text(), "12345678");
        assert_eq!(cell_value(&Data::Int(101)).to_text(), "101");
        assert_eq!(
            cell_value(&Data::String("Ana".to_string())),
            CellValue::String("Ana".to_string())
        );
    }
}
