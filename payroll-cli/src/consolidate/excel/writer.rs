//! Write the consolidated table as the upload template

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::consolidate::ConsolidatedTable;

/// Write the table to a single-sheet workbook: header row in template
/// order, then one row per record. All values are written as text.
pub fn write_consolidated_excel(
    table: &ConsolidatedTable,
    path: &Path,
    sheet_name: &str,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name(sheet_name)?;

    let header_format = Format::new().set_bold();
    for (col, label) in ConsolidatedTable::header().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *label, &header_format)?;
    }

    for (row_idx, record) in table.records().iter().enumerate() {
        let row = (row_idx + 1) as u32;

        for (col, value) in record.output_row().iter().enumerate() {
            // Leave empty cells blank
            if !value.is_empty() {
                worksheet.write_string(row, col as u16, *value)?;
            }
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    log::info!("Consolidated template written to: {}", path.display());
    Ok(())
}
