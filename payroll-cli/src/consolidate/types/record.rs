//! Raw and canonical records, and the consolidated table

use std::collections::BTreeMap;

use super::{CellValue, Field};

/// Where a record came from (1-based sheet row number)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOrigin {
    pub file: String,
    pub sheet: String,
    pub row: usize,
}

impl std::fmt::Display for RecordOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} / row {}", self.file, self.sheet, self.row)
    }
}

/// One data row of one sheet, cells aligned with the sheet headers
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub origin: RecordOrigin,
    pub cells: Vec<(String, CellValue)>,
}

impl RawRecord {
    pub fn new(origin: RecordOrigin, cells: Vec<(String, CellValue)>) -> Self {
        Self { origin, cells }
    }

    /// Cell at a column index, `Empty` past the end of a short row
    pub fn cell(&self, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(col).map(|(_, value)| value).unwrap_or(&EMPTY)
    }

    /// Check if every cell in the row is blank
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.is_blank())
    }
}

/// A normalized row with a valid RUT. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    origin: RecordOrigin,
    rut: String,
    fields: BTreeMap<Field, String>,
    unmapped: Vec<(String, String)>,
}

impl CanonicalRecord {
    /// Build a record. Empty field values are not stored; the RUT is
    /// stored under `Field::Rut` as well.
    pub fn new(
        origin: RecordOrigin,
        rut: String,
        fields: BTreeMap<Field, String>,
        unmapped: Vec<(String, String)>,
    ) -> Self {
        let mut fields: BTreeMap<Field, String> = fields
            .into_iter()
            .filter(|(field, value)| field.is_output() && !value.is_empty())
            .collect();
        fields.insert(Field::Rut, rut.clone());

        Self {
            origin,
            rut,
            fields,
            unmapped,
        }
    }

    pub fn origin(&self) -> &RecordOrigin {
        &self.origin
    }

    pub fn rut(&self) -> &str {
        &self.rut
    }

    /// Value of an output field, empty when absent
    pub fn get(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Columns the alias table did not recognize, as (header, value)
    pub fn unmapped(&self) -> &[(String, String)] {
        &self.unmapped
    }

    /// Values in template order
    pub fn output_row(&self) -> Vec<&str> {
        Field::OUTPUT.iter().map(|field| self.get(*field)).collect()
    }
}

/// Deduplicated records, one per RUT
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsolidatedTable {
    records: Vec<CanonicalRecord>,
}

impl ConsolidatedTable {
    /// Wrap records that are already unique by RUT
    pub(crate) fn from_unique(records: Vec<CanonicalRecord>) -> Self {
        Self { records }
    }

    pub fn header() -> Vec<&'static str> {
        Field::OUTPUT.iter().map(|field| field.label()).collect()
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub fn find(&self, rut: &str) -> Option<&CanonicalRecord> {
        self.records.iter().find(|r| r.rut() == rut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> RecordOrigin {
        RecordOrigin {
            file: "a.xlsx".to_string(),
            sheet: "Hoja1".to_string(),
            row: 2,
        }
    }

    #[test]
    fn test_canonical_record_drops_intermediate_and_empty_fields() {
        let mut fields = BTreeMap::new();
        fields.insert(Field::Email, "ana@example.cl".to_string());
        fields.insert(Field::Phone, String::new());
        fields.insert(Field::WorkplaceCode, "101".to_string());

        let record = CanonicalRecord::new(origin(), "1-9".to_string(), fields, Vec::new());

        assert_eq!(record.get(Field::Rut), "1-9");
        assert_eq!(record.get(Field::Email), "ana@example.cl");
        assert_eq!(record.get(Field::Phone), "");
        assert_eq!(record.get(Field::WorkplaceCode), "");

        let row = record.output_row();
        assert_eq!(row.len(), Field::OUTPUT.len());
        assert_eq!(row[2], "1-9");
        assert_eq!(row[3], "ana@example.cl");
    }

    #[test]
    fn test_short_row_reads_empty() {
        let raw = RawRecord::new(origin(), vec![("rut".to_string(), CellValue::from("1-9"))]);
        assert_eq!(raw.cell(0), &CellValue::from("1-9"));
        assert_eq!(raw.cell(5), &CellValue::Empty);
        assert!(!raw.is_blank());
    }
}
