//! Cell value representation for client spreadsheets

use chrono::{NaiveDateTime, Timelike};

/// A single cell as read from a source sheet
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell, or a cell whose content could not be used
    #[default]
    Empty,
    /// Text value
    String(String),
    /// Whole number
    Int(i64),
    /// Floating point
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Date or date-time cell
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Check if this value carries no usable content
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the value as trimmed text, the form every canonical field uses
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::String(s) => s.trim().to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => format_float(*f),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(dt) => {
                if dt.time().num_seconds_from_midnight() == 0 {
                    dt.format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
        }
    }
}

/// Integral floats lose their fractional part so numeric RUTs and codes
/// read back the way they were typed.
fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => write!(f, "(empty)"),
            other => write!(f, "{}", other.to_text()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_float_rendering() {
        assert_eq!(CellValue::Float(12345678.0).to_text(), "12345678");
        assert_eq!(CellValue::Float(101.0).to_text(), "101");
        assert_eq!(CellValue::Float(1.5).to_text(), "1.5");
    }

    #[test]
    fn test_date_rendering() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        let midnight = date.and_hms_opt(0, 0, 0).unwrap();
        let afternoon = date.and_hms_opt(14, 30, 0).unwrap();

        assert_eq!(CellValue::DateTime(midnight).to_text(), "2021-03-01");
        assert_eq!(CellValue::DateTime(afternoon).to_text(), "2021-03-01 14:30:00");
    }

    #[test]
    fn test_blank_detection() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::from("   ").is_blank());
        assert!(!CellValue::Int(0).is_blank());
        assert_eq!(CellValue::from("  texto ").to_text(), "texto");
    }
}
