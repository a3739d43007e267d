//! Run outcome and summary statistics

use std::path::PathBuf;

/// Why a file in the input folder was not processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Extension other than the accepted workbook type
    UnsupportedFileType,
    /// Office lock file (`~$name.xlsx`) left by an open workbook
    TemporaryFile,
    /// Workbook could not be opened or read
    Unreadable(String),
}

impl SkipReason {
    /// Operator-facing explanation
    pub fn describe(&self) -> String {
        match self {
            SkipReason::UnsupportedFileType => {
                "unsupported file type (convert it to .xlsx first)".to_string()
            }
            SkipReason::TemporaryFile => "temporary lock file of an open workbook".to_string(),
            SkipReason::Unreadable(detail) => format!("could not be read ({})", detail),
        }
    }
}

/// A file that was skipped, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// A header no alias recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmappedHeader {
    pub file: String,
    pub sheet: String,
    pub header: String,
}

/// Summary of a completed consolidation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidationReport {
    pub files_read: usize,
    pub sheets_read: usize,
    pub empty_sheets: usize,
    pub rows_seen: usize,
    /// Rows dropped for a missing or placeholder RUT
    pub rows_skipped: usize,
    pub duplicates_dropped: usize,
    /// Non-empty values of accepted rows that sat in unmapped columns
    pub unmapped_values: usize,
    pub rows_written: usize,
    pub skipped_files: Vec<SkippedFile>,
    pub unmapped_headers: Vec<UnmappedHeader>,
    pub output_path: PathBuf,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Input folder was missing and has been created; nothing processed
    InputFolderCreated(PathBuf),
    /// Input folder holds no eligible workbooks; no output written
    NoEligibleFiles { skipped: Vec<SkippedFile> },
    /// Eligible workbooks existed but none could be read; no output written
    NoReadableSources { skipped: Vec<SkippedFile> },
    /// Output written
    Completed(ConsolidationReport),
}
