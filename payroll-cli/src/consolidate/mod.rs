//! Payroll consolidation
//!
//! Reads every client workbook in the input folder, maps their columns onto
//! the canonical template, drops rows without a RUT, keeps one record per RUT
//! and writes the result as a single template workbook.

pub mod excel;
pub mod pipeline;
pub mod report;
pub mod transform;
pub mod types;

pub use pipeline::Consolidator;
pub use report::{ConsolidationReport, RunOutcome, SkippedFile, UnmappedHeader};
pub use transform::DuplicatePolicy;
pub use types::*;
