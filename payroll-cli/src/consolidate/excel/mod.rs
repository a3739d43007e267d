//! Excel import of client workbooks and export of the consolidated template

mod reader;
mod writer;

pub use reader::{SourceSheet, read_workbook};
pub use writer::write_consolidated_excel;
