mod handler;

use std::path::PathBuf;

use clap::Args;

pub use handler::handle_inspect_command;

#[derive(Args, Debug)]
pub struct InspectCommands {
    /// Workbook to inspect
    pub file: PathBuf,
}
