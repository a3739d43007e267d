mod handler;

use std::path::PathBuf;

use clap::Args;

pub use handler::handle_consolidate_command;

#[derive(Args, Debug, Default)]
pub struct ConsolidateCommands {
    /// Folder holding the client workbooks
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Path of the consolidated template
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
