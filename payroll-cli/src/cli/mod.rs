//! Command-line interface

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::consolidate::ConsolidateCommands;
use commands::inspect::InspectCommands;

#[derive(Parser, Debug)]
#[command(name = "payroll-cli")]
#[command(about = "Consolidate client payroll workbooks into the upload template", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ./payroll.toml, then the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Consolidate every workbook in the input folder (default)
    Consolidate(ConsolidateCommands),
    /// Show the effective header alias table
    Aliases,
    /// Show how the headers of one workbook resolve
    Inspect(InspectCommands),
}
