mod cli;
mod config;
mod consolidate;
mod services;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use cli::commands::aliases::handle_aliases_command;
use cli::commands::consolidate::{ConsolidateCommands, handle_consolidate_command};
use cli::commands::inspect::handle_inspect_command;
use config::Config;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        None => handle_consolidate_command(ConsolidateCommands::default(), config),
        Some(Commands::Consolidate(args)) => handle_consolidate_command(args, config),
        Some(Commands::Aliases) => handle_aliases_command(&config),
        Some(Commands::Inspect(args)) => handle_inspect_command(args, &config),
    }
}

/// RUST_LOG wins over the -v flags when set
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
