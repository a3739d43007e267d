//! Consolidate command handler

use std::process::ExitCode;

use anyhow::Result;
use colored::*;

use super::ConsolidateCommands;
use crate::config::Config;
use crate::consolidate::{
    ConsolidationReport, Consolidator, RunOutcome, SkippedFile, UnmappedHeader,
};

/// Exit code when there was nothing usable to consolidate
const EXIT_NO_INPUT: u8 = 2;

/// Handle the consolidate command
pub fn handle_consolidate_command(args: ConsolidateCommands, mut config: Config) -> Result<ExitCode> {
    if let Some(input) = args.input {
        config.input_dir = input;
    }
    if let Some(output) = args.output {
        config.output_file = output;
    }

    let consolidator = Consolidator::new(config)?;
    let input_dir = consolidator.config().input_dir.clone();
    let extension = consolidator.config().extension();

    println!(
        "Consolidating workbooks from: {}",
        input_dir.display().to_string().cyan()
    );

    match consolidator.run()? {
        RunOutcome::InputFolderCreated(path) => {
            println!(
                "Created input folder {}.",
                path.display().to_string().bright_green()
            );
            println!("Copy the client .{} files into it and run again.", extension);
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::NoEligibleFiles { skipped } => {
            print_skipped(&skipped);
            println!(
                "{} No .{} files found in {}. No output written.",
                "Error:".bright_red().bold(),
                extension,
                input_dir.display()
            );
            Ok(ExitCode::from(EXIT_NO_INPUT))
        }
        RunOutcome::NoReadableSources { skipped } => {
            print_skipped(&skipped);
            println!(
                "{} None of the workbooks in {} could be read. No output written.",
                "Error:".bright_red().bold(),
                input_dir.display()
            );
            Ok(ExitCode::from(EXIT_NO_INPUT))
        }
        RunOutcome::Completed(report) => {
            print_report(&report);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_skipped(skipped: &[SkippedFile]) {
    for file in skipped {
        println!(
            "{} {} skipped: {}",
            "Warning:".yellow().bold(),
            file.path.display(),
            file.reason.describe()
        );
    }
}

fn print_unmapped(headers: &[UnmappedHeader], values: usize) {
    if headers.is_empty() {
        return;
    }

    println!();
    println!(
        "Columns not in the template ({} value(s) ignored):",
        values
    );
    for header in headers {
        println!(
            "  {} {}",
            header.header.dimmed(),
            format!("({} / {})", header.file, header.sheet).dimmed()
        );
    }
}

fn print_report(report: &ConsolidationReport) {
    print_skipped(&report.skipped_files);
    print_unmapped(&report.unmapped_headers, report.unmapped_values);

    println!();
    println!("Workbooks read:       {}", report.files_read);
    println!(
        "Sheets read:          {} ({} empty)",
        report.sheets_read, report.empty_sheets
    );
    println!("Rows read:            {}", report.rows_seen);
    if report.rows_skipped > 0 {
        println!(
            "Rows without RUT:     {}",
            report.rows_skipped.to_string().yellow()
        );
    } else {
        println!("Rows without RUT:     0");
    }
    println!("Duplicates dropped:   {}", report.duplicates_dropped);
    println!();

    if report.rows_written == 0 {
        println!(
            "{} No rows had a RUT; wrote an empty template to {}",
            "Warning:".yellow().bold(),
            report.output_path.display()
        );
    } else {
        println!(
            "Saved {} user(s) to {}",
            report.rows_written.to_string().bright_green().bold(),
            report.output_path.display().to_string().bright_green()
        );
    }
}
