//! Inspect command handler

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::*;

use super::InspectCommands;
use crate::config::Config;
use crate::consolidate::excel::{SourceSheet, read_workbook};
use crate::consolidate::transform::{NameMode, SheetLayout};
use crate::services::aliases::AliasResolver;

/// Show how each header of a workbook resolves, sheet by sheet
pub fn handle_inspect_command(args: InspectCommands, config: &Config) -> Result<ExitCode> {
    let resolver = AliasResolver::with_custom(&config.custom_aliases()?);
    let mut stdout = std::io::stdout().lock();
    inspect_workbook(&args.file, &resolver, &mut stdout)?;
    Ok(ExitCode::SUCCESS)
}

fn inspect_workbook(path: &Path, resolver: &AliasResolver, out: &mut impl Write) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    let sheets =
        read_workbook(path).with_context(|| format!("Failed to inspect {}", path.display()))?;

    for sheet in &sheets {
        write_sheet(sheet, resolver, out)?;
    }
    Ok(())
}

fn write_sheet(sheet: &SourceSheet, resolver: &AliasResolver, out: &mut impl Write) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Sheet {} ({} data rows)",
        sheet.name.bright_green().bold(),
        sheet.rows.len()
    )?;

    if sheet.is_empty() {
        writeln!(out, "  {}", "empty, will be skipped".dimmed())?;
        return Ok(());
    }

    let layout = SheetLayout::resolve(&sheet.headers, resolver);
    for column in layout.columns() {
        if column.header.trim().is_empty() {
            continue;
        }
        let resolution = match column.matched {
            Some(m) if column.duplicate => {
                format!("{} (duplicate, ignored)", m.field.label()).yellow()
            }
            Some(m) => format!("{} {}", m.field.label(), m.kind.label()).normal(),
            None => "unmapped".dimmed(),
        };
        writeln!(
            out,
            "  {:>3}  {:<30} -> {}",
            column.index + 1,
            column.header,
            resolution
        )?;
    }

    let names = match layout.name_mode() {
        NameMode::Discrete => "separate given-name / surname columns".to_string(),
        NameMode::Combined(col) => format!(
            "split from '{}'",
            sheet.headers.get(col).map(String::as_str).unwrap_or("")
        ),
        NameMode::None => "no name columns".to_string(),
    };
    writeln!(out, "  names: {}", names)?;

    if !layout.has_rut() {
        writeln!(
            out,
            "  {} no RUT column, every row will be skipped",
            "Warning:".yellow().bold()
        )?;
    }
    Ok(())
}
