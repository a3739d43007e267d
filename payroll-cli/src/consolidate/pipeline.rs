//! Consolidation pipeline
//!
//! Source discovery, workbook reading, row normalization, deduplication and
//! template export, run as one synchronous pass over the input folder.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::services::aliases::AliasResolver;

use super::excel::{SourceSheet, read_workbook, write_consolidated_excel};
use super::report::{
    ConsolidationReport, RunOutcome, SkipReason, SkippedFile, UnmappedHeader,
};
use super::transform::{
    HeuristicNameSplitter, NameSplitter, RowOutcome, SheetLayout, deduplicate, normalize_row,
};
use super::ConsolidatedTable;

/// Office writes `~$name.xlsx` next to a workbook while it is open
const LOCK_FILE_PREFIX: &str = "~$";

/// Runs a consolidation with a fixed config, alias table and name splitter
pub struct Consolidator {
    config: Config,
    resolver: AliasResolver,
    splitter: Box<dyn NameSplitter>,
}

impl Consolidator {
    pub fn new(config: Config) -> Result<Self> {
        let resolver = AliasResolver::with_custom(&config.custom_aliases()?);
        Ok(Self {
            config,
            resolver,
            splitter: Box::new(HeuristicNameSplitter),
        })
    }

    /// Replace the name-splitting heuristic
    #[cfg(test)]
    pub fn with_splitter(mut self, splitter: Box<dyn NameSplitter>) -> Self {
        self.splitter = splitter;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole pipeline against the configured input folder
    pub fn run(&self) -> Result<RunOutcome> {
        let input_dir = &self.config.input_dir;

        if !input_dir.exists() {
            std::fs::create_dir_all(input_dir).with_context(|| {
                format!("Failed to create input folder: {}", input_dir.display())
            })?;
            log::info!("Created input folder {}", input_dir.display());
            return Ok(RunOutcome::InputFolderCreated(input_dir.clone()));
        }

        let (sources, mut skipped) = discover_sources(input_dir, &self.config.extension())?;
        if sources.is_empty() {
            return Ok(RunOutcome::NoEligibleFiles { skipped });
        }

        log::info!("Processing {} workbook(s)", sources.len());

        let mut report = ConsolidationReport::default();
        let mut sheets = Vec::new();
        for path in &sources {
            log::info!("Reading workbook: {}", path.display());
            match read_workbook(path) {
                Ok(workbook_sheets) => {
                    report.files_read += 1;
                    sheets.extend(workbook_sheets);
                }
                Err(err) => {
                    log::warn!("Skipping {}: {:#}", path.display(), err);
                    skipped.push(SkippedFile {
                        path: path.clone(),
                        reason: SkipReason::Unreadable(root_cause(&err)),
                    });
                }
            }
        }

        if report.files_read == 0 {
            return Ok(RunOutcome::NoReadableSources { skipped });
        }

        let table = self.consolidate_sheets(&sheets, &mut report);
        if table.is_empty() {
            log::warn!("No row carried a RUT; writing a header-only template");
        }

        write_consolidated_excel(&table, &self.config.output_file, &self.config.output_sheet)?;

        report.rows_written = table.len();
        report.skipped_files = skipped;
        report.output_path = self.config.output_file.clone();

        Ok(RunOutcome::Completed(report))
    }

    /// Normalize and deduplicate already-loaded sheets.
    ///
    /// Sheets must be in traversal order. Sheet and row counters are added
    /// to `report`.
    pub fn consolidate_sheets(
        &self,
        sheets: &[SourceSheet],
        report: &mut ConsolidationReport,
    ) -> ConsolidatedTable {
        let mut records = Vec::new();

        for sheet in sheets {
            if sheet.is_empty() {
                log::debug!("Skipping empty sheet '{}' in {}", sheet.name, sheet.file);
                report.empty_sheets += 1;
                continue;
            }

            report.sheets_read += 1;
            log::info!(
                "Processing sheet '{}' of {} ({} rows)",
                sheet.name,
                sheet.file,
                sheet.rows.len()
            );

            let layout = SheetLayout::resolve(&sheet.headers, &self.resolver);
            if !layout.has_rut() {
                log::warn!(
                    "Sheet '{}' of {} has no RUT column; its rows will be skipped",
                    sheet.name,
                    sheet.file
                );
            }

            for header in layout.unmapped_headers() {
                report.unmapped_headers.push(UnmappedHeader {
                    file: sheet.file.clone(),
                    sheet: sheet.name.clone(),
                    header: header.to_string(),
                });
            }

            for raw in &sheet.rows {
                match normalize_row(&layout, raw, self.splitter.as_ref()) {
                    RowOutcome::Accepted(record) => {
                        report.rows_seen += 1;
                        report.unmapped_values += record
                            .unmapped()
                            .iter()
                            .filter(|(_, value)| !value.is_empty())
                            .count();
                        records.push(record);
                    }
                    RowOutcome::MissingRut => {
                        report.rows_seen += 1;
                        report.rows_skipped += 1;
                        log::debug!("Row without RUT skipped at {}", raw.origin);
                    }
                    RowOutcome::Blank => {}
                }
            }
        }

        let deduplicated = deduplicate(records, self.config.duplicate_policy);
        report.duplicates_dropped += deduplicated.duplicates_dropped;

        log::info!(
            "Consolidated {} unique RUT(s), {} duplicate(s) dropped ({})",
            deduplicated.table.len(),
            deduplicated.duplicates_dropped,
            self.config.duplicate_policy.label()
        );

        deduplicated.table
    }
}

/// List eligible workbooks in `dir`, sorted by file name.
///
/// Files with another extension and Office lock files are returned as
/// skipped. Subdirectories are ignored.
pub fn discover_sources(dir: &Path, extension: &str) -> Result<(Vec<PathBuf>, Vec<SkippedFile>)> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read input folder: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read input folder: {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut sources = Vec::new();
    let mut skipped = Vec::new();
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let matches_extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
            .unwrap_or(false);

        let reason = if name.starts_with(LOCK_FILE_PREFIX) {
            Some(SkipReason::TemporaryFile)
        } else if !matches_extension {
            Some(SkipReason::UnsupportedFileType)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                log::warn!("Skipping {}: {}", path.display(), reason.describe());
                skipped.push(SkippedFile { path, reason });
            }
            None => sources.push(path),
        }
    }

    Ok((sources, skipped))
}

/// Innermost error message, without the context chain
fn root_cause(err: &anyhow::Error) -> String {
    err.root_cause().to_string()
}
