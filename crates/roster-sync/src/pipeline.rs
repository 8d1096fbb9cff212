use crate::error::{Result, SyncError};
use crate::workbook::read_sheet;
use roster_core::domain::SyncOutcome;
use roster_core::extract::{extract_candidates, ExtractOptions, ExtractReport, Extraction};
use roster_core::InstructorSink;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct WorkbookSource {
    pub path: PathBuf,
    pub sheet: String,
}

impl WorkbookSource {
    pub fn new(path: impl Into<PathBuf>, sheet: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet: sheet.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub candidates: usize,
    pub extract: ExtractReport,
    pub outcome: SyncOutcome,
    pub applied: bool,
}

pub fn extract_workbook(source: &WorkbookSource, options: &ExtractOptions) -> Result<Extraction> {
    let grid = read_sheet(source.path(), &source.sheet)?;
    Ok(extract_candidates(&grid, options))
}

/// Reads the sheet, extracts candidates and hands them to `sink` in one batch.
///
/// A sheet without any header pair never reaches the sink, so a reload
/// cannot wipe the directory because of a renamed column.
pub fn sync_workbook<S>(
    source: &WorkbookSource,
    options: &ExtractOptions,
    sink: &mut S,
) -> Result<SyncReport>
where
    S: InstructorSink,
{
    let extraction = extract_workbook(source, options)?;
    if extraction.report.blocks == 0 {
        return Ok(SyncReport {
            candidates: 0,
            extract: extraction.report,
            outcome: SyncOutcome::default(),
            applied: false,
        });
    }
    let outcome = sink
        .apply(&extraction.records)
        .map_err(|err| SyncError::Sink(Box::new(err)))?;
    Ok(SyncReport {
        candidates: extraction.records.len(),
        extract: extraction.report,
        outcome,
        applied: true,
    })
}
