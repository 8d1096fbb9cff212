//! Schema-on-read extraction of instructor rows from a spreadsheet grid.
//!
//! The sheet holds any number of side-by-side name/email column pairs under
//! a shared header row. Each located block is fanned through the same
//! normalization, and the merged output is deduplicated once at the end.

pub mod dedupe;
pub mod grid;
pub mod locate;
pub mod normalize;
pub mod pairs;

pub use dedupe::dedupe;
pub use grid::{Cell, Grid};
pub use locate::{locate_blocks, Block};
pub use normalize::{normalize_pair, DropReason, NormalizedPair, MISSING_NAME_PLACEHOLDER};
pub use pairs::{extract_pairs, RawPair};

use crate::domain::email::normalize_domain;
use crate::domain::instructor::CandidateRecord;
use crate::error::CoreError;
use serde::Serialize;

pub const DEFAULT_SHEET_NAME: &str = "Instructor Email Addresses";
pub const DEFAULT_NAME_HEADER: &str = "Instructor Name";
pub const DEFAULT_EMAIL_HEADER: &str = "Instructor Email Addresses";
/// One-indexed, as shown by spreadsheet applications.
pub const DEFAULT_HEADER_ROW: usize = 2;
pub const DEFAULT_DOMAIN: &str = "usf.edu";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub header_row: usize,
    pub name_header: String,
    pub email_header: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            header_row: DEFAULT_HEADER_ROW,
            name_header: DEFAULT_NAME_HEADER.to_string(),
            email_header: DEFAULT_EMAIL_HEADER.to_string(),
        }
    }
}

impl SheetLayout {
    pub fn new(header_row: usize, name_header: &str, email_header: &str) -> Result<Self, CoreError> {
        if header_row == 0 {
            return Err(CoreError::InvalidLayout(
                "header row is one-indexed".to_string(),
            ));
        }
        let name_header = name_header.trim();
        let email_header = email_header.trim();
        if name_header.is_empty() || email_header.is_empty() {
            return Err(CoreError::InvalidLayout(
                "header labels cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            header_row,
            name_header: name_header.to_string(),
            email_header: email_header.to_string(),
        })
    }

    pub fn header_index(&self) -> usize {
        self.header_row.saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub layout: SheetLayout,
    domain: String,
}

impl ExtractOptions {
    pub fn new(layout: SheetLayout, domain: &str) -> Result<Self, CoreError> {
        Ok(Self {
            layout,
            domain: normalize_domain(domain)?,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            layout: SheetLayout::default(),
            domain: DEFAULT_DOMAIN.to_string(),
        }
    }
}

/// Per-run counts for callers that want visibility into silent drops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    pub blocks: usize,
    pub rows_scanned: usize,
    pub dropped_empty: usize,
    pub dropped_foreign_domain: usize,
    pub dropped_placeholder: usize,
    pub duplicates: usize,
}

impl ExtractReport {
    fn record_drop(&mut self, reason: DropReason) {
        match reason {
            DropReason::Empty => self.dropped_empty += 1,
            DropReason::ForeignDomain => self.dropped_foreign_domain += 1,
            DropReason::Placeholder => self.dropped_placeholder += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<CandidateRecord>,
    pub report: ExtractReport,
}

pub fn extract_candidates(grid: &Grid, options: &ExtractOptions) -> Extraction {
    let blocks = locate_blocks(grid, &options.layout);
    let mut report = ExtractReport {
        blocks: blocks.len(),
        ..ExtractReport::default()
    };

    let mut records = Vec::new();
    for block in blocks {
        for pair in extract_pairs(grid, block, &options.layout) {
            report.rows_scanned += 1;
            match normalize_pair(&pair, options.domain()) {
                Ok(normalized) => records.push(CandidateRecord::from_display_name(
                    &normalized.name,
                    &normalized.email,
                )),
                Err(reason) => report.record_drop(reason),
            }
        }
    }

    let before = records.len();
    let records = dedupe(records);
    report.duplicates = before - records.len();

    Extraction { records, report }
}
