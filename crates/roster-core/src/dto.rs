use crate::domain::{InstructorId, SyncMode, SyncOutcome};
use crate::extract::ExtractReport;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntryDto {
    pub id: InstructorId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailListDto {
    pub emails: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReportDto {
    pub mode: SyncMode,
    pub source: String,
    pub dry_run: bool,
    pub candidates: usize,
    pub extract: ExtractReport,
    pub outcome: SyncOutcome,
}
