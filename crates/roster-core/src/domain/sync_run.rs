use crate::domain::ids::SyncRunId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Drop and recreate the directory tables, then bulk insert.
    Reload,
    /// Insert new emails and refine names of existing ones.
    Upsert,
}

impl SyncMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::Reload => "reload",
            SyncMode::Upsert => "upsert",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SyncMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reload" => Ok(SyncMode::Reload),
            "upsert" => Ok(SyncMode::Upsert),
            _ => Err(CoreError::UnknownSyncMode(s.to_string())),
        }
    }
}

/// What a sink did with one batch of candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

impl SyncOutcome {
    pub fn processed(&self) -> usize {
        self.created + self.updated + self.unchanged + self.skipped
    }

    pub fn changed(&self) -> bool {
        self.created > 0 || self.updated > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRun {
    pub id: SyncRunId,
    pub mode: SyncMode,
    pub source: String,
    pub started_at: i64,
    pub finished_at: i64,
    pub outcome: SyncOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_mode_parses_case_insensitively() {
        assert_eq!("Upsert".parse::<SyncMode>().unwrap(), SyncMode::Upsert);
        assert_eq!(" reload ".parse::<SyncMode>().unwrap(), SyncMode::Reload);
        assert!("merge".parse::<SyncMode>().is_err());
    }

    #[test]
    fn outcome_counts_processed_rows() {
        let outcome = SyncOutcome {
            created: 2,
            updated: 1,
            unchanged: 3,
            skipped: 1,
        };
        assert_eq!(outcome.processed(), 7);
        assert!(outcome.changed());
        assert!(!SyncOutcome::default().changed());
    }
}
