use roster_core::{CoreError, InstructorId};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("invalid backup path (matches database): {0}")]
    InvalidBackupPath(PathBuf),
    #[error("schema version {found} is newer than supported version {supported}")]
    SchemaTooNew { found: i64, supported: i64 },
    #[error("migration {version} failed: {message}")]
    Migration { version: i64, message: String },
    #[error("instructor {0} does not exist")]
    UnknownInstructor(InstructorId),
    #[error("instructor email already present: {0}")]
    DuplicateEmail(String),
    #[error("corrupt sync run id: {0}")]
    CorruptRunId(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Coarse grouping callers use to decide how to surface a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    NotFound,
    InvalidInput,
    Conflict,
    Storage,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::UnknownInstructor(_) => StoreErrorKind::NotFound,
            StoreError::Core(_)
            | StoreError::InvalidDataPath(_)
            | StoreError::InvalidBackupPath(_) => StoreErrorKind::InvalidInput,
            StoreError::DuplicateEmail(_) | StoreError::SchemaTooNew { .. } => {
                StoreErrorKind::Conflict
            }
            StoreError::Io(_)
            | StoreError::Sql(_)
            | StoreError::MissingHomeDir
            | StoreError::Migration { .. }
            | StoreError::CorruptRunId(_) => StoreErrorKind::Storage,
        }
    }
}
