use anyhow::Error;
use roster_config::ConfigError;
use roster_core::CoreError;
use roster_store::error::{StoreError, StoreErrorKind};
use roster_sync::error::SyncError;
use std::error::Error as StdError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

/// Non-zero process statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Exit {
    Failure = 1,
    NotFound = 2,
    InvalidInput = 3,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    eprintln!("error: {}", err);
    if verbose {
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {}", cause);
        }
    }
}

/// First cause in the chain that maps to a known status wins.
pub fn exit_code_for(err: &Error) -> ExitCode {
    err.chain()
        .find_map(classify)
        .unwrap_or(Exit::Failure)
        .into()
}

fn classify(cause: &(dyn StdError + 'static)) -> Option<Exit> {
    if let Some(err) = cause.downcast_ref::<CliError>() {
        return Some(err.exit());
    }
    if let Some(err) = cause.downcast_ref::<StoreError>() {
        return Some(err.exit());
    }
    if let Some(err) = cause.downcast_ref::<ConfigError>() {
        return Some(err.exit());
    }
    if let Some(err) = cause.downcast_ref::<SyncError>() {
        return Some(err.exit());
    }
    cause
        .downcast_ref::<CoreError>()
        .map(|_| Exit::InvalidInput)
}

trait Classify {
    fn exit(&self) -> Exit;
}

impl Classify for CliError {
    fn exit(&self) -> Exit {
        match self {
            CliError::InvalidInput(_) => Exit::InvalidInput,
            CliError::NotFound(_) => Exit::NotFound,
        }
    }
}

impl Classify for StoreError {
    fn exit(&self) -> Exit {
        match self.kind() {
            StoreErrorKind::NotFound => Exit::NotFound,
            StoreErrorKind::InvalidInput | StoreErrorKind::Conflict => Exit::InvalidInput,
            StoreErrorKind::Storage => Exit::Failure,
        }
    }
}

impl Classify for ConfigError {
    fn exit(&self) -> Exit {
        match self {
            ConfigError::MissingHomeDir => Exit::Failure,
            _ => Exit::InvalidInput,
        }
    }
}

impl Classify for SyncError {
    fn exit(&self) -> Exit {
        match self {
            SyncError::MissingWorkbook(_) => Exit::NotFound,
            SyncError::MissingSheet { .. } | SyncError::Core(_) => Exit::InvalidInput,
            // The sink's own error decides, e.g. an unknown instructor.
            SyncError::Sink(inner) => inner
                .downcast_ref::<StoreError>()
                .map(Classify::exit)
                .unwrap_or(Exit::Failure),
            SyncError::Workbook { .. } | SyncError::Io(_) => Exit::Failure,
        }
    }
}
