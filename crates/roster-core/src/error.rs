use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("last name is required")]
    EmptyLastName,
    #[error("invalid email: {0}")]
    InvalidEmail(String),
    #[error("invalid domain: {0}")]
    InvalidDomain(String),
    #[error("invalid sheet layout: {0}")]
    InvalidLayout(String),
    #[error("unknown sync mode: {0}")]
    UnknownSyncMode(String),
}
