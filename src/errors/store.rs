use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Admin with this email already exists")]
    DuplicateEmail(String),

    #[error("Unknown roster column: {0}")]
    UnknownField(String),

    #[error("Roster header is missing column: {0}")]
    MissingColumn(String),

    #[error("Roster file header {found:?} does not match configured columns {expected:?}")]
    HeaderMismatch { expected: String, found: String },

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
