// Error taxonomy for the roster service, built on thiserror.
use axum::http::StatusCode;
use thiserror::Error;

pub mod response;
pub mod store;

pub use store::{StoreError, StoreResult};

#[derive(Error, Debug)]
pub enum AppError {
    // Body could not be read or parsed as an admin payload
    #[error("{1}")]
    Payload(StatusCode, String),

    #[error("Cross-site request rejected")]
    Forbidden,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type AppResult<T> = Result<T, AppError>;
