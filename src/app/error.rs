use crate::domain::{AddressError, ValidationError};
use thiserror::Error;

/// Failure of a single provider operation. None of these are retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InvalidAddress(#[from] AddressError),

    #[error("{operation} is not supported for {address}")]
    UnsupportedOperation {
        operation: &'static str,
        address: String,
    },

    #[error("unknown column {0:?}")]
    UnknownColumn(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
