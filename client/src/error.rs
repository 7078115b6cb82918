//! Application error handling
//!
//! Unified error type for the client data layer. Screens surface
//! `user_message()` in alerts; `code()` labels errors in logs.

use crate::persist::StorageError;
use thiserror::Error;
use tracing::error;

/// Client error type covering validation, account, and storage failures
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// Stable machine-readable code for logging and telemetry
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Unauthorized(_) => "UNAUTHORIZED",
            ClientError::Conflict(_) => "CONFLICT",
            ClientError::Storage(_) => "STORAGE_ERROR",
            ClientError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message suitable for showing in a UI alert
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(msg)
            | ClientError::Unauthorized(msg)
            | ClientError::Conflict(msg) => msg.clone(),
            ClientError::Storage(err) => {
                error!("Storage error: {:?}", err);
                "Could not save your data".to_string()
            }
            ClientError::Internal(err) => {
                error!("Internal error: {:?}", err);
                "Something went wrong".to_string()
            }
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
