//! Storage error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Failed to read {bucket}/{key}: {message}")]
    Read {
        bucket: String,
        key: String,
        message: String,
        transient: bool,
    },

    #[error("Failed to write {bucket}/{key}: {message}")]
    Write {
        bucket: String,
        key: String,
        message: String,
        transient: bool,
    },

    #[error("Invalid S3 configuration: {0}")]
    InvalidConfig(String),
}

impl StorageError {
    /// Whether the failure looks like a timeout, dispatch failure or 5xx
    pub fn is_transient(&self) -> bool {
        match self {
            StorageError::Read { transient, .. } | StorageError::Write { transient, .. } => {
                *transient
            }
            StorageError::NotFound { .. } | StorageError::InvalidConfig(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
