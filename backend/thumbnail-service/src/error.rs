//! Error types for the thumbnail pipeline
//!
//! Every step returns a typed `ThumbnailError`; the Lambda boundary collapses
//! it into the coarse `InvocationOutcome` string.

use s3_utils::StorageError;
use thiserror::Error;

/// Result type for thumbnail pipeline operations
pub type Result<T> = std::result::Result<T, ThumbnailError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailError {
    #[error("S3 event has no records")]
    EmptyNotification,

    #[error("Invalid S3 event payload: {0}")]
    InvalidNotification(String),

    #[error("Malformed object key {key:?}: {reason}")]
    MalformedIdentifier { key: String, reason: String },

    #[error("Object not found: {bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },

    #[error("Storage read error: {0}")]
    StorageRead(StorageError),

    #[error("Unsupported or corrupt image: {0}")]
    UnsupportedImageFormat(String),

    #[error("Failed to encode JPEG thumbnail: {0}")]
    ThumbnailEncode(String),

    #[error("Storage write error: {0}")]
    StorageWrite(StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ThumbnailError {
    /// Map a failed read into the fetch-side taxonomy
    pub fn from_read(error: StorageError) -> Self {
        match error {
            StorageError::NotFound { bucket, key } => ThumbnailError::ObjectNotFound { bucket, key },
            other => ThumbnailError::StorageRead(other),
        }
    }

    /// Map a failed write into the publish-side taxonomy
    pub fn from_write(error: StorageError) -> Self {
        ThumbnailError::StorageWrite(error)
    }

    /// Whether a host-level retry could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ThumbnailError::StorageRead(e) | ThumbnailError::StorageWrite(e) => e.is_transient(),
            ThumbnailError::Internal(_) => true,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ThumbnailError {
    fn from(err: serde_json::Error) -> Self {
        ThumbnailError::InvalidNotification(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_object_not_found() {
        let err = ThumbnailError::from_read(StorageError::NotFound {
            bucket: "uploads".to_string(),
            key: "a.png".to_string(),
        });
        assert_eq!(
            err,
            ThumbnailError::ObjectNotFound {
                bucket: "uploads".to_string(),
                key: "a.png".to_string(),
            }
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_transient_write_is_retryable() {
        let err = ThumbnailError::from_write(StorageError::Write {
            bucket: "thumbs".to_string(),
            key: "thumb-a.png".to_string(),
            message: "timeout".to_string(),
            transient: true,
        });
        assert!(err.is_retryable());
        assert!(err.to_string().contains("thumbs/thumb-a.png"));
    }

    #[test]
    fn test_decode_failures_are_not_retryable() {
        assert!(!ThumbnailError::UnsupportedImageFormat("bad magic".into()).is_retryable());
        assert!(!ThumbnailError::EmptyNotification.is_retryable());
    }
}
