//! Invocation status returned to the Lambda runtime
//!
//! Existing callers only understand three strings, so every error kind other
//! than an empty event collapses into the generic failure.

use crate::error::ThumbnailError;
use std::fmt;

pub const STATUS_OK: &str = "OK";
pub const STATUS_EMPTY_EVENT: &str = "Erro: Evento S3 vazio.";
pub const STATUS_FAILED: &str = "Erro";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationOutcome {
    Ok,
    EmptyNotification,
    Failed,
}

impl InvocationOutcome {
    pub fn from_result<T>(result: &Result<T, ThumbnailError>) -> Self {
        match result {
            Ok(_) => InvocationOutcome::Ok,
            Err(ThumbnailError::EmptyNotification) => InvocationOutcome::EmptyNotification,
            Err(_) => InvocationOutcome::Failed,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            InvocationOutcome::Ok => STATUS_OK,
            InvocationOutcome::EmptyNotification => STATUS_EMPTY_EVENT,
            InvocationOutcome::Failed => STATUS_FAILED,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, InvocationOutcome::Ok)
    }
}

impl fmt::Display for InvocationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
