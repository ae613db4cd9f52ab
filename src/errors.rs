use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for domain, service, and storage layers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Integration error: {0}")]
    Integration(String),
    #[error("Goal not found: {0}")]
    GoalNotFound(Uuid),
}

pub type Result<T> = StdResult<T, CoreError>;

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}
