use thiserror::Error;

use super::RepositoryError;

/// Error type for URL service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The submitted URL (or identifier) was rejected
    #[error("Validation error: {0}")]
    Validation(String),

    /// No record matches the requested id or short code
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store failed to persist or return data
    #[error("Storage error: {0}")]
    Storage(String),

    /// The uniqueness resolver gave up after the configured number of attempts
    #[error("Storage error: no unused short code found after {0} attempts")]
    CodeExhausted(u32),

    /// The operation did not finish before its deadline
    #[error("Timeout: operation exceeded {0} seconds")]
    Timeout(u64),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::InvalidData(msg) => Self::Validation(msg),
            RepositoryError::Conflict(msg) => Self::Storage(msg),
            RepositoryError::Database(err) => Self::Storage(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Only the reasons are kept; every message already names its field
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .map(|e| {
                e.message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect::<Vec<_>>()
            .join("; ");
        ServiceError::Validation(message)
    }
}
