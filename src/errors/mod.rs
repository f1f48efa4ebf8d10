use std::io::Error as IoError;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

pub mod config;
pub mod repository;
pub mod service;

pub use config::ConfigError;
pub use repository::RepositoryError;
pub use service::ServiceError;

use crate::{db::DatabaseError, types::ErrorEnvelope};

#[derive(Debug, Error)]
pub enum AppError {
    // Request-level errors
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Not found error: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Timeout error: {0}")]
    Timeout(String),
    // Infrastructure/system errors
    #[error("Server error: {0}")]
    Server(#[from] IoError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Logger error: {0}")]
    Logger(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// The human readable part of the error, without its category prefix
    pub fn message(&self) -> String {
        let error_string = self.to_string();
        let message = error_string
            .split_once(':')
            .map(|(_, m)| m.trim())
            .unwrap_or_default();

        if message.is_empty() {
            "An error occurred".to_string()
        } else {
            message.to_string()
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<DatabaseError> for AppError {
    fn from(e: DatabaseError) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::NotFound(msg) => AppError::NotFound(msg),
            ServiceError::Storage(msg) => AppError::Storage(msg),
            ServiceError::Timeout(secs) => {
                AppError::Timeout(format!("operation exceeded {} seconds", secs))
            }
            ServiceError::CodeExhausted(attempts) => AppError::Storage(format!(
                "no unused short code found after {} attempts",
                attempts
            )),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Serialization(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Storage(_) => StatusCode::BAD_GATEWAY,
            AppError::Server(_)
            | AppError::Config(_)
            | AppError::Logger(_)
            | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorEnvelope::new(status, vec![self.message()]))
    }
}
