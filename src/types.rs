use std::time::Instant;

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{
    db::{Database, DatabaseHealth},
    models::UrlResponseDto,
};

/// Landing payload; lists the caller's latest links when their cookie is known
#[derive(Serialize, Deserialize)]
pub struct HomePayload {
    pub status: i32,
    pub message: String,
    pub recent_urls: Vec<UrlResponseDto>,
}

#[derive(Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub db_health: Option<DatabaseHealth>,
    pub uptime_seconds: u64,
}

/// Body of every successful API response
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    pub status_code: u16,
    pub status: String,
    pub data: T,
}

impl<T: Serialize> SuccessEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            status: "Success".to_string(),
            data,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status_code: StatusCode::CREATED.as_u16(),
            status: "Success Created".to_string(),
            data,
        }
    }
}

/// Body of every failed API response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub status_code: u16,
    pub status: String,
    pub errors: Vec<String>,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, errors: Vec<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            status: status.canonical_reason().unwrap_or("Error").to_string(),
            errors,
        }
    }
}

// Shared application state
pub struct AppState {
    pub start_time: Instant,
    pub db: Database,
    pub version: String,
}
