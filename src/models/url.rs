use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validations::validate_url;

/// Request body for creating a short URL
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUrlDto {
    #[validate(custom(function = "validate_url"))]
    pub url: String,
}

/// A persisted short URL
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct UrlRecord {
    /// Store-assigned identifier
    pub id: i64,

    /// Normalized target the short code redirects to
    pub original_url: String,

    /// Public alias, unique among live records
    pub short_code: String,

    /// Number of successful redirects
    pub click_count: i64,

    /// Seconds since the Unix epoch
    pub created_at: i64,

    /// Anonymous creator identity; rows from before it was tracked have none
    pub user_id: Option<String>,
}

/// Fields the service supplies when inserting a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub short_code: String,
    pub created_at: i64,
    pub user_id: String,
}

// DTO for responses with URL details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlResponseDto {
    pub id: i64,
    pub url: String,
    pub short_url: String,
    pub click_count: i64,
    pub created_at: i64,
}

impl From<UrlRecord> for UrlResponseDto {
    fn from(record: UrlRecord) -> Self {
        UrlResponseDto {
            id: record.id,
            url: record.original_url,
            short_url: record.short_code,
            click_count: record.click_count,
            created_at: record.created_at,
        }
    }
}
