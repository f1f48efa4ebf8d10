// src/repositories/url.rs - Data access
use async_trait::async_trait;
use log::{debug, error};
use sqlx::PgPool;

use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::{NewUrlRecord, UrlRecord};

type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepositoryTrait: Send + Sync {
    /// Inserts a new URL record
    ///
    /// ### Returns
    /// * `Result<i64>` - The id assigned by the store
    ///
    /// ### Errors
    /// * `RepositoryError::Database` - If a database error occurs
    /// * `RepositoryError::InvalidData` - If the record violates a column constraint
    async fn insert(&self, record: &NewUrlRecord) -> Result<i64>;

    /// Finds a URL record by its short code
    ///
    /// ### Returns
    /// * `Result<Option<UrlRecord>>` - The record if found, or `None`
    ///
    /// ### Errors
    /// * `RepositoryError::Database` - If a database error occurs
    async fn find_by_short_code(&self, code: &str) -> Result<Option<UrlRecord>>;

    /// Finds a URL record by its id
    ///
    /// ### Returns
    /// * `Result<Option<UrlRecord>>` - The record if found, or `None`
    ///
    /// ### Errors
    /// * `RepositoryError::Database` - If a database error occurs
    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>>;

    /// Lists every URL record, ordered by id
    async fn find_all(&self) -> Result<Vec<UrlRecord>>;

    /// Lists the newest records created by one user, newest first
    ///
    /// ### Returns
    /// * `Result<Vec<UrlRecord>>` - At most `limit` records; empty for unknown users
    ///
    /// ### Errors
    /// * `RepositoryError::Database` - If a database error occurs
    async fn find_recent_by_user(&self, user_id: &str, limit: i64) -> Result<Vec<UrlRecord>>;

    /// Deletes a URL record by id
    ///
    /// ### Returns
    /// * `Result<i64>` - The id of the deleted record
    ///
    /// ### Errors
    /// * `RepositoryError::NotFound` - If no record has this id
    /// * `RepositoryError::Database` - If a database error occurs
    async fn delete_by_id(&self, id: i64) -> Result<i64>;

    /// Adds one to the click count in a single statement
    ///
    /// ### Returns
    /// * `Result<i64>` - The click count after the increment
    ///
    /// ### Errors
    /// * `RepositoryError::NotFound` - If no record has this id
    /// * `RepositoryError::Database` - If a database error occurs
    async fn increment_click_count(&self, id: i64) -> Result<i64>;
}

// Postgres-backed implementation
pub struct UrlRepository {
    pool: PgPool,
}

impl UrlRepository {
    pub fn new(db: Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

#[async_trait]
impl UrlRepositoryTrait for UrlRepository {
    async fn insert(&self, record: &NewUrlRecord) -> Result<i64> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO urls (original_url, short_code, created_at, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&record.original_url)
        .bind(&record.short_code)
        .bind(record.created_at)
        .bind(&record.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to insert url record: {}", e);
            RepositoryError::from(e)
        })?;

        debug!("Inserted url record {} with code '{}'", id, record.short_code);
        Ok(id)
    }

    async fn find_by_short_code(&self, code: &str) -> Result<Option<UrlRecord>> {
        sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, original_url, short_code, click_count, created_at, user_id
            FROM urls
            WHERE short_code = $1
            LIMIT 1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>> {
        sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, original_url, short_code, click_count, created_at, user_id
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::Database)
    }

    async fn find_all(&self) -> Result<Vec<UrlRecord>> {
        let records = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, original_url, short_code, click_count, created_at, user_id
            FROM urls
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find_recent_by_user(&self, user_id: &str, limit: i64) -> Result<Vec<UrlRecord>> {
        let records = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, original_url, short_code, click_count, created_at, user_id
            FROM urls
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} recent url(s) for user '{}'", records.len(), user_id);
        Ok(records)
    }

    async fn delete_by_id(&self, id: i64) -> Result<i64> {
        let result = sqlx::query("DELETE FROM urls WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::Database)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "url with id {} not found",
                id
            )));
        }

        debug!("Deleted url record {}", id);
        Ok(id)
    }

    async fn increment_click_count(&self, id: i64) -> Result<i64> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE urls
            SET click_count = click_count + 1
            WHERE id = $1
            RETURNING click_count
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::Database)?;

        row.map(|(count,)| count)
            .ok_or_else(|| RepositoryError::NotFound(format!("url with id {} not found", id)))
    }
}
