// src/services/url.rs - Business logic
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use validator::Validate;

use crate::config::ShortenerConfig;
use crate::errors::ServiceError;
use crate::models::{CreateUrlDto, NewUrlRecord, UrlRecord};
use crate::repositories::UrlRepositoryTrait;
use crate::utils::id_generator;
use crate::validations::normalize_url;

type Result<T> = std::result::Result<T, ServiceError>;

/// How many of a user's links the home page lists
pub const RECENT_URLS_LIMIT: i64 = 5;

#[async_trait]
pub trait UrlServiceTrait {
    /// Validates, normalizes and stores a URL under a fresh short code.
    ///
    /// The record belongs to `user_id`; a missing or malformed id is replaced
    /// by a newly issued one, returned in the record.
    async fn create_new_url(
        &self,
        dto: CreateUrlDto,
        user_id: Option<String>,
    ) -> Result<UrlRecord>;
    /// Looks up a record by short code without touching its click count
    async fn find_url_by_short(&self, code: &str) -> Result<UrlRecord>;
    async fn find_all_urls(&self) -> Result<Vec<UrlRecord>>;
    /// Newest records created by `user_id`, at most `RECENT_URLS_LIMIT`
    async fn find_recent_urls(&self, user_id: &str) -> Result<Vec<UrlRecord>>;
    /// Deletes a record and returns it as it was just before deletion
    async fn delete_by_id(&self, id: i64) -> Result<UrlRecord>;
    async fn increment_click_count(&self, id: i64) -> Result<()>;
}

pub struct UrlService<T: UrlRepositoryTrait + ?Sized> {
    repository: Arc<T>,
    settings: ShortenerConfig,
}

impl<T: UrlRepositoryTrait + ?Sized> UrlService<T> {
    pub fn new(repository: Arc<T>, settings: ShortenerConfig) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Runs `operation` under the configured request deadline.
    ///
    /// On expiry the operation future is dropped, which cancels any storage
    /// call still in flight.
    async fn with_deadline<F, R>(&self, operation: F) -> Result<R>
    where
        F: Future<Output = Result<R>> + Send,
    {
        tokio::time::timeout(self.settings.request_timeout(), operation)
            .await
            .map_err(|_| {
                warn!(
                    "Operation exceeded the {}s deadline",
                    self.settings.request_timeout_seconds
                );
                ServiceError::Timeout(self.settings.request_timeout_seconds)
            })?
    }

    fn generate_code(&self) -> String {
        id_generator::generate_short_code(
            self.settings.min_code_length,
            self.settings.max_code_length,
        )
    }

    /// Draws candidates until the store reports one as unused.
    ///
    /// A candidate is accepted only when the lookup succeeds with no match;
    /// an existing record or a failed lookup both lead to a new draw.
    async fn resolve_unique_code(&self) -> Result<String> {
        let max_attempts = self.settings.max_attempts;
        let mut attempts: u32 = 0;

        loop {
            let candidate = self.generate_code();
            attempts = attempts.saturating_add(1);

            match self.repository.find_by_short_code(&candidate).await {
                Ok(None) => {
                    debug!("Accepted short code '{}' after {} attempt(s)", candidate, attempts);
                    return Ok(candidate);
                }
                Ok(Some(_)) => debug!("Short code '{}' is taken, retrying", candidate),
                Err(e) => warn!("Lookup for short code '{}' failed, retrying: {}", candidate, e),
            }

            if max_attempts != 0 && attempts >= max_attempts {
                warn!("Gave up resolving a short code after {} attempts", attempts);
                return Err(ServiceError::CodeExhausted(attempts));
            }
        }
    }

    async fn create(&self, dto: CreateUrlDto, user_id: Option<String>) -> Result<UrlRecord> {
        dto.validate()?;

        let original_url = normalize_url(&dto.url);
        let short_code = self.resolve_unique_code().await?;

        let user_id = match user_id {
            Some(id) if id_generator::is_valid_user_id(&id) => id,
            Some(id) => {
                debug!("Ignoring malformed user id '{}'", id);
                id_generator::generate_user_id()
            }
            None => id_generator::generate_user_id(),
        };

        let new_record = NewUrlRecord {
            original_url,
            short_code,
            created_at: Utc::now().timestamp(),
            user_id,
        };

        let id = self
            .repository
            .insert(&new_record)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        // Read back so the caller sees what the store actually holds
        let record = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?
            .ok_or_else(|| {
                ServiceError::Storage(format!("url with id {} vanished after insert", id))
            })?;

        info!(
            "Created short code '{}' for '{}'",
            record.short_code, record.original_url
        );
        Ok(record)
    }

    async fn find_by_short(&self, code: &str) -> Result<UrlRecord> {
        self.repository
            .find_by_short_code(code)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("url with short code '{}' not found", code)))
    }

    async fn find_all(&self) -> Result<Vec<UrlRecord>> {
        // Storage order; the Postgres store happens to sort by id
        Ok(self.repository.find_all().await?)
    }

    async fn find_recent(&self, user_id: &str) -> Result<Vec<UrlRecord>> {
        if !id_generator::is_valid_user_id(user_id) {
            return Ok(Vec::new());
        }
        Ok(self
            .repository
            .find_recent_by_user(user_id, RECENT_URLS_LIMIT)
            .await?)
    }

    async fn increment(&self, id: i64) -> Result<()> {
        let count = self.repository.increment_click_count(id).await?;
        debug!("Url {} now has {} click(s)", id, count);
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<UrlRecord> {
        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("url with id {} not found", id)))?;

        self.repository.delete_by_id(id).await?;
        info!("Deleted url {} ('{}')", id, record.short_code);

        Ok(record)
    }
}

#[async_trait]
impl<T: UrlRepositoryTrait + ?Sized> UrlServiceTrait for UrlService<T> {
    async fn create_new_url(
        &self,
        dto: CreateUrlDto,
        user_id: Option<String>,
    ) -> Result<UrlRecord> {
        self.with_deadline(self.create(dto, user_id)).await
    }

    async fn find_url_by_short(&self, code: &str) -> Result<UrlRecord> {
        self.with_deadline(self.find_by_short(code)).await
    }

    async fn find_all_urls(&self) -> Result<Vec<UrlRecord>> {
        self.with_deadline(self.find_all()).await
    }

    async fn find_recent_urls(&self, user_id: &str) -> Result<Vec<UrlRecord>> {
        self.with_deadline(self.find_recent(user_id)).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<UrlRecord> {
        self.with_deadline(self.delete(id)).await
    }

    async fn increment_click_count(&self, id: i64) -> Result<()> {
        self.with_deadline(self.increment(id)).await
    }
}
