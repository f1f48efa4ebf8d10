// In-process store used by service and route tests
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::RepositoryError;
use crate::models::{NewUrlRecord, UrlRecord};

use super::UrlRepositoryTrait;

type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: Vec<UrlRecord>,
}

#[derive(Default)]
pub struct InMemoryUrlRepository {
    table: Mutex<Table>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: i64) -> RepositoryError {
        RepositoryError::NotFound(format!("url with id {} not found", id))
    }
}

#[async_trait]
impl UrlRepositoryTrait for InMemoryUrlRepository {
    async fn insert(&self, record: &NewUrlRecord) -> Result<i64> {
        let mut table = self.table.lock().unwrap();
        table.next_id += 1;
        let id = table.next_id;
        table.rows.push(UrlRecord {
            id,
            original_url: record.original_url.clone(),
            short_code: record.short_code.clone(),
            click_count: 0,
            created_at: record.created_at,
            user_id: Some(record.user_id.clone()),
        });
        Ok(id)
    }

    async fn find_by_short_code(&self, code: &str) -> Result<Option<UrlRecord>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|r| r.short_code == code).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>> {
        let table = self.table.lock().unwrap();
        Ok(table.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<UrlRecord>> {
        Ok(self.table.lock().unwrap().rows.clone())
    }

    async fn find_recent_by_user(&self, user_id: &str, limit: i64) -> Result<Vec<UrlRecord>> {
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .iter()
            .rev()
            .filter(|r| r.user_id.as_deref() == Some(user_id))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<i64> {
        let mut table = self.table.lock().unwrap();
        let position = table
            .rows
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        table.rows.remove(position);
        Ok(id)
    }

    async fn increment_click_count(&self, id: i64) -> Result<i64> {
        let mut table = self.table.lock().unwrap();
        let row = table
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        row.click_count += 1;
        Ok(row.click_count)
    }
}
