use std::sync::Arc;

mod url;

pub use self::url::{UrlService, UrlServiceTrait};

use crate::{
    config::ShortenerConfig,
    db::Database,
    repositories::{UrlRepository, UrlRepositoryTrait},
};

/// The service type handlers receive, independent of the storage backend
pub type UrlServiceType = UrlService<dyn UrlRepositoryTrait>;

/// Builds the URL service on top of the Postgres repository
pub fn build(db: Database, settings: ShortenerConfig) -> UrlServiceType {
    let repository: Arc<dyn UrlRepositoryTrait> = Arc::new(UrlRepository::new(db));
    UrlService::new(repository, settings)
}
