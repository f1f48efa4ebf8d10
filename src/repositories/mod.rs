#[cfg(test)]
mod memory;
mod url;

#[cfg(test)]
pub use memory::InMemoryUrlRepository;
#[cfg(test)]
pub use self::url::MockUrlRepositoryTrait;
pub use self::url::{UrlRepository, UrlRepositoryTrait};
