mod url;

pub use self::url::{normalize_url, validate_url};
