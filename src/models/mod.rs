mod url;

pub use self::url::{CreateUrlDto, NewUrlRecord, UrlRecord, UrlResponseDto};
