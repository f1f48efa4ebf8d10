use std::sync::LazyLock;

use regex::Regex;
use url::Url;
use validator::ValidationError;

/// Host with at least one dot, optional http(s) scheme, then a path/query/fragment tail.
/// Word characters are ASCII only.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i:https?://)?[A-Za-z0-9_.-]+(?:\.[A-Za-z0-9_.-]+)+[A-Za-z0-9_\-.~:/?#\[\]@!$&'()*+,;=]+$",
    )
    .expect("URL pattern is a valid regex")
});

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Checks that a submitted URL is non-empty and looks like a web address
pub fn validate_url(url_str: &str) -> Result<(), ValidationError> {
    if url_str.is_empty() {
        return Err(validation_error("url_empty", "url shouldn't be empty"));
    }

    if !URL_PATTERN.is_match(url_str) {
        return Err(validation_error("url_malformed", "url isn't valid"));
    }

    // The pattern is permissive; the normalized form must also be a real URL with a host
    match Url::parse(&normalize_url(url_str)) {
        Ok(url) if url.host().is_some() => Ok(()),
        _ => Err(validation_error("url_malformed", "url isn't valid")),
    }
}

/// Prefixes `https://` when the URL carries no http(s) scheme
pub fn normalize_url(url_str: &str) -> String {
    if has_http_scheme(url_str) {
        url_str.to_string()
    } else {
        format!("https://{}", url_str)
    }
}

fn has_http_scheme(url_str: &str) -> bool {
    let lower = url_str
        .get(..8)
        .unwrap_or(url_str)
        .to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}
