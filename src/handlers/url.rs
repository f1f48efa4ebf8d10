use actix_web::{
    cookie::Cookie,
    error::JsonPayloadError,
    http::header::{ContentType, LOCATION},
    web, HttpRequest, HttpResponse, Responder,
};
use log::{debug, info, warn};

use crate::{
    errors::{AppError, ServiceError},
    models::{CreateUrlDto, UrlResponseDto},
    services::{UrlServiceTrait, UrlServiceType},
    types::{HomePayload, SuccessEnvelope},
};

type Result<T> = std::result::Result<T, AppError>;

/// Cookie carrying the anonymous creator identity
const USER_ID_COOKIE: &str = "user_id";

const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Link not found</title></head>
<body>
<h1>404</h1>
<p>This short link does not exist or has been removed.</p>
</body>
</html>
"#;

fn user_id_from(req: &HttpRequest) -> Option<String> {
    req.cookie(USER_ID_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Turns malformed request bodies into the API error envelope
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected body for {} {}: {}", req.method(), req.path(), err);
    AppError::Serialization("error while parsing json".to_string()).into()
}

/// Landing handler
pub async fn home_handler(
    req: HttpRequest,
    service: web::Data<UrlServiceType>,
) -> Result<impl Responder> {
    let recent_urls = match user_id_from(&req) {
        Some(user_id) => service
            .find_recent_urls(&user_id)
            .await?
            .into_iter()
            .map(UrlResponseDto::from)
            .collect(),
        None => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(HomePayload {
        status: 200,
        message: String::from("Send a POST to /api/v1/url/create to shorten a URL"),
        recent_urls,
    }))
}

/// Create short URL handler
///
/// The creator's `user_id` cookie is reused, or issued with the response.
pub async fn create_handler(
    req: HttpRequest,
    dto: web::Json<CreateUrlDto>,
    service: web::Data<UrlServiceType>,
) -> Result<impl Responder> {
    let record = service
        .create_new_url(dto.into_inner(), user_id_from(&req))
        .await?;

    let mut response = HttpResponse::Created();
    if let Some(user_id) = record.user_id.clone() {
        response.cookie(
            Cookie::build(USER_ID_COOKIE, user_id)
                .path("/")
                .http_only(true)
                .finish(),
        );
    }

    Ok(response.json(SuccessEnvelope::created(UrlResponseDto::from(record))))
}

/// List all URLs handler
pub async fn get_all_handler(service: web::Data<UrlServiceType>) -> Result<impl Responder> {
    let urls: Vec<UrlResponseDto> = service
        .find_all_urls()
        .await?
        .into_iter()
        .map(UrlResponseDto::from)
        .collect();
    Ok(HttpResponse::Ok().json(SuccessEnvelope::ok(urls)))
}

/// Delete URL handler
pub async fn delete_handler(
    id: web::Path<String>,
    service: web::Data<UrlServiceType>,
) -> Result<impl Responder> {
    let id = id
        .parse::<i64>()
        .map_err(|_| AppError::Validation("url id isn't valid".to_string()))?;

    let record = service.delete_by_id(id).await?;
    Ok(HttpResponse::Ok().json(SuccessEnvelope::ok(UrlResponseDto::from(record))))
}

// Lookup first, then count the click; the redirect is only sent once both succeed
async fn follow_short_code(
    short_code: &str,
    service: &UrlServiceType,
) -> std::result::Result<HttpResponse, ServiceError> {
    debug!("Redirect requested for code: {}", short_code);

    let url = service.find_url_by_short(short_code).await.map_err(|e| {
        warn!("Lookup for code '{}' failed: {}", short_code, e);
        e
    })?;

    service.increment_click_count(url.id).await?;

    info!("Redirecting '{}' to '{}'", short_code, url.original_url);
    Ok(HttpResponse::TemporaryRedirect()
        .insert_header((LOCATION, url.original_url))
        .finish())
}

/// Redirect handler for the API scope
pub async fn redirect_handler(
    path: web::Path<String>,
    service: web::Data<UrlServiceType>,
) -> Result<impl Responder> {
    Ok(follow_short_code(&path.into_inner(), &service).await?)
}

/// Public short link handler
///
/// Unknown codes get an HTML page instead of the JSON envelope.
pub async fn short_link_handler(
    path: web::Path<String>,
    service: web::Data<UrlServiceType>,
) -> Result<HttpResponse> {
    match follow_short_code(&path.into_inner(), &service).await {
        Ok(response) => Ok(response),
        Err(ServiceError::NotFound(_)) => Ok(HttpResponse::NotFound()
            .insert_header(ContentType::html())
            .body(NOT_FOUND_PAGE)),
        Err(e) => Err(e.into()),
    }
}
