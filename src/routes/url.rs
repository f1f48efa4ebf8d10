use actix_web::web;

use crate::handlers::{
    create_handler, delete_handler, get_all_handler, json_error_handler, redirect_handler,
};

// Configure the short URL API
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/url")
            // Bodies are parsed as JSON whatever their declared content type
            .app_data(
                web::JsonConfig::default()
                    .content_type(|_| true)
                    .content_type_required(false)
                    .error_handler(json_error_handler),
            )
            .route("", web::get().to(get_all_handler))
            .route("/", web::get().to(get_all_handler))
            .route("/create", web::post().to(create_handler))
            // Numeric ids and short codes share one path segment; the method decides
            .service(
                web::resource("/{key}")
                    .route(web::get().to(redirect_handler))
                    .route(web::delete().to(delete_handler)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{
        http::{header, StatusCode},
        test, App,
    };
    use serde_json::{json, Value};

    use super::*;
    use crate::{
        config::ShortenerConfig,
        errors::RepositoryError,
        repositories::{InMemoryUrlRepository, MockUrlRepositoryTrait, UrlRepositoryTrait},
        services::{UrlService, UrlServiceType},
    };

    fn test_service() -> web::Data<UrlServiceType> {
        let repository: Arc<dyn UrlRepositoryTrait> = Arc::new(InMemoryUrlRepository::new());
        web::Data::new(UrlService::new(repository, ShortenerConfig::default()))
    }

    fn failing_service() -> web::Data<UrlServiceType> {
        let mut repo = MockUrlRepositoryTrait::new();
        repo.expect_find_all()
            .returning(|| Err(RepositoryError::Database(sqlx::Error::PoolClosed)));
        repo.expect_find_by_short_code().returning(|_| Ok(None));
        repo.expect_insert()
            .returning(|_| Err(RepositoryError::Database(sqlx::Error::PoolClosed)));

        let repository: Arc<dyn UrlRepositoryTrait> = Arc::new(repo);
        web::Data::new(UrlService::new(repository, ShortenerConfig::default()))
    }

    macro_rules! test_app {
        ($service:expr) => {
            test::init_service(
                App::new()
                    .app_data($service.clone())
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn create_returns_normalized_record() {
        let service = test_service();
        let app = test_app!(service);

        let req = test::TestRequest::post()
            .uri("/api/v1/url/create")
            .set_json(json!({ "url": "www.example.com/path" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status_code"], 201);
        assert_eq!(body["data"]["url"], "https://www.example.com/path");
        assert_eq!(body["data"]["click_count"], 0);
        let code = body["data"]["short_url"].as_str().unwrap();
        assert!((5..8).contains(&code.len()));
    }

    #[actix_web::test]
    async fn json_body_is_accepted_whatever_its_content_type() {
        let service = test_service();
        let app = test_app!(service);

        let req = test::TestRequest::post()
            .uri("/api/v1/url/create")
            .insert_header((header::CONTENT_TYPE, "text/plain;charset=UTF-8"))
            .set_payload(r#"{"url":"www.example.com/path"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["url"], "https://www.example.com/path");

        let req = test::TestRequest::post()
            .uri("/api/v1/url/create")
            .set_payload(r#"{"url":"example.org"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn storage_failures_are_bad_gateway() {
        let service = failing_service();
        let app = test_app!(service);

        let req = test::TestRequest::get().uri("/api/v1/url/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status_code"], 502);
        assert_eq!(body["status"], "Bad Gateway");
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::post()
            .uri("/api/v1/url/create")
            .set_json(json!({ "url": "example.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status_code"], 502);
    }

    #[actix_web::test]
    async fn empty_url_is_a_bad_request() {
        let service = test_service();
        let app = test_app!(service);

        let req = test::TestRequest::post()
            .uri("/api/v1/url/create")
            .set_json(json!({ "url": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status_code"], 400);
        assert!(body["errors"][0].as_str().unwrap().contains("empty"));
    }

    #[actix_web::test]
    async fn malformed_json_is_a_bad_request() {
        let service = test_service();
        let app = test_app!(service);

        let req = test::TestRequest::post()
            .uri("/api/v1/url/create")
            .insert_header(header::ContentType::json())
            .set_payload("{\"url\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"][0], "error while parsing json");
    }

    #[actix_web::test]
    async fn redirect_counts_the_click() {
        let service = test_service();
        let app = test_app!(service);

        let req = test::TestRequest::post()
            .uri("/api/v1/url/create")
            .set_json(json!({ "url": "example.com/landing" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let code = created["data"]["short_url"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/url/{}", code))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "https://example.com/landing"
        );

        let req = test::TestRequest::get().uri("/api/v1/url/").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed["status_code"], 200);
        assert_eq!(listed["data"][0]["short_url"], code.as_str());
        assert_eq!(listed["data"][0]["click_count"], 1);
    }

    #[actix_web::test]
    async fn unknown_code_is_not_found() {
        let service = test_service();
        let app = test_app!(service);

        let req = test::TestRequest::get().uri("/api/v1/url/zzzzz").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_returns_the_removed_record() {
        let service = test_service();
        let app = test_app!(service);

        let req = test::TestRequest::post()
            .uri("/api/v1/url/create")
            .set_json(json!({ "url": "example.com" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/url/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let deleted: Value = test::read_body_json(resp).await;
        assert_eq!(deleted["data"], created["data"]);

        let req = test::TestRequest::get().uri("/api/v1/url/").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed["data"], json!([]));
    }

    #[actix_web::test]
    async fn deleting_unknown_id_is_not_found() {
        let service = test_service();
        let app = test_app!(service);

        let req = test::TestRequest::delete().uri("/api/v1/url/999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "Not Found");
    }

    #[actix_web::test]
    async fn non_numeric_id_is_rejected() {
        let service = test_service();
        let app = test_app!(service);

        let req = test::TestRequest::delete().uri("/api/v1/url/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"][0], "url id isn't valid");
    }

    #[actix_web::test]
    async fn listing_without_trailing_slash_works() {
        let service = test_service();
        let app = test_app!(service);

        let req = test::TestRequest::get().uri("/api/v1/url").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
