use actix_web::{web, HttpResponse, Responder};

mod url;

use crate::{
    db::DBHealthStatus,
    handlers::{home_handler, short_link_handler},
    types::{AppState, HealthStatus},
};

// Handler function for the health check endpoint
async fn health_check(data: web::Data<AppState>) -> impl Responder {
    let db_health = data.db.health_check().await;
    let uptime = data.start_time.elapsed().as_secs();

    let healthy = matches!(db_health.status, DBHealthStatus::Healthy);

    let status = HealthStatus {
        status: String::from(if healthy { "OK" } else { "DEGRADED" }),
        version: data.version.clone(),
        db_health: Some(db_health),
        uptime_seconds: uptime,
    };

    if healthy {
        HttpResponse::Ok().json(status)
    } else {
        HttpResponse::ServiceUnavailable().json(status)
    }
}

// Configure all routes function
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home_handler));
    cfg.route("/health", web::get().to(health_check));
    url::configure_routes(cfg);
    // Public short links; a single segment never reaches the API scope
    cfg.route("/{short}", web::get().to(short_link_handler));
}
