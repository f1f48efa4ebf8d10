use std::time::Instant;

use actix_cors::Cors;
use actix_web::{http::Method, middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{debug, info};

use crate::{
    config::{Config, Environment},
    db::Database,
    errors::AppError,
    middleware::RequestLogger,
    routes, services,
    types::AppState,
};

// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;

// Setup logging based on the deployment environment
fn setup_logging(config: &Config) -> AppResult<()> {
    let log_level = match config.app.environment {
        Environment::Development => config.app.log_level.clone(),
        Environment::Testing => "debug,actix_web=info,sqlx=warn".to_string(),
        Environment::Production => "info,actix_web=warn,sqlx=warn".to_string(),
    };

    let env = Env::default()
        .filter_or("RUST_LOG", log_level)
        .write_style_or("RUST_LOG_STYLE", "always");

    env_logger::try_init_from_env(env)
        .map_err(|e| AppError::Logger(format!("Failed to initialize logger: {}", e)))
}

// API responses carry a wildcard origin
fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec![Method::GET, Method::POST, Method::DELETE])
        .allow_any_header()
        .max_age(3600)
}

pub async fn server() -> AppResult<()> {
    let config = Config::load()?;
    setup_logging(&config)?;

    let start_time = Instant::now();

    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {:?}", config.app.environment);
    info!(
        "Short codes: length {}..{}, max attempts {}, request timeout {}s",
        config.shortener.min_code_length,
        config.shortener.max_code_length,
        config.shortener.max_attempts,
        config.shortener.request_timeout_seconds
    );
    info!(
        "Binding to {}:{} with {} workers",
        config.server.host, config.server.port, config.server.workers
    );

    if config.app.environment == Environment::Development {
        debug!("Full configuration: {:?}", config);
    }

    let db = Database::connect(&config.db).await?;

    // Shared by every worker
    let url_service = web::Data::new(services::build(db.clone(), config.shortener.clone()));
    let app_state = web::Data::new(AppState {
        start_time,
        db: db.clone(),
        version: config.app.version.clone(),
    });

    let enable_debug_logging = config.app.environment != Environment::Production;

    let log_format = if enable_debug_logging {
        "%a \"%r\" %s %b %T \"%{Referer}i\" \"%{User-Agent}i\" %{X-Request-ID}o"
    } else {
        "%a \"%r\" %s %b %T"
    };

    let result = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(url_service.clone())
            .wrap(cors())
            .wrap(Logger::new(log_format))
            .wrap(RequestLogger::new(enable_debug_logging))
            .configure(routes::configure_routes)
    })
    .workers(config.server.workers)
    .bind((config.server.host.to_string(), config.server.port))?
    .run()
    .await;

    db.shutdown().await;
    result?;

    Ok(())
}
