use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info, warn};

use journey_planner_api::config::AppConfig;
use journey_planner_api::routes;
use journey_planner_api::services::recommendation_service::RecommendationService;

fn cors_for(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    info!("Application starting...");

    let config = AppConfig::from_env().map_err(|e| {
        error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    if config.configured_key_count() == 0 {
        warn!("No Gemini API keys configured; every request will use local suggestions");
    } else {
        info!("{} Gemini API key slot(s) configured", config.configured_key_count());
    }

    let service = RecommendationService::from_config(&config).map_err(|e| {
        error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    let service = web::Data::new(service);

    let origins = config.frontend_origins.clone();
    info!("Attempting to bind to {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_for(&origins))
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
