use actix_web::web;

pub mod health;
pub mod recommendations;

/// Register every route. Shared by the server binary and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(recommendations::json_config())
        .route("/health", web::get().to(health::health_check))
        .route("/recommendations", web::post().to(recommendations::recommend))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .route(
                    "/gemini-recommendations",
                    web::post().to(recommendations::recommend),
                ),
        );
}
