use actix_web::{HttpResponse, Responder};
use serde::Serialize;

#[derive(Serialize)]
struct HealthStatus {
    ok: bool,
}

/*
    /health, /api/health
*/
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus { ok: true })
}
