use actix_web::{error, web, HttpRequest, HttpResponse, Responder};
use log::warn;
use serde_json::json;

use crate::models::recommendation::RecommendationRequest;
use crate::services::recommendation_service::RecommendationService;

/// Request bodies above this size are rejected by the framework.
pub const JSON_BODY_LIMIT: usize = 1024 * 1024;

/*
    /recommendations, /api/gemini-recommendations
*/
pub async fn recommend(
    service: web::Data<RecommendationService>,
    input: web::Json<RecommendationRequest>,
) -> impl Responder {
    let request = input.into_inner();
    let response = service.recommend(&request).await;
    HttpResponse::Ok().json(response)
}

/// JSON extractor settings: size limit plus a JSON error body for unreadable requests.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, req: &HttpRequest| {
            warn!("Rejected request body on {}: {}", req.path(), err);
            let body = json!({ "success": false, "error": err.to_string() });
            error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        })
}
