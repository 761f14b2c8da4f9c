use actix_web::{web, App};
use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};

use journey_planner_api::error::{RecommendationError, Result};
use journey_planner_api::models::gemini::GenerateContentRequest;
use journey_planner_api::routes;
use journey_planner_api::services::gemini_client::{
    CredentialSlots, GeminiClient, GenerationTransport, UpstreamReply,
};
use journey_planner_api::services::recommendation_service::RecommendationService;

/// Upstream stand-in that answers from a script and records each call.
#[derive(Default)]
pub struct ScriptedUpstream {
    replies: Mutex<Vec<Result<UpstreamReply>>>,
    calls: Mutex<Vec<(String, GenerateContentRequest)>>,
}

impl ScriptedUpstream {
    pub fn new(replies: Vec<Result<UpstreamReply>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn keys_used(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(key, _)| key.clone()).collect()
    }

    pub fn requests(&self) -> Vec<GenerateContentRequest> {
        self.calls.lock().unwrap().iter().map(|(_, body)| body.clone()).collect()
    }
}

#[async_trait]
impl GenerationTransport for ScriptedUpstream {
    async fn post_generate(&self, api_key: &str, body: &GenerateContentRequest) -> Result<UpstreamReply> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.to_string(), body.clone()));

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            Err(RecommendationError::Transport("connection refused".to_string()))
        } else {
            replies.remove(0)
        }
    }
}

pub fn model_reply(text: &str) -> Result<UpstreamReply> {
    Ok(UpstreamReply {
        status: 200,
        body: json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
        })
        .to_string(),
    })
}

pub fn status_reply(status: u16) -> Result<UpstreamReply> {
    Ok(UpstreamReply {
        status,
        body: json!({ "error": { "code": status, "message": "rejected" } }).to_string(),
    })
}

pub fn timeout() -> Result<UpstreamReply> {
    Err(RecommendationError::Transport("request timed out".to_string()))
}

pub struct TestApp {
    pub upstream: Arc<ScriptedUpstream>,
    pub service: web::Data<RecommendationService>,
}

impl TestApp {
    pub fn new(keys: &[Option<&str>], replies: Vec<Result<UpstreamReply>>) -> Self {
        let upstream = ScriptedUpstream::new(replies);
        let slots = CredentialSlots::new(keys.iter().map(|k| k.map(str::to_string)).collect());
        let client = GeminiClient::new(upstream.clone(), slots);

        Self {
            upstream,
            service: web::Data::new(RecommendationService::new(client, "gemini-test")),
        }
    }

    pub fn create_app(&self) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.service.clone())
            .configure(routes::configure)
    }
}
