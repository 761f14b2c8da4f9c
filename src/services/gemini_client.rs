//! Gemini `generateContent` client with ordered API-key failover.
//!
//! Keys are tried one at a time in slot order. Empty slots are skipped without
//! a request, and a non-2xx status, transport error, or timeout moves on to the
//! next slot. The first successful body is returned; when every slot is spent
//! the caller gets `None` and decides what to do about it.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::{RecommendationError, Result};
use crate::models::gemini::GenerateContentRequest;

/// Status and body of one upstream reply, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One POST to the generation endpoint with a single key.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn post_generate(
        &self,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<UpstreamReply>;
}

/// `reqwest` transport against the real endpoint.
pub struct HttpTransport {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(api_base: &str, model_name: &str, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecommendationError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: format!(
                "{}/models/{}:generateContent",
                api_base.trim_end_matches('/'),
                model_name
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    async fn post_generate(
        &self,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<UpstreamReply> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(UpstreamReply { status, body })
    }
}

/// Ordered API-key slots. Absent and blank slots are kept so slot numbers in
/// logs match the configuration.
#[derive(Debug, Clone, Default)]
pub struct CredentialSlots {
    slots: Vec<Option<String>>,
}

impl CredentialSlots {
    pub fn new(slots: Vec<Option<String>>) -> Self {
        Self { slots }
    }

    /// Usable keys with their 1-based slot number, in priority order.
    pub fn usable(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(|key| (idx + 1, key))
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Short, non-reversible form of a key for logs.
pub fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    if key.chars().count() > 8 {
        format!("{}***", prefix)
    } else {
        "***".to_string()
    }
}

pub struct GeminiClient {
    transport: Arc<dyn GenerationTransport>,
    credentials: CredentialSlots,
}

impl GeminiClient {
    pub fn new(transport: Arc<dyn GenerationTransport>, credentials: CredentialSlots) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Build the production client from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let transport = HttpTransport::new(
            &config.api_base,
            &config.model_name,
            Duration::from_secs(config.upstream_timeout_secs),
        )?;
        info!("Gemini endpoint: {}", transport.endpoint());

        Ok(Self::new(
            Arc::new(transport),
            CredentialSlots::new(config.api_keys.clone()),
        ))
    }

    /// Send `body` with each usable key in turn and return the first 2xx body.
    pub async fn call(&self, body: &GenerateContentRequest) -> Option<String> {
        if self.credentials.is_empty() {
            warn!("No Gemini credential slots configured");
            return None;
        }

        let mut attempted = 0;

        for (slot, key) in self.credentials.usable() {
            attempted += 1;
            info!("Trying Gemini key slot {} ({})", slot, mask_key(key));

            match self.transport.post_generate(key, body).await {
                Ok(reply) if reply.is_success() => {
                    info!("Upstream status with key slot {}: {}", slot, reply.status);
                    return Some(reply.body);
                }
                Ok(reply) => {
                    warn!("Upstream status with key slot {}: {}", slot, reply.status);
                    debug!("Gemini upstream error data: {}", reply.body);
                }
                Err(err) => {
                    warn!("Key slot {} failed: {}", slot, err);
                }
            }
        }

        warn!(
            "All Gemini API keys failed ({} of {} slot(s) usable)",
            attempted,
            self.credentials.len()
        );
        None
    }

    /// `call`, reporting exhaustion as an error.
    pub async fn generate(&self, body: &GenerateContentRequest) -> Result<String> {
        let attempted = self.credentials.usable().count();
        self.call(body)
            .await
            .ok_or(RecommendationError::UpstreamUnavailable { attempted })
    }
}
