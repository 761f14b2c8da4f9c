use log::{info, warn};

use crate::config::AppConfig;
use crate::error::Result;
use crate::models::gemini::GenerateContentRequest;
use crate::models::recommendation::{NormalizedSuggestion, RecommendationRequest, RecommendationResponse};
use crate::models::suggestion::RawSuggestion;
use crate::services::cost_normalizer::normalize_base;
use crate::services::gemini_client::GeminiClient;
use crate::services::mock_suggestions;
use crate::services::pricing_service::PricingService;
use crate::services::response_extractor;

/// Most suggestions ever returned from the model path.
pub const MAX_SUGGESTIONS: usize = 10;

pub const MISSING_FIELDS_NOTE: &str = "Required fields missing. Using local suggestions.";

/// Where the unpriced suggestions came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionSource {
    Model,
    /// Model path failed and was replaced silently.
    Fallback,
    /// Mood or country missing; the caller is told via the note.
    MissingFields,
}

pub struct RecommendationService {
    client: GeminiClient,
    model_name: String,
}

impl RecommendationService {
    pub fn new(client: GeminiClient, model_name: impl Into<String>) -> Self {
        Self {
            client,
            model_name: model_name.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(GeminiClient::from_config(config)?, config.model_name.clone()))
    }

    /// Answer a recommendation request. Never fails: any upstream trouble is
    /// replaced by local suggestions.
    pub async fn recommend(&self, request: &RecommendationRequest) -> RecommendationResponse {
        let (raw, source) = self.collect_suggestions(request).await;
        info!("Returning {} suggestion(s) from {:?}", raw.len(), source);

        RecommendationResponse {
            success: true,
            suggestions: raw.iter().map(price_suggestion).collect(),
            note: match source {
                SuggestionSource::MissingFields => Some(MISSING_FIELDS_NOTE.to_string()),
                _ => None,
            },
        }
    }

    async fn collect_suggestions(&self, request: &RecommendationRequest) -> (Vec<RawSuggestion>, SuggestionSource) {
        if !request.has_required_fields() {
            info!("Mood or country missing, using local suggestions");
            return (mock_for(request), SuggestionSource::MissingFields);
        }

        match self.remote_suggestions(request).await {
            Ok(suggestions) => (suggestions, SuggestionSource::Model),
            Err(err) => {
                warn!("Gemini parse/upstream error, using mock suggestions: {}", err);
                (mock_for(request), SuggestionSource::Fallback)
            }
        }
    }

    /// Ask the model and parse its answer, capped at `MAX_SUGGESTIONS`.
    pub async fn remote_suggestions(&self, request: &RecommendationRequest) -> Result<Vec<RawSuggestion>> {
        info!("Using Gemini model: {}", self.model_name);
        let body = GenerateContentRequest::from_prompt(build_prompt(request));

        let raw_body = self.client.generate(&body).await?;
        let mut suggestions = response_extractor::extract(&raw_body)?;
        suggestions.truncate(MAX_SUGGESTIONS);
        Ok(suggestions)
    }
}

fn mock_for(request: &RecommendationRequest) -> Vec<RawSuggestion> {
    mock_suggestions::generate(
        request.mood(),
        request.country(),
        request.state(),
        request.budget(),
        request.travelers,
    )
}

/// Attach the normalized base cost and its breakdown.
pub fn price_suggestion(raw: &RawSuggestion) -> NormalizedSuggestion {
    let base = normalize_base(raw);

    NormalizedSuggestion {
        destination: raw.destination.clone(),
        summary: raw.summary.clone(),
        tags: raw.tags.clone().unwrap_or_default(),
        approx_base_cost: base,
        breakdown: PricingService::breakdown(base),
    }
}

fn display_or(value: Option<String>, fallback: &str) -> String {
    value.unwrap_or_else(|| fallback.to_string())
}

pub fn build_prompt(request: &RecommendationRequest) -> String {
    format!(
        r#"Return a JSON array of up to {max} DIFFERENT travel suggestions for a user.

Mood: {mood}
Country: {country}
StateOrRegion: {state}
TotalBudgetINR: {budget}
Travelers: {travelers}
ExistingDestinations (do NOT repeat any of these city/place names): [{existing}]

Each object MUST be exactly:
{{
  "destination": "City or Place, State",
  "summary": "1–3 lines about this place (small history + why visit)",
  "tags": ["tag1","tag2","tag3"],
  "approxBaseCost": number  // per person, INR
}}

Rules:
- Give a mix of famous and lesser-known places.
- Do NOT include any destination whose city/place name already appears in ExistingDestinations.
- Avoid repeating the same city name across different objects in the same response.
- Respond with VALID JSON ONLY (no backticks, no extra text)."#,
        max = MAX_SUGGESTIONS,
        mood = request.mood().unwrap_or_default(),
        country = request.country().unwrap_or_default(),
        state = request.state().unwrap_or("Any"),
        budget = display_or(request.budget().map(|b| b.to_string()), "Not specified"),
        travelers = display_or(request.travelers.map(|t| t.to_string()), "Not specified"),
        existing = request.existing().join(", "),
    )
}
