pub mod cost_normalizer;
pub mod gemini_client;
pub mod mock_suggestions;
pub mod pricing_service;
pub mod recommendation_service;
pub mod response_extractor;
