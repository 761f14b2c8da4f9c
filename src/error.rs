use thiserror::Error;

/// Failures inside the recommendation pipeline.
///
/// Everything but `Config` is recovered inside the pipeline by answering with
/// local suggestions; `Config` only stops the server at startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendationError {
    #[error("Upstream unavailable: {attempted} credential slot(s) tried, none succeeded")]
    UpstreamUnavailable { attempted: usize },

    #[error("Upstream response malformed: {0}")]
    ResponseMalformed(String),

    #[error("Upstream transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for RecommendationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RecommendationError::Transport(format!("request timed out: {}", err))
        } else {
            RecommendationError::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, RecommendationError>;
