use crate::error::{RecommendationError, Result};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_FRONTEND_ORIGINS: [&str; 2] = [
    "http://localhost:5173",
    "https://joureny-planner.vercel.app",
];

/// Credential slots in priority order. The legacy single-key variable is tried last.
pub const CREDENTIAL_VARS: [&str; 4] = [
    "GEMINI_API_KEY_1",
    "GEMINI_API_KEY_2",
    "GEMINI_API_KEY_3",
    "GEMINI_API_KEY",
];

/// Process-wide settings, loaded once before the server starts and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub model_name: String,
    pub api_base: String,
    pub upstream_timeout_secs: u64,
    /// One entry per slot in `CREDENTIAL_VARS`; unset slots stay `None`.
    pub api_keys: Vec<Option<String>>,
    pub frontend_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            api_keys: vec![None; CREDENTIAL_VARS.len()],
            frontend_origins: DEFAULT_FRONTEND_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| RecommendationError::Config(format!("PORT is not a valid port: {}", raw)))?,
            None => defaults.port,
        };

        let upstream_timeout_secs = match non_empty("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(RecommendationError::Config(format!(
                        "UPSTREAM_TIMEOUT_SECS must be a positive integer: {}",
                        raw
                    )))
                }
            },
            None => defaults.upstream_timeout_secs,
        };

        let frontend_origins = match non_empty("FRONTEND_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.frontend_origins,
        };

        Ok(Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
            model_name: non_empty("MODEL_NAME").unwrap_or(defaults.model_name),
            api_base: non_empty("GEMINI_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            upstream_timeout_secs,
            api_keys: CREDENTIAL_VARS.iter().map(|var| non_empty(*var)).collect(),
            frontend_origins,
        })
    }

    /// Number of credential slots that actually hold a key.
    pub fn configured_key_count(&self) -> usize {
        self.api_keys.iter().filter(|key| key.is_some()).count()
    }
}
