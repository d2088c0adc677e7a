//! Client configuration

use thiserror::Error;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("FINASSIST_BACKEND_URL must be an http(s) URL, got {0:?}")]
    InvalidBackendUrl(String),
}

/// Configuration consumed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address serving `/query` and `/health`
    pub backend_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend_url = match lookup("FINASSIST_BACKEND_URL") {
            Some(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => DEFAULT_BACKEND_URL.to_string(),
        };

        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBackendUrl(backend_url));
        }

        Ok(Self { backend_url })
    }
}
