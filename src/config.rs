//! Static configuration for rating lookups.
//!
//! Settings come from an optional YAML file. Every field has a default, so a
//! missing file or a partial one is fine:
//!
//! ```yaml
//! metacritic_base_url: https://www.metacritic.com
//! user_agent: Mozilla/5.0 (compatible; metacritic_ratings)
//! request_timeout_secs: 15
//! max_retries: 2
//! retry_base_delay_ms: 500
//! min_request_interval_ms: 250
//! ```

use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_METACRITIC_BASE_URL: &str = "https://www.metacritic.com";

/// Runtime settings for the providers and the HTTP client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the Metacritic site, without a trailing slash.
    pub metacritic_base_url: String,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Per-request timeout.
    pub request_timeout_secs: u64,
    /// Extra attempts after a transient failure (network error, 429, 5xx).
    pub max_retries: usize,
    /// First backoff delay; doubles with each retry.
    pub retry_base_delay_ms: u64,
    /// Minimum spacing between two requests from the same client.
    pub min_request_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metacritic_base_url: DEFAULT_METACRITIC_BASE_URL.to_string(),
            user_agent: format!(
                "Mozilla/5.0 (compatible; metacritic_ratings/{})",
                env!("CARGO_PKG_VERSION")
            ),
            request_timeout_secs: 15,
            max_retries: 2,
            retry_base_delay_ms: 500,
            min_request_interval_ms: 250,
        }
    }
}

impl Config {
    /// Parse a config from YAML text and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Load the config at `path`, or the defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        match path {
            Some(path) => {
                let yaml = fs::read_to_string(path).await?;
                let config = Self::from_yaml(&yaml)?;
                info!(path, base_url = %config.metacritic_base_url, "Loaded configuration");
                Ok(config)
            }
            None => Self::default().validated(),
        }
    }

    /// Replace the Metacritic base URL, re-validating the result.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, Box<dyn Error>> {
        self.metacritic_base_url = base_url.to_string();
        self.validated()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    fn validated(mut self) -> Result<Self, Box<dyn Error>> {
        let parsed = Url::parse(&self.metacritic_base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!(
                "metacritic_base_url must be http(s), got {}",
                self.metacritic_base_url
            )
            .into());
        }
        self.metacritic_base_url = self.metacritic_base_url.trim_end_matches('/').to_string();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.metacritic_base_url, "https://www.metacritic.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("max_retries: 5\n").unwrap();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.metacritic_base_url, DEFAULT_METACRITIC_BASE_URL);
        assert_eq!(config.min_request_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = Config::from_yaml("metacritic_base_url: https://mc.example.org/\n").unwrap();
        assert_eq!(config.metacritic_base_url, "https://mc.example.org");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(Config::from_yaml("metacritic_base_url: not a url\n").is_err());
        assert!(Config::default().with_base_url("ftp://mc.example.org").is_err());
    }

    #[test]
    fn test_with_base_url_override() {
        let config = Config::default()
            .with_base_url("http://localhost:8080/")
            .unwrap();
        assert_eq!(config.metacritic_base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_load_without_path_uses_defaults() {
        let config = Config::load(None).await.unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        assert!(Config::load(Some("/nonexistent/metacritic_ratings.yaml")).await.is_err());
    }
}
