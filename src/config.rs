//! Centralized configuration management for univman

use std::time::Duration;

use anyhow::{Context, Result};

/// Default backend base URL, matching the development server.
const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the university-management backend, without trailing slash
    pub api_url: String,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "univman/0.1.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("UNIVMAN_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let http = HttpConfig {
            timeout_seconds: parse_env_var("UNIVMAN_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("UNIVMAN_USER_AGENT")
                .unwrap_or_else(|_| "univman/0.1.0".to_string()),
        };

        Ok(Config { api_url, http })
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            return Err(anyhow::anyhow!("API base URL must not be empty"));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "API base URL must start with http:// or https://: {}",
                self.api_url
            ));
        }
        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_validation() {
        Config::default().validate().unwrap();

        let bad = Config {
            api_url: "localhost:5000".to_string(),
            ..Config::default()
        };
        assert!(bad.validate().is_err());
    }
}
