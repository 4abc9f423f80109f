//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CARDSHOP_API_URL` - Base URL of the marketplace backend
//!
//! ## Optional
//! - `CARDSHOP_SESSION_FILE` - Where the session token is persisted
//!   (default: `$HOME/.cardshop/session`)
//! - `CARDSHOP_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_HTTP_TIMEOUT_SECS: &str = "30";
const SESSION_DIR: &str = ".cardshop";
const SESSION_FILE: &str = "session";
const FALLBACK_SESSION_FILE: &str = ".cardshop-session";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (all endpoint paths are resolved against it)
    pub api_url: Url,
    /// File holding the persisted session token
    pub session_file: PathBuf,
    /// Timeout applied to every backend request
    pub http_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required keys are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("CARDSHOP_API_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("CARDSHOP_API_URL".to_string()))?;
        let api_url = parse_api_url(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CARDSHOP_API_URL".to_string(), e))?;

        let session_file = lookup("CARDSHOP_SESSION_FILE")
            .map_or_else(|| default_session_file(lookup("HOME")), PathBuf::from);

        let http_timeout = lookup("CARDSHOP_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|| DEFAULT_HTTP_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CARDSHOP_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_url,
            session_file,
            http_timeout,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Replace the backend URL, e.g. from a command-line override.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL cannot be parsed.
    pub fn with_api_url(mut self, raw_url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url(raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("--api-url".to_string(), e))?;
        Ok(self)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a backend URL, accepting only `http` and `https`.
fn parse_api_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

fn default_session_file(home: Option<String>) -> PathBuf {
    home.filter(|h| !h.is_empty()).map_or_else(
        || PathBuf::from(FALLBACK_SESSION_FILE),
        |h| PathBuf::from(h).join(SESSION_DIR).join(SESSION_FILE),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_url() {
        let result = ClientConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(key)) if key == "CARDSHOP_API_URL"));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let result = ClientConfig::from_lookup(lookup_from(&[("CARDSHOP_API_URL", "ftp://cards")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("CARDSHOP_API_URL", "http://localhost:5000"),
            ("HOME", "/home/ash"),
        ]))
        .unwrap();

        assert_eq!(config.api_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.session_file, PathBuf::from("/home/ash/.cardshop/session"));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_session_file_without_home() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[("CARDSHOP_API_URL", "http://localhost:5000")]))
                .unwrap();
        assert_eq!(config.session_file, PathBuf::from(".cardshop-session"));
    }

    #[test]
    fn test_explicit_values() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("CARDSHOP_API_URL", "https://api.cards.test/v1"),
            ("CARDSHOP_SESSION_FILE", "/tmp/token"),
            ("CARDSHOP_HTTP_TIMEOUT_SECS", "5"),
            ("SENTRY_DSN", "https://key@sentry.test/1"),
        ]))
        .unwrap();

        assert_eq!(config.session_file, PathBuf::from("/tmp/token"));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.sentry_dsn.as_deref(), Some("https://key@sentry.test/1"));
    }

    #[test]
    fn test_invalid_timeout() {
        let result = ClientConfig::from_lookup(lookup_from(&[
            ("CARDSHOP_API_URL", "http://localhost:5000"),
            ("CARDSHOP_HTTP_TIMEOUT_SECS", "soon"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "CARDSHOP_HTTP_TIMEOUT_SECS"));
    }

    #[test]
    fn test_api_url_override() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[("CARDSHOP_API_URL", "http://localhost:5000")]))
                .unwrap()
                .with_api_url("http://10.0.0.2:8080")
                .unwrap();
        assert_eq!(config.api_url.as_str(), "http://10.0.0.2:8080/");
    }
}
