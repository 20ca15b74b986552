//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any network
//! call is made.
//!
//! ## Required Variables
//!
//! - `DISCOVERY_API_KEY` - Watson Discovery API key
//! - `DISCOVERY_URL` - Service endpoint, including the instance path segment
//! - `DISCOVERY_PROJECT_ID` - Project whose collections are reconciled
//!
//! ## Optional Variables
//!
//! - `DISCOVERY_API_VERSION` - API version date (default: `2023-03-31`)
//! - `DISCOVERY_URL_FIELD` - Metadata field holding the document URL
//!   (default: `metadata.source.url`)
//! - `DISCOVERY_TIMEOUT_SECONDS` - Per-request timeout (default: 30)
//! - `RUST_LOG` - Log level (default: `info`)
//!
//! Variables may also come from a `.env` file; `main` calls
//! `dotenvy::dotenv()` before loading.

use crate::error::AppError;
use std::env;

/// Default Discovery API version date.
pub const DEFAULT_API_VERSION: &str = "2023-03-31";

/// Default metadata field compared against each URL entry.
///
/// Documents ingested by the standard web crawler carry the source URL here.
/// Set `DISCOVERY_URL_FIELD` if the target schema stores it elsewhere.
pub const DEFAULT_URL_FIELD: &str = "metadata.source.url";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    /// Service endpoint, including the instance path segment.
    pub endpoint: String,
    pub project_id: String,
    /// API version date, `YYYY-MM-DD`.
    pub version: String,
    /// Metadata field matched against each URL entry.
    pub url_field: String,
    /// Per-request timeout in seconds (`DISCOVERY_TIMEOUT_SECONDS`, default: 30).
    pub timeout_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if a required variable is missing
    /// or empty.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = require("DISCOVERY_API_KEY")?;
        let endpoint = require("DISCOVERY_URL")?;
        let project_id = require("DISCOVERY_PROJECT_ID")?;

        let version =
            env::var("DISCOVERY_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());
        let url_field =
            env::var("DISCOVERY_URL_FIELD").unwrap_or_else(|_| DEFAULT_URL_FIELD.to_string());

        let timeout_seconds = env::var("DISCOVERY_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            api_key,
            endpoint,
            project_id,
            version,
            url_field,
            timeout_seconds,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if:
    /// - `endpoint` is not a valid `http://` or `https://` URL
    /// - `version` is not a `YYYY-MM-DD` date
    /// - `url_field` is empty
    /// - `timeout_seconds` is zero
    pub fn validate(&self) -> Result<(), AppError> {
        let parsed = url::Url::parse(&self.endpoint).map_err(|e| {
            AppError::Configuration(format!("DISCOVERY_URL is not a valid URL: {e}"))
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(AppError::Configuration(format!(
                    "DISCOVERY_URL must use http or https, got '{other}'"
                )));
            }
        }

        if parsed.host_str().is_none() {
            return Err(AppError::Configuration(
                "DISCOVERY_URL must include a host".to_string(),
            ));
        }

        if chrono::NaiveDate::parse_from_str(&self.version, "%Y-%m-%d").is_err() {
            return Err(AppError::Configuration(format!(
                "DISCOVERY_API_VERSION must be a YYYY-MM-DD date, got '{}'",
                self.version
            )));
        }

        if self.url_field.trim().is_empty() {
            return Err(AppError::Configuration(
                "DISCOVERY_URL_FIELD must not be empty".to_string(),
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::Configuration(
                "DISCOVERY_TIMEOUT_SECONDS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Logs a configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Endpoint:   {}", self.endpoint);
        tracing::info!("  Project:    {}", self.project_id);
        tracing::info!("  Version:    {}", self.version);
        tracing::info!("  URL field:  {}", self.url_field);
        tracing::info!("  API key:    {}", mask_api_key(&self.api_key));
        tracing::info!("  Timeout:    {}s", self.timeout_seconds);
    }
}

/// Reads a required environment variable, rejecting empty values.
fn require(key: &str) -> Result<String, AppError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Configuration(format!("{key} must be set")))
}

/// Masks an API key for logging, keeping only a short prefix.
fn mask_api_key(key: &str) -> String {
    if key.len() <= 4 {
        "***".to_string()
    } else {
        format!("{}***", &key[..4])
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns [`AppError::Configuration`] if required variables are missing or
/// validation fails.
pub fn load_from_env() -> Result<Config, AppError> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
