//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `STOREFRONT_API_BASE_URL` - Backend base URL (default: `http://localhost:8000`)
//! - `STOREFRONT_DATA_DIR` - Directory for the durable cart (default: `.sports-jersey`)
//! - `STOREFRONT_SIZE_AWARE` - Key cart rows by product and size (default: true)
//! - `STOREFRONT_HTTP_TIMEOUT_SECS` - Request timeout; transport default when unset

use std::path::PathBuf;
use std::time::Duration;

use sports_jersey_core::KeyMode;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_DATA_DIR: &str = ".sports-jersey";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend base URL; API paths are resolved against it
    pub api_base_url: Url,
    /// Directory holding the durable cart
    pub data_dir: PathBuf,
    /// Cart row identity: product and size, or product only
    pub key_mode: KeyMode,
    /// Per-request timeout for backend calls
    pub http_timeout: Option<Duration>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let api_base_url = env
            .or_default("STOREFRONT_API_BASE_URL", DEFAULT_API_BASE_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_API_BASE_URL".to_string(), e.to_string())
            })?;
        if !matches!(api_base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_API_BASE_URL".to_string(),
                format!("unsupported scheme: {}", api_base_url.scheme()),
            ));
        }

        let data_dir = PathBuf::from(env.or_default("STOREFRONT_DATA_DIR", DEFAULT_DATA_DIR));

        let size_aware = parse_bool(&env.or_default("STOREFRONT_SIZE_AWARE", "true"))
            .ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "STOREFRONT_SIZE_AWARE".to_string(),
                    "expected true or false".to_string(),
                )
            })?;
        let key_mode = if size_aware {
            KeyMode::SizeAware
        } else {
            KeyMode::SizeAgnostic
        };

        let http_timeout = env
            .optional("STOREFRONT_HTTP_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "STOREFRONT_HTTP_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            api_base_url,
            data_dir,
            key_mode,
            http_timeout,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a, F>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
