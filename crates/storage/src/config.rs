//! Storage configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LEADERBOARD_DATA_DIR` - Directory holding the JSON documents (default: ./data)
//! - `LEADERBOARD_SEED_DEMO` - Seed demo stores into an empty store (default: true)
//! - `LEADERBOARD_EXCHANGE_RATE` - DOP per USD used until a rate is saved (default: 59.50)

use std::path::PathBuf;

use leaderboard_core::{DEFAULT_EXCHANGE_RATE, ExchangeRate};
use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = "./data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where and how the leaderboard data is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding `stores.json`, `transactions.json`, `settings.json`
    /// and `tracking.json`.
    pub data_dir: PathBuf,
    /// Seed the demo data set when the store collection is empty.
    pub seed_demo: bool,
    /// Rate used when no settings document has been saved yet.
    pub default_exchange_rate: ExchangeRate,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            seed_demo: true,
            default_exchange_rate: DEFAULT_EXCHANGE_RATE,
        }
    }
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("LEADERBOARD_DATA_DIR", DEFAULT_DATA_DIR));
        let seed_demo = parse_bool("LEADERBOARD_SEED_DEMO", &get_env_or_default("LEADERBOARD_SEED_DEMO", "true"))?;
        let default_exchange_rate = get_optional_env("LEADERBOARD_EXCHANGE_RATE")
            .map(|raw| parse_rate("LEADERBOARD_EXCHANGE_RATE", &raw))
            .transpose()?
            .unwrap_or(DEFAULT_EXCHANGE_RATE);

        Ok(Self {
            data_dir,
            seed_demo,
            default_exchange_rate,
        })
    }

    /// Replace the data directory, e.g. from a command-line flag.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

fn parse_rate(key: &str, raw: &str) -> Result<ExchangeRate, ConfigError> {
    let rate = raw
        .trim()
        .parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    ExchangeRate::new(rate).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
