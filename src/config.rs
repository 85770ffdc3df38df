//! Configuration management

use crate::error::ConfigError;
use crate::google::{DEFAULT_DIRECTIONS_URL, DirectionsConfig};

pub const DEFAULT_DEPOT_ADDRESS: &str = "Amazon Fulfillment Centre (YXX1)";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Fixed origin and destination of every route
    pub depot_address: String,

    /// Directions API settings, including the API key
    pub directions: DirectionsConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let api_key = lookup("GOOGLE_MAPS_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("GOOGLE_MAPS_API_KEY"))?;

        let depot_address = lookup("DEPOT_ADDRESS")
            .filter(|address| !address.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DEPOT_ADDRESS.to_string());

        let base_url = lookup("DIRECTIONS_BASE_URL")
            .unwrap_or_else(|| DEFAULT_DIRECTIONS_URL.to_string());

        let timeout_secs = match lookup("DIRECTIONS_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "DIRECTIONS_TIMEOUT_SECS",
                        value,
                    });
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            depot_address,
            directions: DirectionsConfig {
                base_url,
                api_key,
                timeout_secs,
            },
        })
    }
}
