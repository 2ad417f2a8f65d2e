//! Environment-driven configuration for the sync engine.
//!
//! Every knob has a default except the API key; the CLI loads a `.env`
//! file before calling [`SyncConfig::from_env`] so deployments can keep
//! credentials out of the shell profile.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::remote::RetryPolicy;

pub const DEFAULT_API_BASE_URL: &str = "https://streaming-availability.p.rapidapi.com";
pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_DB_PATH: &str = "nextup.db";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value {value:?} for environment variable {name}")]
    InvalidVar { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
    pub country: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub database: DatabaseConfig,
    pub remote: RemoteConfig,
    pub retry: RetryPolicy,
}

impl SyncConfig {
    /// Gather configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("NEXTUP_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingVar("NEXTUP_API_KEY"))?;

        let base_url = std::env::var("NEXTUP_API_BASE_URL")
            .ok()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let country = std::env::var("NEXTUP_COUNTRY")
            .ok()
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
        let path = std::env::var("NEXTUP_DB_PATH")
            .ok()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let timeout = Duration::from_secs(parse_var(
            "NEXTUP_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?);

        let defaults = RetryPolicy::default();
        let retry = RetryPolicy {
            max_attempts: parse_var("NEXTUP_RETRY_MAX_ATTEMPTS", defaults.max_attempts)?,
            initial_delay: Duration::from_millis(parse_var(
                "NEXTUP_RETRY_INITIAL_DELAY_MS",
                defaults.initial_delay.as_millis() as u64,
            )?),
            max_delay: Duration::from_millis(parse_var(
                "NEXTUP_RETRY_MAX_DELAY_MS",
                defaults.max_delay.as_millis() as u64,
            )?),
        };

        Ok(Self {
            database: DatabaseConfig { path },
            remote: RemoteConfig {
                base_url,
                api_key,
                country,
                timeout,
            },
            retry,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidVar { name, value: raw }),
        Err(_) => Ok(default),
    }
}
