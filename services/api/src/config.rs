//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_TMDB_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/original";
pub const DEFAULT_JUDGE_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_JUDGE_MODEL: &str = "llama3-8b-8192";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub tmdb_api_key: String,
    pub tmdb_api_base: String,
    pub tmdb_image_base: String,
    pub tmdb_timeout: Duration,
    pub judge_api_key: Option<String>,
    pub judge_api_base: String,
    pub judge_model: String,
    pub seed_catalog_path: PathBuf,
    pub cors_origin: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:4000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Catalog Provider ---
        let tmdb_api_key = std::env::var("TMDB_API_KEY")
            .map_err(|_| ConfigError::MissingVar("TMDB_API_KEY".to_string()))?;
        let tmdb_api_base = std::env::var("TMDB_API_BASE")
            .unwrap_or_else(|_| DEFAULT_TMDB_API_BASE.to_string());
        let tmdb_image_base = std::env::var("TMDB_IMAGE_BASE")
            .unwrap_or_else(|_| DEFAULT_TMDB_IMAGE_BASE.to_string());
        let tmdb_timeout_str =
            std::env::var("TMDB_TIMEOUT_SECS").unwrap_or_else(|_| "30".to_string());
        let tmdb_timeout = tmdb_timeout_str
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidValue("TMDB_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        // --- Answer Judge (key is optional here, checked at startup) ---
        let judge_api_key = std::env::var("JUDGE_API_KEY")
            .or_else(|_| std::env::var("GROQ_API_KEY"))
            .ok();
        let judge_api_base = std::env::var("JUDGE_API_BASE")
            .unwrap_or_else(|_| DEFAULT_JUDGE_API_BASE.to_string());
        let judge_model =
            std::env::var("JUDGE_MODEL").unwrap_or_else(|_| DEFAULT_JUDGE_MODEL.to_string());

        let seed_catalog_path = std::env::var("SEED_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/seed"));
        let cors_origin = std::env::var("CORS_ORIGIN").ok().filter(|o| !o.is_empty());

        Ok(Self {
            bind_address,
            log_level,
            tmdb_api_key,
            tmdb_api_base,
            tmdb_image_base,
            tmdb_timeout,
            judge_api_key,
            judge_api_base,
            judge_model,
            seed_catalog_path,
            cors_origin,
        })
    }
}
