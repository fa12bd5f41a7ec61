//! Configuration management for the `TripScout` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripScoutError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TripScout` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripScoutConfig {
    /// Web server configuration
    pub server: ServerConfig,
    /// Destination catalog configuration
    pub catalog: CatalogConfig,
    /// Cache configuration
    pub cache: CacheConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Default recommendation settings
    pub defaults: DefaultsConfig,
}

/// Web server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind on
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    /// Request body size limit in kilobytes
    #[serde(default = "default_body_limit")]
    pub body_limit_kb: u32,
}

/// Destination catalog configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a JSON seed file with destination records
    pub seed_path: Option<String>,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether ranking responses are memoized at all
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Cache TTL in hours
    #[serde(default = "default_cache_ttl")]
    pub ttl_hours: u32,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default recommendation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Trip duration assumed when a request does not specify one
    #[serde(default = "default_trip_duration")]
    pub trip_duration_days: u32,
    /// Maximum number of recommendations to return
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: u32,
    /// Currency label attached to recommendations
    #[serde(default = "default_currency")]
    pub currency: String,
}

// Default value functions
fn default_server_port() -> u16 {
    8080
}

fn default_request_timeout() -> u32 {
    30
}

fn default_body_limit() -> u32 {
    64
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl() -> u32 {
    6
}

fn default_cache_location() -> String {
    "~/.cache/tripscout".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_trip_duration() -> u32 {
    3
}

fn default_recommendation_limit() -> u32 {
    10
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for TripScoutConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: default_server_port(),
                request_timeout_seconds: default_request_timeout(),
                body_limit_kb: default_body_limit(),
            },
            catalog: CatalogConfig { seed_path: None },
            cache: CacheConfig {
                enabled: default_cache_enabled(),
                ttl_hours: default_cache_ttl(),
                location: default_cache_location(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            defaults: DefaultsConfig {
                trip_duration_days: default_trip_duration(),
                recommendation_limit: default_recommendation_limit(),
                currency: default_currency(),
            },
        }
    }
}

impl TripScoutConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with TRIPSCOUT_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TRIPSCOUT")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripScoutConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripscout").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.server.body_limit_kb == 0 {
            self.server.body_limit_kb = default_body_limit();
        }
        if self.cache.ttl_hours == 0 {
            self.cache.ttl_hours = default_cache_ttl();
        }
        if self.cache.location.is_empty() {
            self.cache.location = default_cache_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.trip_duration_days == 0 {
            self.defaults.trip_duration_days = default_trip_duration();
        }
        if self.defaults.recommendation_limit == 0 {
            self.defaults.recommendation_limit = default_recommendation_limit();
        }
        if self.defaults.currency.is_empty() {
            self.defaults.currency = default_currency();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.server.request_timeout_seconds > 300 {
            return Err(
                TripScoutError::config("Request timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.cache.ttl_hours > 168 {
            return Err(
                TripScoutError::config("Cache TTL cannot exceed 168 hours (1 week)").into(),
            );
        }

        if self.defaults.trip_duration_days > 60 {
            return Err(
                TripScoutError::config("Default trip duration cannot exceed 60 days").into(),
            );
        }

        if self.defaults.recommendation_limit > 100 {
            return Err(
                TripScoutError::config("Recommendation limit cannot exceed 100").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripScoutError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripScoutError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.defaults.currency.len() != 3 || !self.defaults.currency.is_ascii() {
            return Err(TripScoutError::config(
                "Currency must be a 3-letter ISO 4217 code",
            )
            .into());
        }

        Ok(())
    }

    /// Create configuration directory if it doesn't exist
    pub fn ensure_config_dir() -> Result<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            let tripscout_config_dir = config_dir.join("tripscout");
            std::fs::create_dir_all(&tripscout_config_dir).with_context(|| {
                format!(
                    "Failed to create config directory: {}",
                    tripscout_config_dir.display()
                )
            })?;
            Ok(tripscout_config_dir)
        } else {
            Err(TripScoutError::config("Unable to determine config directory").into())
        }
    }
}
