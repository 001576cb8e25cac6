//! Configuration management for the `Lavanda` order core
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings. The loaded
//! configuration is immutable: both verification components borrow it
//! for the lifetime of the process.

use crate::LavandaError;
use crate::geo::BoundingRegion;
use anyhow::{Context, Result};
use chrono::Weekday;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Root configuration structure for the `Lavanda` order core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LavandaConfig {
    /// Geocoding service configuration
    pub geocoding: GeocodingConfig,
    /// Serviceable coverage configuration
    pub coverage: CoverageConfig,
    /// Return scheduling configuration
    pub schedule: ScheduleConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Geocoding service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL for the Nominatim-compatible endpoint
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Response language (`accept-language`)
    #[serde(default = "default_geocoding_language")]
    pub language: String,
    /// ISO country code restriction (`countrycodes`)
    #[serde(default = "default_geocoding_country_code")]
    pub country_code: String,
    /// Country name used in the free-text fallback query
    #[serde(default = "default_geocoding_country")]
    pub country: String,
    /// City restriction for the structured query and post-filter
    #[serde(default = "default_geocoding_city")]
    pub city: String,
    /// Maximum candidates requested per query
    #[serde(default = "default_geocoding_limit")]
    pub result_limit: u32,
    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_geocoding_max_retries")]
    pub max_retries: u32,
}

/// Serviceable coverage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// Bounding box approximating the serviceable area
    #[serde(default = "default_coverage_region")]
    pub region: BoundingRegion,
}

/// Return scheduling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Fixed turnaround between pickup and suggested return, in hours
    #[serde(default = "default_turnaround_hours")]
    pub turnaround_hours: u32,
    /// Weekly rest day on which returns are never scheduled
    #[serde(default = "default_rest_weekday")]
    pub rest_weekday: String,
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

// Default value functions
fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_geocoding_language() -> String {
    "es".to_string()
}

fn default_geocoding_country_code() -> String {
    "ar".to_string()
}

fn default_geocoding_country() -> String {
    "Argentina".to_string()
}

fn default_geocoding_city() -> String {
    "Córdoba".to_string()
}

fn default_geocoding_limit() -> u32 {
    5
}

fn default_geocoding_timeout() -> u32 {
    30
}

fn default_geocoding_max_retries() -> u32 {
    3
}

fn default_coverage_region() -> BoundingRegion {
    BoundingRegion::cordoba()
}

fn default_turnaround_hours() -> u32 {
    48
}

fn default_rest_weekday() -> String {
    "sunday".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LavandaConfig {
    fn default() -> Self {
        Self {
            geocoding: GeocodingConfig {
                base_url: default_geocoding_base_url(),
                language: default_geocoding_language(),
                country_code: default_geocoding_country_code(),
                country: default_geocoding_country(),
                city: default_geocoding_city(),
                result_limit: default_geocoding_limit(),
                timeout_seconds: default_geocoding_timeout(),
                max_retries: default_geocoding_max_retries(),
            },
            coverage: CoverageConfig {
                region: default_coverage_region(),
            },
            schedule: ScheduleConfig {
                turnaround_hours: default_turnaround_hours(),
                rest_weekday: default_rest_weekday(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}

impl ScheduleConfig {
    /// Parse the configured rest day into a `chrono::Weekday`
    pub fn rest_day(&self) -> Result<Weekday> {
        Weekday::from_str(&self.rest_weekday).map_err(|_| {
            LavandaError::config(format!("Invalid rest weekday '{}'", self.rest_weekday)).into()
        })
    }
}

impl LavandaConfig {
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

        // Add environment variable overrides with LAVANDA_ prefix
        builder = builder.add_source(
            Environment::with_prefix("LAVANDA")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: LavandaConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lavanda").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_geocoding()?;
        self.validate_coverage()?;
        self.validate_schedule()?;
        self.validate_logging()?;
        Ok(())
    }

    fn validate_geocoding(&self) -> Result<()> {
        if !self.geocoding.base_url.starts_with("http://")
            && !self.geocoding.base_url.starts_with("https://")
        {
            return Err(LavandaError::config(
                "Geocoding base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.geocoding.city.trim().is_empty() {
            return Err(LavandaError::config("Geocoding city cannot be empty").into());
        }

        if self.geocoding.result_limit == 0 || self.geocoding.result_limit > 50 {
            return Err(
                LavandaError::config("Geocoding result limit must be between 1 and 50").into(),
            );
        }

        if self.geocoding.timeout_seconds == 0 || self.geocoding.timeout_seconds > 300 {
            return Err(
                LavandaError::config("Geocoding timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.geocoding.max_retries > 10 {
            return Err(LavandaError::config("Geocoding max retries cannot exceed 10").into());
        }

        Ok(())
    }

    fn validate_coverage(&self) -> Result<()> {
        let region = &self.coverage.region;
        if region.min_lon >= region.max_lon || region.min_lat >= region.max_lat {
            return Err(LavandaError::config(
                "Coverage region must have min corner strictly below max corner",
            )
            .into());
        }
        Ok(())
    }

    fn validate_schedule(&self) -> Result<()> {
        if self.schedule.turnaround_hours == 0 || self.schedule.turnaround_hours > 336 {
            return Err(LavandaError::config(
                "Turnaround must be between 1 and 336 hours (2 weeks)",
            )
            .into());
        }

        self.schedule.rest_day().map(|_| ())
    }

    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(LavandaError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(LavandaError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
