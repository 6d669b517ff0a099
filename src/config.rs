//! Configuration management for `barowatch`
//!
//! Handles loading configuration from a TOML file and `BAROWATCH_`
//! environment variables, and validates all settings before a run.

use crate::BarowatchError;
use crate::models::Location;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BarowatchConfig {
    /// Weather provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Horizon, lookahead and threshold
    #[serde(default)]
    pub trend: TrendConfig,
    /// Optional warning publication
    #[serde(default)]
    pub notification: NotificationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather provider configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Forecast location as "lat,lon"
    pub location: Option<String>,
    /// Provider API key
    pub api_key: Option<String>,
    /// Full request URL, replaces the one built from key and location
    pub url: Option<String>,
    /// Provider root URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Trend evaluation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Number of hourly readings to evaluate
    #[serde(default = "default_hours_ahead")]
    pub hours_ahead: usize,
    /// Hour offset checked against the threshold
    #[serde(default = "default_warning_hours_ahead")]
    pub warning_hours_ahead: usize,
    /// Percent change below which a warning is raised
    #[serde(default = "default_drop_threshold")]
    pub drop_threshold: f64,
}

/// Notification topic settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Topic to publish warnings to; publishing is skipped when unset
    pub topic: Option<String>,
    /// Pub/sub service root URL
    #[serde(default = "default_notification_endpoint")]
    pub endpoint: String,
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
fn default_base_url() -> String {
    "https://api.darksky.net".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_hours_ahead() -> usize {
    24
}

const fn default_warning_hours_ahead() -> usize {
    6
}

const fn default_drop_threshold() -> f64 {
    -0.4
}

fn default_notification_endpoint() -> String {
    "https://ntfy.sh".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            location: None,
            api_key: None,
            url: None,
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            hours_ahead: default_hours_ahead(),
            warning_hours_ahead: default_warning_hours_ahead(),
            drop_threshold: default_drop_threshold(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            topic: None,
            endpoint: default_notification_endpoint(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl BarowatchConfig {
    /// Load configuration from the default file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let explicit = config_path.is_some();
        let config_file = config_path.unwrap_or_else(Self::get_config_path);

        if explicit || config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(explicit)
                    .format(config::FileFormat::Toml),
            );
        }

        // BAROWATCH_TREND__HOURS_AHEAD -> trend.hours_ahead
        builder = builder.add_source(
            Environment::with_prefix("BAROWATCH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| format!("Failed to build configuration from {}", config_file.display()))?;

        let config: BarowatchConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> PathBuf {
        PathBuf::from("barowatch.toml")
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        self.validate_provider()?;
        self.validate_trend()?;
        self.validate_notification()?;
        self.validate_logging()?;
        Ok(())
    }

    /// Parsed forecast location, if configured
    pub fn location(&self) -> crate::Result<Option<Location>> {
        self.provider
            .location
            .as_deref()
            .map(str::parse::<Location>)
            .transpose()
    }

    /// URL of the forecast request, either the override or one built from key and location
    pub fn request_url(&self) -> crate::Result<String> {
        if let Some(url) = &self.provider.url {
            return Ok(url.clone());
        }

        let api_key = self
            .provider
            .api_key
            .as_deref()
            .ok_or_else(|| BarowatchError::config("provider.api_key is required unless provider.url is set"))?;
        let location = self
            .provider
            .location
            .as_deref()
            .map(str::trim)
            .ok_or_else(|| BarowatchError::config("provider.location is required unless provider.url is set"))?;
        // Parsed for validation only; the provider gets the location as written
        location.parse::<Location>()?;

        Ok(format!(
            "{}/forecast/{}/{}",
            self.provider.base_url.trim_end_matches('/'),
            api_key,
            location
        ))
    }

    fn validate_provider(&self) -> crate::Result<()> {
        if let Some(url) = &self.provider.url {
            validate_http_url("provider.url", url)?;
        } else {
            if self.provider.api_key.as_deref().is_none_or(str::is_empty) {
                return Err(BarowatchError::config(
                    "provider.api_key is required unless provider.url is set",
                ));
            }
            if self.location()?.is_none() {
                return Err(BarowatchError::config(
                    "provider.location is required unless provider.url is set",
                ));
            }
            validate_http_url("provider.base_url", &self.provider.base_url)?;
        }

        if !(1..=300).contains(&self.provider.timeout_seconds) {
            return Err(BarowatchError::config(
                "provider.timeout_seconds must be between 1 and 300",
            ));
        }

        Ok(())
    }

    fn validate_trend(&self) -> crate::Result<()> {
        if self.trend.hours_ahead == 0 {
            return Err(BarowatchError::config("trend.hours_ahead must be at least 1"));
        }

        if self.trend.warning_hours_ahead >= self.trend.hours_ahead {
            return Err(BarowatchError::config(format!(
                "trend.warning_hours_ahead ({}) must be less than trend.hours_ahead ({})",
                self.trend.warning_hours_ahead, self.trend.hours_ahead
            )));
        }

        if !self.trend.drop_threshold.is_finite() {
            return Err(BarowatchError::config(
                "trend.drop_threshold must be a finite number",
            ));
        }

        Ok(())
    }

    fn validate_notification(&self) -> crate::Result<()> {
        if let Some(topic) = &self.notification.topic {
            if topic.trim().is_empty() {
                return Err(BarowatchError::config(
                    "notification.topic cannot be empty if provided. Either remove it or set a topic.",
                ));
            }
            if topic.contains(['/', '?', '#']) || topic.chars().any(char::is_whitespace) {
                return Err(BarowatchError::config(format!(
                    "notification.topic '{topic}' must not contain '/', '?', '#' or whitespace"
                )));
            }
            validate_http_url("notification.endpoint", &self.notification.endpoint)?;
        }
        Ok(())
    }

    fn validate_logging(&self) -> crate::Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(BarowatchError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(BarowatchError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        Ok(())
    }
}

fn validate_http_url(key: &str, url: &str) -> crate::Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(BarowatchError::config(format!(
            "{key} must be a valid HTTP or HTTPS URL"
        )))
    }
}
