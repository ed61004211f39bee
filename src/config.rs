//! Configuration for the HIE registry client.
//!
//! Configuration is loaded from multiple sources with the following precedence:
//! 1. Environment variables (highest priority)
//! 2. `config.toml` file
//! 3. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `HIE_BASE_URL` - Base URL of the HIE API
//! - `HIE_TIMEOUT_SECS` - Request timeout in seconds
//! - `HIE_EXPIRY_WARNING_DAYS` - License renewal warning horizon in days
//! - `HIE_LOCATION_UUID` - Default session location (used by the CLI)
//! - `HIE_LOGGING_ENABLED` - Enable logging output
//! - `HIE_LOG_LEVEL` - Log level (trace, debug, info, warn, error)

use config::{Config, ConfigError};
use serde::Deserialize;
use std::env;
use std::sync::OnceLock;

use crate::errors::{HieError, HieResult};
use crate::license::{LicenseEvaluator, MAX_EXPIRY_WARNING_DAYS};
use crate::session::SessionContext;

/// Global configuration singleton.
static CONFIG: OnceLock<HieConfig> = OnceLock::new();

pub const DEFAULT_BASE_URL: &str = "https://ngx.ampath.or.ke/hie";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HieConfig {
    /// HIE API connection settings
    pub hie: HieApiConfig,
    /// License evaluation settings
    pub license: LicenseConfig,
    /// Default session values
    pub session: SessionConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HieApiConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HieApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LicenseConfig {
    /// Valid licenses ending within this many days raise a renewal warning
    pub expiry_warning_days: i64,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            expiry_warning_days: crate::license::DEFAULT_EXPIRY_WARNING_DAYS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Location UUID used when the caller does not supply one
    pub location_uuid: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
        }
    }
}

fn config_error(e: ConfigError) -> HieError {
    HieError::Config(e.to_string())
}

impl HieConfig {
    /// Load configuration from `config.toml` (optional) and environment.
    pub fn load() -> HieResult<Self> {
        Self::load_from("config")
    }

    /// Load configuration from the named file (optional, any format the
    /// `config` crate recognises by extension) and environment.
    ///
    /// Sources are applied in this order (later override earlier):
    /// 1. Default values
    /// 2. The config file
    /// 3. Environment variables
    pub fn load_from(file: &str) -> HieResult<Self> {
        let builder = Config::builder()
            .set_default("hie.base_url", DEFAULT_BASE_URL)
            .map_err(config_error)?
            .set_default("hie.timeout_secs", 30)
            .map_err(config_error)?
            .set_default(
                "license.expiry_warning_days",
                crate::license::DEFAULT_EXPIRY_WARNING_DAYS,
            )
            .map_err(config_error)?
            .set_default("logging.enabled", true)
            .map_err(config_error)?
            .set_default("logging.level", "info")
            .map_err(config_error)?
            .add_source(config::File::with_name(file).required(false))
            .set_override_option("hie.base_url", env::var("HIE_BASE_URL").ok())
            .map_err(config_error)?
            .set_override_option(
                "hie.timeout_secs",
                env::var("HIE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok()),
            )
            .map_err(config_error)?
            .set_override_option(
                "license.expiry_warning_days",
                env::var("HIE_EXPIRY_WARNING_DAYS")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok()),
            )
            .map_err(config_error)?
            .set_override_option("session.location_uuid", env::var("HIE_LOCATION_UUID").ok())
            .map_err(config_error)?
            .set_override_option(
                "logging.enabled",
                env::var("HIE_LOGGING_ENABLED")
                    .ok()
                    .and_then(|v| v.parse::<bool>().ok()),
            )
            .map_err(config_error)?
            .set_override_option("logging.level", env::var("HIE_LOG_LEVEL").ok())
            .map_err(config_error)?;

        let settings = builder
            .build()
            .map_err(|e| HieError::Config(format!("failed to build config: {e}")))?;

        let config: HieConfig = settings
            .try_deserialize()
            .map_err(|e| HieError::Config(format!("failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> HieResult<()> {
        let url = self.hie.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(HieError::Config(format!(
                "hie.base_url must be an http(s) URL, got '{url}'"
            )));
        }

        if self.hie.timeout_secs == 0 {
            return Err(HieError::Config(
                "hie.timeout_secs must be greater than 0".to_string(),
            ));
        }

        let days = self.license.expiry_warning_days;
        if !(1..=MAX_EXPIRY_WARNING_DAYS).contains(&days) {
            return Err(HieError::Config(format!(
                "license.expiry_warning_days must be between 1 and {MAX_EXPIRY_WARNING_DAYS}, got {days}"
            )));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(HieError::Config(format!(
                    "logging.level must be one of: trace, debug, info, warn, error. Got '{other}'"
                )));
            }
        }

        Ok(())
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.hie.base_url.trim().trim_end_matches('/')
    }

    pub fn evaluator(&self) -> LicenseEvaluator {
        LicenseEvaluator::from_days(self.license.expiry_warning_days)
    }

    /// Session built from the configured default location.
    pub fn default_session(&self) -> SessionContext {
        SessionContext {
            location_uuid: self.session.location_uuid.clone(),
            provider_uuid: None,
        }
    }
}

/// Get the global configuration.
///
/// Loads the configuration on first access and caches it.
pub fn get_config() -> HieResult<&'static HieConfig> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }

    let config = HieConfig::load()?;

    // Ignore the error if another thread initialised it first.
    let _ = CONFIG.set(config);

    CONFIG
        .get()
        .ok_or_else(|| HieError::Config("configuration was not initialised".to_string()))
}

/// Initialize configuration explicitly.
///
/// Call this early to surface configuration errors at startup.
pub fn init_config() -> HieResult<&'static HieConfig> {
    get_config()
}
