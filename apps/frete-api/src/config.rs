//! Frete API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! ## Variables
//! | Variable                    | Default            |
//! |-----------------------------|--------------------|
//! | `FRETE_BIND_ADDR`           | `0.0.0.0`          |
//! | `FRETE_HTTP_PORT`           | `8080`             |
//! | `FRETE_ORIGIN_CEP`          | `78556100`         |
//! | `FRETE_DEFAULT_PESO`        | `300` (grams)      |
//! | `FRETE_DEFAULT_COMPRIMENTO` | `16` (cm)          |
//! | `FRETE_DEFAULT_ALTURA`      | `2` (cm)           |
//! | `FRETE_DEFAULT_LARGURA`     | `11` (cm)          |
//! | `FRETE_DEFAULT_FORMATO`     | `1` (box)          |
//! | `FRETE_LOG_FILTER`          | `info,frete=debug` |
//!
//! `RUST_LOG`, when set, takes precedence over `FRETE_LOG_FILTER`.

use std::env;
use std::str::FromStr;

use frete_core::types::{DefaultPackage, EngineConfig, PackageFormat};
use frete_core::validation::validate_engine_config;
use frete_core::{
    ValidationErrors, DEFAULT_ORIGIN_POSTAL_CODE, DEFAULT_PACKAGE_FORMAT_CODE,
    DEFAULT_PACKAGE_HEIGHT_CM, DEFAULT_PACKAGE_LENGTH_CM, DEFAULT_PACKAGE_WEIGHT_GRAMS,
    DEFAULT_PACKAGE_WIDTH_CM,
};

/// Default HTTP port.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default tracing filter when neither `RUST_LOG` nor `FRETE_LOG_FILTER` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,frete=debug";

/// Frete API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address to bind (default: 0.0.0.0)
    pub bind_addr: String,

    /// HTTP server port
    pub http_port: u16,

    /// Default tracing filter directive
    pub log_filter: String,

    /// Origin and default package, already validated
    pub engine: EngineConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// or `None` when it is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("FRETE_BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());
        let http_port = parse_or(&lookup, "FRETE_HTTP_PORT", DEFAULT_HTTP_PORT)?;
        let log_filter =
            lookup("FRETE_LOG_FILTER").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let origin = lookup("FRETE_ORIGIN_CEP")
            .unwrap_or_else(|| DEFAULT_ORIGIN_POSTAL_CODE.to_string());

        let format_code: i64 =
            parse_or(&lookup, "FRETE_DEFAULT_FORMATO", DEFAULT_PACKAGE_FORMAT_CODE)?;
        let format = PackageFormat::from_code(format_code)
            .ok_or_else(|| ConfigError::InvalidValue("FRETE_DEFAULT_FORMATO".to_string()))?;

        let default_package = DefaultPackage {
            weight_grams: parse_or(&lookup, "FRETE_DEFAULT_PESO", DEFAULT_PACKAGE_WEIGHT_GRAMS)?,
            length_cm: parse_or(&lookup, "FRETE_DEFAULT_COMPRIMENTO", DEFAULT_PACKAGE_LENGTH_CM)?,
            height_cm: parse_or(&lookup, "FRETE_DEFAULT_ALTURA", DEFAULT_PACKAGE_HEIGHT_CM)?,
            width_cm: parse_or(&lookup, "FRETE_DEFAULT_LARGURA", DEFAULT_PACKAGE_WIDTH_CM)?,
            format,
        };

        // Defaults stand in for request fields, so they obey the same rules
        let engine = validate_engine_config(origin.trim(), default_package)?;

        Ok(ApiConfig {
            bind_addr,
            http_port,
            log_filter,
            engine,
        })
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.http_port)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            bind_addr: "0.0.0.0".to_string(),
            http_port: DEFAULT_HTTP_PORT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            engine: EngineConfig::default(),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid origin or default package: {0}")]
    InvalidDefaults(#[from] ValidationErrors),
}
