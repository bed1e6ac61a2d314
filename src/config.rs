//! Environment-driven server configuration.

use std::path::PathBuf;

use crate::error::ErrorCode;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        "E_CONFIG"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// YAML seed to load. `None` serves the built-in demo site.
    pub seed_path: Option<PathBuf>,
    pub default_dark_mode: bool,
    /// Enables edit handles on rendered nodes and the instance update route.
    pub edit_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, seed_path: None, default_dark_mode: false, edit_mode: false }
    }
}

impl ServerConfig {
    /// Read `PORT`, `SITE_SEED_PATH`, `DEFAULT_DARK_MODE`, and `EDIT_MODE`.
    ///
    /// # Errors
    ///
    /// `Invalid` when a set variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let seed_path = std::env::var("SITE_SEED_PATH").ok().filter(|p| !p.trim().is_empty()).map(PathBuf::from);
        let default_dark_mode = parse_bool("DEFAULT_DARK_MODE", std::env::var("DEFAULT_DARK_MODE").ok().as_deref())?;
        let edit_mode = parse_bool("EDIT_MODE", std::env::var("EDIT_MODE").ok().as_deref())?;
        Ok(Self { port, seed_path, default_dark_mode, edit_mode })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(DEFAULT_PORT),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { var: "PORT", value: value.to_string() }),
    }
}

/// Unset or empty means `false`.
fn parse_bool(var: &'static str, raw: Option<&str>) -> Result<bool, ConfigError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(false);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { var, value: value.to_string() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
