use std::path::PathBuf;

use thiserror::Error;

use crate::constants::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_STORAGE_KEY};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub storage_quota_bytes: Option<usize>,

    // Media
    pub media_dir: PathBuf,
    pub max_upload_bytes: usize,

    // Web Server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a default, so this only fails on unparseable values.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable holds an invalid number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Storage
            data_dir: PathBuf::from(env_or_default("DATA_DIR", "./data")),
            storage_key: env_or_default("STORAGE_KEY", DEFAULT_STORAGE_KEY),
            storage_quota_bytes: parse_env_usize_opt("STORAGE_QUOTA_BYTES")?,

            // Media
            media_dir: PathBuf::from(env_or_default("MEDIA_DIR", "./data/media")),
            max_upload_bytes: parse_env_usize("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,

            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8080)?,
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_storage_key(&self.storage_key)?;
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_UPLOAD_BYTES".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.storage_quota_bytes == Some(0) {
            return Err(ConfigError::InvalidValue {
                name: "STORAGE_QUOTA_BYTES".to_string(),
                message: "must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }
}

/// Storage keys become file names, so only a conservative character set is allowed.
fn validate_storage_key(key: &str) -> Result<(), ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::InvalidValue {
            name: "STORAGE_KEY".to_string(),
            message: "cannot be empty".to_string(),
        });
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        || key.starts_with('.')
    {
        return Err(ConfigError::InvalidValue {
            name: "STORAGE_KEY".to_string(),
            message: format!("must contain only letters, digits, '_', '-' or '.', got '{key}'"),
        });
    }
    Ok(())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    Ok(parse_env_usize_opt(name)?.unwrap_or(default))
}

fn parse_env_usize_opt(name: &str) -> Result<Option<usize>, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => {
            val.parse()
                .map(Some)
                .map_err(|e| ConfigError::ParseInt {
                    name: name.to_string(),
                    source: e,
                })
        }
        _ => Ok(None),
    }
}
