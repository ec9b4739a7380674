//! Runtime configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `HOST`: bind address (default `0.0.0.0`)
//! - `PORT`: bind port (default `5000`)
//! - `STORAGE_MODE`: `sqlite` (default) | `in_memory`
//! - `DATABASE_URL`: SQLite URL (default `sqlite://app.db`)
//!
//! Empty or whitespace-only values count as unset. `main` loads a `.env`
//! file first, if one exists.

use std::env;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid STORAGE_MODE '{0}': expected 'sqlite' or 'in_memory'")]
    InvalidStorageMode(String),

    #[error("invalid PORT '{0}': expected an integer in 0..=65535")]
    InvalidPort(String),
}

/// Which record store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    #[default]
    Sqlite,
    InMemory,
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "in_memory" | "memory" => Ok(Self::InMemory),
            _ => Err(ConfigError::InvalidStorageMode(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage_mode: StorageMode,
    pub database_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            storage_mode: StorageMode::default(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };
        let storage_mode = match get("STORAGE_MODE") {
            Some(raw) => raw.parse::<StorageMode>()?,
            None => defaults.storage_mode,
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            storage_mode,
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
        })
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
