//! Configuration for the catalogue, its stores and the highlight relay.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be true or false, got {value:?}")]
    InvalidBool { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub highlighter: HighlighterConfig,
    pub storage: StorageConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlighterConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub catalog_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub suggestion_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            highlighter: HighlighterConfig {
                url: "http://localhost:8080/".to_string(),
                timeout_secs: 30,
                connect_timeout_secs: 10,
                accept_invalid_certs: false,
            },
            storage: StorageConfig {
                catalog_dir: PathBuf::from("./catalog"),
                uploads_dir: PathBuf::from("./uploads"),
                max_upload_bytes: 10 * 1024 * 1024,
            },
            search: SearchConfig {
                suggestion_limit: 10,
            },
        }
    }
}

impl CatalogConfig {
    /// Read `CATALOG_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CatalogConfig::default();

        let number = |var: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(var) {
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber { var, value }),
                None => Ok(default),
            }
        };

        let flag = |var: &'static str, default: bool| -> Result<bool, ConfigError> {
            match lookup(var) {
                Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" => Ok(true),
                    "0" | "false" | "no" => Ok(false),
                    _ => Err(ConfigError::InvalidBool { var, value }),
                },
                None => Ok(default),
            }
        };

        Ok(CatalogConfig {
            highlighter: HighlighterConfig {
                url: lookup("CATALOG_HIGHLIGHTER_URL").unwrap_or(defaults.highlighter.url),
                timeout_secs: number(
                    "CATALOG_HIGHLIGHTER_TIMEOUT_SECS",
                    defaults.highlighter.timeout_secs,
                )?,
                connect_timeout_secs: number(
                    "CATALOG_HIGHLIGHTER_CONNECT_TIMEOUT_SECS",
                    defaults.highlighter.connect_timeout_secs,
                )?,
                accept_invalid_certs: flag(
                    "CATALOG_HIGHLIGHTER_ACCEPT_INVALID_CERTS",
                    defaults.highlighter.accept_invalid_certs,
                )?,
            },
            storage: StorageConfig {
                catalog_dir: lookup("CATALOG_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.catalog_dir),
                uploads_dir: lookup("CATALOG_UPLOADS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.uploads_dir),
                max_upload_bytes: number(
                    "CATALOG_MAX_UPLOAD_BYTES",
                    defaults.storage.max_upload_bytes as u64,
                )? as usize,
            },
            search: SearchConfig {
                suggestion_limit: number(
                    "CATALOG_SUGGESTION_LIMIT",
                    defaults.search.suggestion_limit as u64,
                )? as usize,
            },
        })
    }
}
