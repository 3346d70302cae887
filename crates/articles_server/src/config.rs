//! Environment-driven server configuration.
//!
//! # Invariants
//! - Blank variables behave as unset.
//! - Invalid values fail startup with the offending variable named.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "ARTICLES_DB_PATH";
pub const BIND_ADDR_VAR: &str = "ARTICLES_BIND_ADDR";
pub const LOG_LEVEL_VAR: &str = "ARTICLES_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "ARTICLES_LOG_DIR";

const DEFAULT_DB_PATH: &str = "articles.sqlite3";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                name,
                value,
                reason,
            } => write!(f, "invalid value `{value}` for {name}: {reason}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Rolling file logs go here when set; stderr otherwise.
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let bind_raw = read(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidValue {
                name: BIND_ADDR_VAR,
                value: bind_raw.clone(),
                reason: err.to_string(),
            })?;

        let log_level = read(LOG_LEVEL_VAR)
            .unwrap_or_else(|| articles_core::default_log_level().to_string());

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            log_dir: read(LOG_DIR_VAR),
        })
    }
}
