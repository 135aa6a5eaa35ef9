//! Configuration loading and representation.
//!
//! Everything comes from environment variables with logged defaults:
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `TODO_BIND_ADDR` | `0.0.0.0:8080` | HTTP listen address |
//! | `USE_PERSISTENT_STORES` | `false` | use Postgres instead of the in-memory store |
//! | `DATABASE_URL` | (required when persistent) | Postgres connection string |
//! | `TODO_COLLECTION` | `todos` | collection (table) name |
//! | `TODO_ERROR_CODES` | `strict` | `strict` (409/404) or `legacy` (all failures 500) |

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_COLLECTION: &str = "todos";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("{0} must be set when USE_PERSISTENT_STORES=true")]
    Missing(&'static str),
}

/// Which item store backs the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgres { database_url: String },
}

/// How repository failures map onto HTTP status codes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ErrorCodePolicy {
    /// Duplicate title → 409, unknown id → 404, store failure → 500.
    #[default]
    Strict,
    /// Every repository failure → 500 with the error message.
    Legacy,
}

impl FromStr for ErrorCodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(ErrorCodePolicy::Strict),
            "legacy" => Ok(ErrorCodePolicy::Legacy),
            other => Err(format!("expected 'strict' or 'legacy', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    pub collection: String,
    pub error_codes: ErrorCodePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            store: StoreBackend::InMemory,
            collection: DEFAULT_COLLECTION.to_string(),
            error_codes: ErrorCodePolicy::Strict,
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_or_default(&lookup, "TODO_BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let persistent: bool = parse_or_default(&lookup, "USE_PERSISTENT_STORES", "false")?;
        let error_codes = parse_or_default(&lookup, "TODO_ERROR_CODES", "strict")?;

        let collection = lookup("TODO_COLLECTION")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        let store = if persistent {
            let database_url = lookup("DATABASE_URL")
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing("DATABASE_URL"))?;
            StoreBackend::Postgres { database_url }
        } else {
            StoreBackend::InMemory
        };

        Ok(Self {
            bind_addr,
            store,
            collection,
            error_codes,
        })
    }
}

fn parse_or_default<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = match lookup(key) {
        Some(v) => v,
        None => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    };

    raw.trim().parse().map_err(|e: T::Err| {
        warn!("invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            message: e.to_string(),
        }
    })
}
