//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;

use stockroom_infra::DEFAULT_COLLECTION;
use stockroom_infra::collection::validate_collection_id;
use thiserror::Error;

pub const BIND_ADDR_ENV: &str = "STOCKROOM_BIND_ADDR";
pub const COLLECTION_ENV: &str = "STOCKROOM_COLLECTION";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const DB_MAX_CONNECTIONS_ENV: &str = "STOCKROOM_DB_MAX_CONNECTIONS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    BindAddr { var: &'static str, value: String },

    #[error("{var} is not a valid collection identifier: {value}")]
    Collection { var: &'static str, value: String },

    #[error("{var} must be a positive integer, got {value}")]
    MaxConnections { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub collection: String,
    /// Postgres connection string; `None` selects the in-memory collection.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the environment in
    /// production, a map in tests). Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_addr = get(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.trim().parse().map_err(|_| ConfigError::BindAddr {
            var: BIND_ADDR_ENV,
            value: raw_addr.clone(),
        })?;

        let collection = get(COLLECTION_ENV).unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        validate_collection_id(&collection).map_err(|_| ConfigError::Collection {
            var: COLLECTION_ENV,
            value: collection.clone(),
        })?;

        let database_url = get(DATABASE_URL_ENV);
        if database_url.is_none() {
            tracing::warn!("{DATABASE_URL_ENV} not set; using in-memory collection");
        }

        let db_max_connections = match get(DB_MAX_CONNECTIONS_ENV) {
            None => DEFAULT_DB_MAX_CONNECTIONS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::MaxConnections {
                        var: DB_MAX_CONNECTIONS_ENV,
                        value: raw,
                    });
                }
            },
        };

        Ok(Self {
            bind_addr,
            collection,
            database_url,
            db_max_connections,
        })
    }
}
