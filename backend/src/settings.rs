//! Runtime settings loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `TRACKER_*` environment variables and
//! the defaults below.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Settings that cannot be turned into a usable server configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid host '{host}': expected an IP address")]
    InvalidHost { host: String },
    #[error("pool_max_size must be at least 1")]
    EmptyPool,
}

/// Server and storage settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRACKER")]
pub struct TrackerSettings {
    /// PostgreSQL connection URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Address to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl TrackerSettings {
    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Pool size, rejecting zero.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE) {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }

    /// Socket address built from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host();
        let ip: IpAddr = host.parse().map_err(|_| SettingsError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }
}
