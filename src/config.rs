//! Host configuration loaded from the process environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;

/// Errors produced while reading host configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `PORT` is set but not a valid port number.
    #[error("invalid PORT {value:?}")]
    InvalidPort { value: String },

    /// `SIMPLIFIED_BIND_ADDR` is set but not a socket address.
    #[error("invalid SIMPLIFIED_BIND_ADDR {value:?}")]
    InvalidBindAddr { value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostConfig {
    pub bind_addr: SocketAddr,
}

impl HostConfig {
    /// Read configuration from environment variables.
    ///
    /// `SIMPLIFIED_BIND_ADDR` wins over `PORT`; with neither set the host
    /// listens on `0.0.0.0:3000`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable is set but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(raw) = non_empty(lookup("SIMPLIFIED_BIND_ADDR")) {
            let bind_addr = raw.parse().map_err(|_| ConfigError::InvalidBindAddr { value: raw.clone() })?;
            return Ok(Self { bind_addr });
        }

        let port = match non_empty(lookup("PORT")) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort { value: raw.clone() })?,
            None => DEFAULT_PORT,
        };
        Ok(Self { bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port) })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}
