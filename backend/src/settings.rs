//! Service settings loaded via OrthoConfig.
//!
//! Every field may come from a `--kebab-case` flag, a `PARKING_*`
//! environment variable or a configuration file. Unset fields fall back to
//! the facility defaults: 20 car and 10 motorcycle cells, plates issued up to
//! 999 and 99, and a five second repository deadline.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{CellCapacity, LastIssuedNumbers, RepositoryDeadline, SequenceNumber};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration of the parking service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PARKING")]
pub struct ParkingSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; when unset the service keeps records in memory.
    pub database_url: Option<String>,
    /// Connections kept by the PostgreSQL pool.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    #[ortho_config(default = 20)]
    pub car_cells: u32,
    #[ortho_config(default = 10)]
    pub motorcycle_cells: u32,
    /// Highest car plate sequence number issued so far.
    #[ortho_config(default = 999)]
    pub car_last_issued: u32,
    /// Highest motorcycle plate sequence number issued so far.
    #[ortho_config(default = 99)]
    pub motorcycle_last_issued: u32,
    /// Upper bound for a single repository call.
    #[ortho_config(default = 5_000)]
    pub repository_timeout_ms: u64,
}

/// Settings that parse but cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value}: {message}")]
    BindAddr { value: String, message: String },
    #[error("repository timeout must be positive")]
    ZeroTimeout,
}

impl ParkingSettings {
    /// Parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn capacity(&self) -> CellCapacity {
        CellCapacity {
            car: self.car_cells,
            motorcycle: self.motorcycle_cells,
        }
    }

    pub fn last_issued(&self) -> LastIssuedNumbers {
        LastIssuedNumbers {
            car: SequenceNumber::new(self.car_last_issued),
            motorcycle: SequenceNumber::new(self.motorcycle_last_issued),
        }
    }

    /// Deadline applied to each repository call.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] for a zero timeout.
    pub fn repository_deadline(&self) -> Result<RepositoryDeadline, SettingsError> {
        match self.repository_timeout_ms {
            0 => Err(SettingsError::ZeroTimeout),
            ms => Ok(RepositoryDeadline::new(Duration::from_millis(ms))),
        }
    }
}
