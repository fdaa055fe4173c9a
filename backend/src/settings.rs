//! Application settings loaded via OrthoConfig.
//!
//! Values layer from defaults, configuration files, `ENROLLMENT_*`
//! environment variables and command-line flags.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The host is not an IP address.
    #[error("host must be an IP address, got {host:?}")]
    InvalidHost {
        /// Rejected value.
        host: String,
    },
}

/// Server and storage settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ENROLLMENT")]
pub struct AppSettings {
    /// Listen address. Defaults to `0.0.0.0`.
    pub host: Option<String>,
    /// Listen port. Defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// Pool ceiling. Defaults to 10.
    pub db_max_connections: Option<u32>,
    /// Apply pending migrations at startup when a database is configured.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// Load the default course catalogue and demo accounts at startup.
    #[ortho_config(default = false)]
    pub seed_catalogue: bool,
}

impl AppSettings {
    /// Configured host, falling back to all interfaces.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to 8080.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidHost`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host();
        let ip: IpAddr = host.trim().parse().map_err(|_| SettingsError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }

    /// Non-blank database URL, if one is configured.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool ceiling, falling back to ten connections.
    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Whether startup applies migrations. Only meaningful with a database.
    #[must_use]
    pub fn run_migrations(&self) -> bool {
        self.run_migrations && self.database_url().is_some()
    }
}
