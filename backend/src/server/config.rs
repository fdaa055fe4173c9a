//! HTTP server configuration object and helpers.

use course_enrollment::outbound::persistence::DbPool;
use std::net::SocketAddr;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_catalogue: bool,
}

impl ServerConfig {
    /// Construct a configuration that binds `bind_addr` and keeps data in
    /// memory until a pool is attached.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            seed_catalogue: false,
        }
    }

    /// Attach a database connection pool. Every repository port then uses
    /// its Diesel adapter.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Load the default catalogue before accepting traffic.
    #[must_use]
    pub fn with_seed_catalogue(mut self, seed: bool) -> Self {
        self.seed_catalogue = seed;
        self
    }
}
