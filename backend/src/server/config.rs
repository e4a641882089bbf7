//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use social_backend::domain::SearchPolicy;
use social_backend::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) search_policy: SearchPolicy,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration for the given listener and policy.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, search_policy: SearchPolicy) -> Self {
        Self {
            bind_addr,
            search_policy,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    ///
    /// Without a pool the server searches an empty in-memory directory and
    /// accepts only the development token.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(dead_code, reason = "Read by unit tests only")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
