//! Runtime settings loaded via OrthoConfig.
//!
//! Settings come from CLI flags, `SEARCH_*`/`SERVER_*` environment variables
//! and configuration files. Absent values fall back to the defaults below.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::{DEFAULT_MAX_PAGE_SIZE, PageLimits, PageLimitsError};
use serde::Deserialize;

use crate::domain::SearchPolicy;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5002;

/// Paging and filtering knobs for user search.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SEARCH")]
pub struct SearchSettings {
    /// Upper bound on `rowCount`.
    pub max_page_size: Option<u32>,
    /// Page size used when `rowCount` is absent.
    pub default_page_size: Option<u32>,
    /// Drop the requester's own account from results.
    #[ortho_config(default = false)]
    pub exclude_requester: bool,
}

impl SearchSettings {
    /// Build the search policy, rejecting inconsistent page sizes.
    ///
    /// # Examples
    /// ```
    /// use social_backend::config::SearchSettings;
    ///
    /// let settings = SearchSettings {
    ///     max_page_size: Some(50),
    ///     default_page_size: Some(20),
    ///     exclude_requester: true,
    /// };
    /// let policy = settings.policy().expect("consistent limits");
    /// assert_eq!(policy.limits().max_page_size(), 50);
    /// assert!(policy.exclude_requester());
    /// ```
    pub fn policy(&self) -> Result<SearchPolicy, PageLimitsError> {
        let max = self.max_page_size.unwrap_or(DEFAULT_MAX_PAGE_SIZE);
        let default = self
            .default_page_size
            .unwrap_or_else(|| max.min(DEFAULT_MAX_PAGE_SIZE));
        let limits = PageLimits::new(default, max)?;
        Ok(SearchPolicy::new(limits, self.exclude_requester))
    }
}

/// Listener and storage settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVER")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// PostgreSQL connection string. Without it the server runs against an
    /// empty in-memory directory.
    pub database_url: Option<String>,
    /// Maximum open database connections.
    pub database_pool_size: Option<u32>,
    /// Seconds a search waits for a database connection.
    pub database_checkout_timeout_secs: Option<u64>,
}

impl ServerSettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host(), self.port()).parse()
    }

    /// Connection string, if storage is configured.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Pool options for the configured database, if any.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let mut config = PoolConfig::new(self.database_url()?);
        if let Some(size) = self.database_pool_size {
            config = config.with_max_size(size);
        }
        if let Some(secs) = self.database_checkout_timeout_secs {
            config = config.with_checkout_timeout(Duration::from_secs(secs));
        }
        Some(config)
    }
}
