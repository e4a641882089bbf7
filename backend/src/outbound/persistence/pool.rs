//! bb8 pool of `diesel-async` PostgreSQL connections.
//!
//! Checkout is bounded by a timeout, so a stalled database turns into a
//! connection failure for one search instead of a hung request.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::info;

use crate::domain::ports::define_port_error;

/// Connections opened when no size is configured.
pub const DEFAULT_POOL_SIZE: u32 = 10;
/// Checkout wait when no timeout is configured.
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

define_port_error! {
    /// Failures raised while building or using the pool.
    pub enum PoolError {
        /// No connection became available in time.
        Checkout { message: String } => "connection checkout failed: {message}",
        /// The pool could not be created.
        Build { message: String } => "connection pool build failed: {message}",
    }
}

/// Pool sizing and timeout options.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use social_backend::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/social")
///     .with_max_size(4)
///     .with_checkout_timeout(Duration::from_secs(2));
/// assert_eq!(config.max_size(), 4);
/// assert_eq!(config.checkout_timeout(), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    checkout_timeout: Duration,
}

impl PoolConfig {
    /// Options for `database_url` with the default size and timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_POOL_SIZE,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Cap the number of open connections.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Bound how long a search waits for a connection.
    #[must_use]
    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }

    /// Connection string.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Maximum number of open connections.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Checkout timeout.
    pub fn checkout_timeout(&self) -> Duration {
        self.checkout_timeout
    }

    fn check(&self) -> Result<(), PoolError> {
        if self.database_url.trim().is_empty() {
            Err(PoolError::build("database URL is blank"))
        } else if self.max_size == 0 {
            Err(PoolError::build("pool size must be at least one"))
        } else if self.checkout_timeout.is_zero() {
            Err(PoolError::build("checkout timeout must be positive"))
        } else {
            Ok(())
        }
    }
}

/// Shared handle to the connection pool; clones are cheap.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Validate `config` and open the pool.
    ///
    /// # Errors
    /// [`PoolError::Build`] when the options are inconsistent or the first
    /// connection cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        config.check()?;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url());
        let inner = Pool::builder()
            .max_size(config.max_size())
            .connection_timeout(config.checkout_timeout())
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        info!(
            max_size = config.max_size(),
            checkout_timeout_ms = config.checkout_timeout().as_millis(),
            "user directory pool ready"
        );
        Ok(Self { inner })
    }

    /// Borrow a connection.
    ///
    /// # Errors
    /// [`PoolError::Checkout`] when none frees up within the timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
