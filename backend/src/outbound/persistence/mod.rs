//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the directory, follow graph and identity
//! ports backed by PostgreSQL via `diesel-async` and `bb8` pooling.
//!
//! Diesel row structs (`models.rs`) and table definitions (`schema.rs`) are
//! internal; only domain types cross the module boundary.
//!
//! # Example
//!
//! ```ignore
//! use social_backend::outbound::persistence::{DbPool, DieselUserDirectory, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/social")).await?;
//! let directory = DieselUserDirectory::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_identity_resolver;
mod diesel_user_directory;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_identity_resolver::DieselIdentityResolver;
pub use diesel_user_directory::DieselUserDirectory;
pub use migrations::{MigrationError, apply_pending_migrations, run_pending_migrations};
pub use pool::{DEFAULT_CHECKOUT_TIMEOUT, DEFAULT_POOL_SIZE, DbPool, PoolConfig, PoolError};
