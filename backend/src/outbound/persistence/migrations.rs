//! Embedded schema migrations applied at start-up.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::define_port_error;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

define_port_error! {
    /// Errors raised while bringing the schema up to date.
    pub enum MigrationError {
        /// The migration connection could not be opened.
        Connection { message: String } => "failed to connect for migrations: {message}",
        /// A migration failed to apply.
        Apply { message: String } => "failed to apply migrations: {message}",
        /// The blocking migration task did not complete.
        Task { message: String } => "migration task aborted: {message}",
    }
}

/// Apply pending migrations, returning the versions that ran.
///
/// Blocks the current thread; async callers use [`run_pending_migrations`].
pub fn apply_pending_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| MigrationError::connection(err.to_string()))?;
    let applied: Vec<String> = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::apply(err.to_string()))?
        .into_iter()
        .map(|version| version.to_string())
        .collect();
    info!(count = applied.len(), "database migrations applied");
    Ok(applied)
}

/// Apply pending migrations on a blocking thread.
pub async fn run_pending_migrations(database_url: String) -> Result<Vec<String>, MigrationError> {
    tokio::task::spawn_blocking(move || apply_pending_migrations(&database_url))
        .await
        .map_err(|err| MigrationError::task(err.to_string()))?
}
