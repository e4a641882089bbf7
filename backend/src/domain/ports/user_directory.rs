//! Port abstraction for reading the user directory.
//!
//! The search core scans the directory through this read-only port. Adapters
//! must answer from a consistent snapshot for the duration of one call.

use async_trait::async_trait;

use crate::domain::UserAccount;
use crate::domain::search::SearchText;

use super::define_port_error;

define_port_error! {
    /// Storage errors raised by directory and follow graph adapters.
    pub enum UserDirectoryError {
        /// Storage could not be reached.
        Connection { message: String } => "user directory connection failed: {message}",
        /// A read failed during execution.
        Query { message: String } => "user directory query failed: {message}",
    }
}

/// Read access to searchable accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Return every account whose username or display name contains `text`,
    /// ignoring case. An empty text returns the whole directory.
    ///
    /// Adapters may return accounts in any order and should not return the
    /// same account twice; callers still deduplicate by identifier.
    async fn match_users(&self, text: &SearchText) -> Result<Vec<UserAccount>, UserDirectoryError>;
}
