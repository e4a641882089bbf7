//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{IdentityResolver, UserSearchQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityResolver>,
    pub search: Arc<dyn UserSearchQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use social_backend::domain::ports::{FixtureIdentityResolver, FixtureUserSearchQuery};
    /// use social_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureIdentityResolver),
    ///     Arc::new(FixtureUserSearchQuery),
    /// );
    /// let _identity = state.identity.clone();
    /// ```
    pub fn new(identity: Arc<dyn IdentityResolver>, search: Arc<dyn UserSearchQuery>) -> Self {
        Self { identity, search }
    }
}

impl Default for HttpState {
    /// Fixture-backed state for development and doc tests.
    fn default() -> Self {
        use crate::domain::ports::{FixtureIdentityResolver, FixtureUserSearchQuery};

        Self::new(
            Arc::new(FixtureIdentityResolver),
            Arc::new(FixtureUserSearchQuery),
        )
    }
}
