//! Driving port mapping an authorization credential to a requester.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate a request before any search runs, without knowing (or
//! importing) the backing infrastructure.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, UserId};

/// Domain use-case port for resolving request credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Return the identifier of the account owning `token`.
    ///
    /// Unknown tokens yield [`crate::domain::ErrorCode::Unauthorized`].
    async fn resolve(&self, token: &AccessToken) -> Result<UserId, Error>;
}

/// Development resolver accepting a single well-known token.
///
/// `dev-token` resolves to account `1`; anything else is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityResolver;

/// Token accepted by [`FixtureIdentityResolver`].
pub const FIXTURE_ACCESS_TOKEN: &str = "dev-token";

#[async_trait]
impl IdentityResolver for FixtureIdentityResolver {
    async fn resolve(&self, token: &AccessToken) -> Result<UserId, Error> {
        if token.expose() == FIXTURE_ACCESS_TOKEN {
            UserId::new(1).map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
