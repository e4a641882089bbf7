//! Builders wiring domain ports to their adapters.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use social_backend::domain::UserSearchService;
use social_backend::domain::ports::{FixtureIdentityResolver, IdentityResolver, UserSearchQuery};
use social_backend::inbound::http::state::HttpState;
use social_backend::outbound::memory::{InMemoryUserDirectory, StaticIdentityResolver};
use social_backend::outbound::persistence::{DieselIdentityResolver, DieselUserDirectory};

use super::ServerConfig;

/// Build HTTP state from configuration.
///
/// Uses the Diesel adapters when a pool is configured; otherwise an empty
/// in-memory directory. Without a pool, debug builds accept the fixture
/// development token and release builds accept no credential at all.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let policy = config.search_policy;
    let (identity, search): (Arc<dyn IdentityResolver>, Arc<dyn UserSearchQuery>) =
        match &config.db_pool {
            Some(pool) => {
                let directory = Arc::new(DieselUserDirectory::new(pool.clone()));
                (
                    Arc::new(DieselIdentityResolver::new(pool.clone())),
                    Arc::new(UserSearchService::new(directory.clone(), directory, policy)),
                )
            }
            None => {
                let directory = Arc::new(InMemoryUserDirectory::default());
                (
                    fallback_identity(cfg!(debug_assertions)),
                    Arc::new(UserSearchService::new(directory.clone(), directory, policy)),
                )
            }
        };
    web::Data::new(HttpState::new(identity, search))
}

/// Identity resolver for servers running without storage.
fn fallback_identity(allow_dev_token: bool) -> Arc<dyn IdentityResolver> {
    if allow_dev_token {
        warn!("no database configured; accepting the development access token");
        Arc::new(FixtureIdentityResolver)
    } else {
        warn!("no database configured; every credential will be rejected");
        Arc::new(StaticIdentityResolver::default())
    }
}
