//! Token table resolver for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::ports::IdentityResolver;
use crate::domain::{AccessToken, Error, UserId};

/// Resolves tokens from a fixed map.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityResolver {
    tokens: HashMap<String, UserId>,
}

impl StaticIdentityResolver {
    /// Build a resolver from `(token, user)` pairs.
    pub fn new<T: Into<String>>(tokens: impl IntoIterator<Item = (T, UserId)>) -> Self {
        Self {
            tokens: tokens
                .into_iter()
                .map(|(token, user)| (token.into(), user))
                .collect(),
        }
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentityResolver {
    async fn resolve(&self, token: &AccessToken) -> Result<UserId, Error> {
        self.tokens
            .get(token.expose())
            .copied()
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}
