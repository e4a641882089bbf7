//! PostgreSQL-backed identity resolver.
//!
//! Looks the presented token up in `users.token`. Tokens are compared by
//! exact match; issuing and rotating them belongs to account management.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::IdentityResolver;
use crate::domain::{AccessToken, Error, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the identity resolver port.
#[derive(Clone)]
pub struct DieselIdentityResolver {
    pool: DbPool,
}

impl DieselIdentityResolver {
    /// Create a new resolver with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> Error {
    map_basic_pool_error(error, |message| {
        Error::service_unavailable(format!("identity store unavailable: {message}"))
    })
}

fn map_diesel_error(error: diesel::result::Error) -> Error {
    map_basic_diesel_error(
        error,
        |message| Error::internal(format!("identity store error: {message}")),
        |message| Error::service_unavailable(format!("identity store unavailable: {message}")),
    )
}

fn to_user_id(raw: Option<i64>) -> Result<UserId, Error> {
    let id = raw.ok_or_else(|| Error::unauthorized("invalid credentials"))?;
    UserId::new(id).map_err(|err| Error::internal(format!("invalid stored user id {id}: {err}")))
}

#[async_trait]
impl IdentityResolver for DieselIdentityResolver {
    async fn resolve(&self, token: &AccessToken) -> Result<UserId, Error> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: Option<i64> = users::table
            .filter(users::token.eq(token.expose()))
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        to_user_id(id)
    }
}
