//! Driving port for user directory search.
//!
//! Inbound adapters use this port to run a ranked, paginated search without
//! importing outbound persistence concerns. Production backs it with
//! [`crate::domain::UserSearchService`]; handler tests substitute a double.

use async_trait::async_trait;

use crate::domain::search::{RankedResultSet, SearchRequest};
use crate::domain::{Error, UserId};

/// Domain use-case port for searching users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSearchQuery: Send + Sync {
    /// Run `request` on behalf of `requester` and return one ranked page.
    async fn search(
        &self,
        requester: UserId,
        request: &SearchRequest,
    ) -> Result<RankedResultSet, Error>;
}

/// Query returning no matches, used before storage is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserSearchQuery;

#[async_trait]
impl UserSearchQuery for FixtureUserSearchQuery {
    async fn search(
        &self,
        _requester: UserId,
        _request: &SearchRequest,
    ) -> Result<RankedResultSet, Error> {
        Ok(RankedResultSet::default())
    }
}
