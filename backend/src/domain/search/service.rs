//! User search service implementing the [`UserSearchQuery`] driving port.
//!
//! Control flow per call: clamp the page window, match candidates, attach
//! follow facts, rank, then slice the ranked list into one page. Each call is
//! independent; nothing is cached between searches.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageLimits;
use tracing::debug;

use crate::domain::ports::{FollowGraph, UserDirectory, UserDirectoryError, UserSearchQuery};
use crate::domain::{Error, UserAccount, UserId};

use super::{CandidateRecord, RankedResultSet, SearchRequest, rank, retain_matches};

/// Search behaviour configured at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchPolicy {
    limits: PageLimits,
    exclude_requester: bool,
}

impl SearchPolicy {
    /// Build a policy from page limits and the requester exclusion flag.
    pub fn new(limits: PageLimits, exclude_requester: bool) -> Self {
        Self {
            limits,
            exclude_requester,
        }
    }

    /// Default and maximum page sizes.
    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    /// Whether the requester is dropped from their own results.
    pub fn exclude_requester(&self) -> bool {
        self.exclude_requester
    }
}

/// Ranked user search over a directory and a follow graph.
#[derive(Clone)]
pub struct UserSearchService<D, G> {
    directory: Arc<D>,
    graph: Arc<G>,
    policy: SearchPolicy,
}

impl<D, G> UserSearchService<D, G> {
    /// Create a new service reading from the given ports.
    pub fn new(directory: Arc<D>, graph: Arc<G>, policy: SearchPolicy) -> Self {
        Self {
            directory,
            graph,
            policy,
        }
    }

    /// Active search policy.
    pub fn policy(&self) -> SearchPolicy {
        self.policy
    }
}

fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

impl<D, G> UserSearchService<D, G>
where
    D: UserDirectory,
    G: FollowGraph,
{
    async fn attach_follow_facts(
        &self,
        requester: UserId,
        accounts: Vec<UserAccount>,
    ) -> Result<Vec<CandidateRecord>, UserDirectoryError> {
        let ids: Vec<UserId> = accounts.iter().map(UserAccount::id).collect();
        let facts = self.graph.follow_facts(requester, &ids).await?;
        if facts.len() != accounts.len() {
            return Err(UserDirectoryError::query(format!(
                "follow graph answered {} of {} candidates",
                facts.len(),
                accounts.len()
            )));
        }
        Ok(accounts
            .into_iter()
            .zip(facts)
            .map(|(account, facts)| {
                CandidateRecord::new(account, facts.followed, facts.follower_count)
            })
            .collect())
    }
}

#[async_trait]
impl<D, G> UserSearchQuery for UserSearchService<D, G>
where
    D: UserDirectory,
    G: FollowGraph,
{
    async fn search(
        &self,
        requester: UserId,
        request: &SearchRequest,
    ) -> Result<RankedResultSet, Error> {
        let window = request.page().clamp(self.policy.limits());
        let text = request.text();

        let accounts = self
            .directory
            .match_users(text)
            .await
            .map_err(map_directory_error)?;
        let mut matches = retain_matches(text, accounts);
        if self.policy.exclude_requester() {
            matches.retain(|account| account.id() != requester);
        }
        let match_count = matches.len();

        // Ranking needs every candidate, but an empty window never needs any.
        if window.limit() == 0 || window.offset() >= match_count {
            debug!(
                requester = %requester,
                query_len = text.char_len(),
                match_count,
                offset = window.offset(),
                limit = window.limit(),
                "user search window is empty"
            );
            return Ok(RankedResultSet::default());
        }

        let mut candidates = self
            .attach_follow_facts(requester, matches)
            .await
            .map_err(map_directory_error)?;
        rank(&mut candidates);
        let page = RankedResultSet::assemble(&candidates, window);

        debug!(
            requester = %requester,
            query_len = text.char_len(),
            match_count,
            offset = window.offset(),
            limit = window.limit(),
            returned = page.len(),
            "user search completed"
        );
        Ok(page)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
