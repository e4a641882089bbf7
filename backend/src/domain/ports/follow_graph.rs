//! Port abstraction for read-only follow relationship facts.

use async_trait::async_trait;

use crate::domain::UserId;

use super::UserDirectoryError;

/// Relationship facts for one candidate, relative to a requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FollowFacts {
    /// Whether the requester follows the candidate.
    pub followed: bool,
    /// Number of distinct accounts following the candidate.
    pub follower_count: u64,
}

/// Read access to the follow graph.
///
/// Answers reflect graph state at call time; callers never cache them across
/// searches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowGraph: Send + Sync {
    /// Whether `follower` currently follows `followed`.
    async fn is_following(
        &self,
        follower: UserId,
        followed: UserId,
    ) -> Result<bool, UserDirectoryError>;

    /// Number of distinct accounts following `user`.
    async fn follower_count(&self, user: UserId) -> Result<u64, UserDirectoryError>;

    /// Facts for every id in `users`, returned in the same order.
    ///
    /// Each entry must agree with [`Self::is_following`] for `requester` and
    /// [`Self::follower_count`] for that id. Adapters answer the whole batch
    /// in a bounded number of reads instead of two per candidate.
    async fn follow_facts(
        &self,
        requester: UserId,
        users: &[UserId],
    ) -> Result<Vec<FollowFacts>, UserDirectoryError>;
}
