//! Social-relevance ordering of matched candidates.

use std::cmp::Ordering;

use crate::domain::{UserAccount, UserId};

/// Matched account enriched with the follow facts needed for ranking.
///
/// Built per search call and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    account: UserAccount,
    followed: bool,
    follower_count: u64,
}

impl CandidateRecord {
    /// Attach follow facts to an account.
    pub fn new(account: UserAccount, followed: bool, follower_count: u64) -> Self {
        Self {
            account,
            followed,
            follower_count,
        }
    }

    /// Underlying account.
    pub fn account(&self) -> &UserAccount {
        &self.account
    }

    /// Account identifier.
    pub fn id(&self) -> UserId {
        self.account.id()
    }

    /// Whether the requester follows this account.
    pub fn is_followed(&self) -> bool {
        self.followed
    }

    /// Number of followers the account has.
    pub fn follower_count(&self) -> u64 {
        self.follower_count
    }

    /// Relevance comparison: followed first, then more followers, then lower
    /// identifier.
    pub fn cmp_relevance(&self, other: &Self) -> Ordering {
        other
            .followed
            .cmp(&self.followed)
            .then_with(|| other.follower_count.cmp(&self.follower_count))
            .then_with(|| self.id().cmp(&other.id()))
    }
}

/// Sort candidates into their total relevance order.
///
/// Identifiers are unique, so the order is total and repeated calls over the
/// same data produce the same sequence.
pub fn rank(candidates: &mut [CandidateRecord]) {
    candidates.sort_by(CandidateRecord::cmp_relevance);
}
