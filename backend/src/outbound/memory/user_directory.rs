//! In-memory user directory and follow graph over ordered maps and sets.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use crate::domain::ports::{FollowFacts, FollowGraph, UserDirectory, UserDirectoryError};
use crate::domain::search::SearchText;
use crate::domain::{UserAccount, UserId};

/// Immutable directory snapshot held in memory.
///
/// Accounts are keyed by identifier, so inserting the same id twice keeps the
/// last account. Follow edges form a set; repeated edges count once.
///
/// # Examples
/// ```
/// use social_backend::domain::{UserAccount, UserId};
/// use social_backend::outbound::memory::InMemoryUserDirectory;
///
/// let ada = UserAccount::try_from_parts(1, "ada", "Ada").expect("valid");
/// let grace = UserAccount::try_from_parts(2, "grace", "Grace").expect("valid");
/// let directory = InMemoryUserDirectory::new([ada, grace])
///     .with_follow(UserId::new(1).expect("id"), UserId::new(2).expect("id"));
/// assert_eq!(directory.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    accounts: BTreeMap<UserId, UserAccount>,
    follows: BTreeSet<(UserId, UserId)>,
}

impl InMemoryUserDirectory {
    /// Build a directory from accounts with no follow edges.
    pub fn new(accounts: impl IntoIterator<Item = UserAccount>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|account| (account.id(), account))
                .collect(),
            follows: BTreeSet::new(),
        }
    }

    /// Add a `follower -> followed` edge.
    #[must_use]
    pub fn with_follow(mut self, follower: UserId, followed: UserId) -> Self {
        self.follows.insert((follower, followed));
        self
    }

    /// Add several edges at once.
    #[must_use]
    pub fn with_follows(mut self, edges: impl IntoIterator<Item = (UserId, UserId)>) -> Self {
        self.follows.extend(edges);
        self
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the directory holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn followers_of(&self, user: UserId) -> u64 {
        let count = self
            .follows
            .iter()
            .filter(|(_, followed)| *followed == user)
            .count();
        u64::try_from(count).unwrap_or(u64::MAX)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn match_users(&self, text: &SearchText) -> Result<Vec<UserAccount>, UserDirectoryError> {
        Ok(self
            .accounts
            .values()
            .filter(|account| text.matches(account))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FollowGraph for InMemoryUserDirectory {
    async fn is_following(
        &self,
        follower: UserId,
        followed: UserId,
    ) -> Result<bool, UserDirectoryError> {
        Ok(self.follows.contains(&(follower, followed)))
    }

    async fn follower_count(&self, user: UserId) -> Result<u64, UserDirectoryError> {
        Ok(self.followers_of(user))
    }

    async fn follow_facts(
        &self,
        requester: UserId,
        users: &[UserId],
    ) -> Result<Vec<FollowFacts>, UserDirectoryError> {
        let mut counts: BTreeMap<UserId, u64> = BTreeMap::new();
        for (_, followed) in &self.follows {
            *counts.entry(*followed).or_default() += 1;
        }
        Ok(users
            .iter()
            .map(|user| FollowFacts {
                followed: self.follows.contains(&(requester, *user)),
                follower_count: counts.get(user).copied().unwrap_or(0),
            })
            .collect())
    }
}
