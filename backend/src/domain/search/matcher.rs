//! Case-insensitive substring matching over the user directory.

use std::collections::HashSet;

use crate::domain::UserAccount;

use super::SearchText;

impl SearchText {
    /// Whether `account` contains this text in its username or display name,
    /// ignoring case. The empty text matches everything.
    ///
    /// # Examples
    /// ```
    /// use social_backend::domain::UserAccount;
    /// use social_backend::domain::search::SearchText;
    ///
    /// let account = UserAccount::try_from_parts(1, "abcpopo", "Popo").unwrap();
    /// assert!(SearchText::new("ABC").matches(&account));
    /// assert!(!SearchText::new("cba").matches(&account));
    /// ```
    pub fn matches(&self, account: &UserAccount) -> bool {
        if self.is_empty() {
            return true;
        }
        let needle = self.folded();
        contains_folded(account.username().as_ref(), needle)
            || contains_folded(account.display_name().as_ref(), needle)
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Keep the accounts matching `text`, each at most once.
///
/// Adapters filter at the storage layer already; this pass enforces the
/// matching contract and drops duplicates by identifier, keeping the first
/// occurrence.
pub fn retain_matches(text: &SearchText, accounts: Vec<UserAccount>) -> Vec<UserAccount> {
    let mut seen = HashSet::with_capacity(accounts.len());
    accounts
        .into_iter()
        .filter(|account| text.matches(account))
        .filter(|account| seen.insert(account.id()))
        .collect()
}
