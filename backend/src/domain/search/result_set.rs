//! Positionally indexed page of ranked usernames.

use pagination::PageWindow;
use serde::ser::{Serialize, Serializer};

use crate::domain::Username;

use super::CandidateRecord;

/// Usernames of one result page, in ranked order.
///
/// Serialises as a JSON object keyed by position (`"0"`, `"1"`, ...) so
/// existing clients keep indexing results by string keys. An empty page is an
/// empty object, never `null`.
///
/// # Examples
/// ```
/// use social_backend::domain::search::RankedResultSet;
///
/// let empty = RankedResultSet::default();
/// assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankedResultSet(Vec<Username>);

impl RankedResultSet {
    /// Slice ranked candidates by `window` and keep their usernames.
    pub fn assemble(ranked: &[CandidateRecord], window: PageWindow) -> Self {
        Self(
            window
                .apply(ranked)
                .iter()
                .map(|candidate| candidate.account().username().clone())
                .collect(),
        )
    }

    /// Number of entries on the page.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the page holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Usernames in ranked order.
    pub fn usernames(&self) -> &[Username] {
        &self.0
    }
}

impl From<Vec<Username>> for RankedResultSet {
    fn from(value: Vec<Username>) -> Self {
        Self(value)
    }
}

impl Serialize for RankedResultSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(
            self.0
                .iter()
                .enumerate()
                .map(|(position, username)| (position.to_string(), username.as_ref())),
        )
    }
}
