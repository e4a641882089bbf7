//! User directory search and social-relevance ranking.
//!
//! Purpose: given a free-text query and a requesting identity, find matching
//! accounts and order them so already-followed accounts come first, then the
//! most followed ones, with the account identifier as the final tie-breaker.
//!
//! Public surface:
//! - [`SearchText`] / [`SearchRequest`]: typed request validated at the edge.
//! - [`CandidateRecord`] and [`rank`]: relevance ordering.
//! - [`RankedResultSet`]: one page of usernames keyed by position.
//! - [`UserSearchService`]: the driving port implementation.

mod matcher;
mod query;
mod ranking;
mod result_set;
mod service;

pub use matcher::retain_matches;
pub use query::{SearchRequest, SearchText};
pub use ranking::{CandidateRecord, rank};
pub use result_set::RankedResultSet;
pub use service::{SearchPolicy, UserSearchService};
