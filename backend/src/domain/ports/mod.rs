//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod follow_graph;
mod identity_resolver;
mod user_directory;
mod user_search_query;

#[cfg(test)]
pub use follow_graph::MockFollowGraph;
pub use follow_graph::{FollowFacts, FollowGraph};
#[cfg(test)]
pub use identity_resolver::MockIdentityResolver;
pub use identity_resolver::{FIXTURE_ACCESS_TOKEN, FixtureIdentityResolver, IdentityResolver};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserDirectoryError};
#[cfg(test)]
pub use user_search_query::MockUserSearchQuery;
pub use user_search_query::{FixtureUserSearchQuery, UserSearchQuery};
