//! In-process adapters backed by plain collections.

mod identity;
mod user_directory;

pub use identity::StaticIdentityResolver;
pub use user_directory::InMemoryUserDirectory;
