//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed directory, follow graph and identity
//!   resolver using Diesel.
//! - **memory**: deterministic in-process adapters for development and tests.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no ranking or paging logic.

pub mod memory;
pub mod persistence;
