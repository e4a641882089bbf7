//! User directory search backend.
//!
//! Layers follow a hexagonal layout: [`domain`] holds the search use-case and
//! its ports, [`inbound`] adapts HTTP requests onto those ports, and
//! [`outbound`] provides storage adapters.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
