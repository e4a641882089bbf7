//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed domain entities and the search use-case
//! independently of HTTP and persistence. Keep types immutable and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - UserAccount, UserId, Username, DisplayName: searchable account data.
//! - AccessToken: opaque credential from the `Authorization` header.
//! - search: matching, ranking, pagination, and the search service.

pub mod auth;
pub mod error;
pub mod ports;
pub mod search;
pub mod trace_id;
pub mod user;

pub use self::auth::{AccessToken, AccessTokenValidationError};
pub use self::error::{Error, ErrorCode, ErrorPayloadError};
pub use self::search::{SearchPolicy, UserSearchService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId, TraceOrigin};
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, USERNAME_MAX, UserAccount, UserId, UserValidationError, Username,
};
