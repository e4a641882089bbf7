//! Offset pagination primitives shared by backend search endpoints.
//!
//! Endpoints accept raw, signed `offset` and `rowCount` values from clients.
//! [`PageRequest`] captures those raw values untouched, [`PageLimits`] holds
//! the server-side policy (default and maximum page size), and
//! [`PageRequest::clamp`] turns the pair into a [`PageWindow`] that can be
//! applied to any ordered slice without panicking.
//!
//! Clamping never fails:
//! - a negative offset is treated as zero;
//! - an offset beyond the data yields an empty page;
//! - a row count above the maximum is reduced to the maximum;
//! - a row count of zero or below yields an empty page.

mod limits;
mod request;
mod window;

pub use limits::{DEFAULT_MAX_PAGE_SIZE, PageLimits, PageLimitsError};
pub use request::PageRequest;
pub use window::PageWindow;
