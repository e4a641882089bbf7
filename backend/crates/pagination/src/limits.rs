//! Server-side page size policy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest page a client may request unless configured otherwise.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

/// Errors raised when a page size policy is inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageLimitsError {
    /// The maximum page size must allow at least one row.
    #[error("maximum page size must be greater than zero")]
    ZeroMaxPageSize,
    /// The default page size must not exceed the maximum.
    #[error("default page size {default} exceeds maximum page size {max}")]
    DefaultExceedsMax {
        /// Configured default page size.
        default: u32,
        /// Configured maximum page size.
        max: u32,
    },
}

/// Default and maximum page sizes applied when clamping a [`crate::PageRequest`].
///
/// ## Invariants
/// - `max_page_size` is greater than zero.
/// - `default_page_size` is at most `max_page_size`.
///
/// # Examples
/// ```
/// use pagination::PageLimits;
///
/// let limits = PageLimits::new(20, 100).expect("consistent limits");
/// assert_eq!(limits.default_page_size(), 20);
/// assert_eq!(limits.max_page_size(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PageLimitsDto")]
pub struct PageLimits {
    default_page_size: u32,
    max_page_size: u32,
}

impl PageLimits {
    /// Validate and construct a page size policy.
    ///
    /// # Errors
    /// Returns [`PageLimitsError`] when the maximum is zero or the default
    /// exceeds the maximum.
    pub const fn new(default_page_size: u32, max_page_size: u32) -> Result<Self, PageLimitsError> {
        if max_page_size == 0 {
            return Err(PageLimitsError::ZeroMaxPageSize);
        }
        if default_page_size > max_page_size {
            return Err(PageLimitsError::DefaultExceedsMax {
                default: default_page_size,
                max: max_page_size,
            });
        }
        Ok(Self {
            default_page_size,
            max_page_size,
        })
    }

    /// Page size used when the client omits a row count.
    #[must_use]
    pub const fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// Upper bound applied to any requested row count.
    #[must_use]
    pub const fn max_page_size(&self) -> u32 {
        self.max_page_size
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_MAX_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageLimitsDto {
    default_page_size: u32,
    max_page_size: u32,
}

impl TryFrom<PageLimitsDto> for PageLimits {
    type Error = PageLimitsError;

    fn try_from(value: PageLimitsDto) -> Result<Self, Self::Error> {
        Self::new(value.default_page_size, value.max_page_size)
    }
}
