//! Clamped, non-negative page window.

use serde::Serialize;

/// Half-open window `[offset, offset + limit)` over an ordered sequence.
///
/// Produced by [`crate::PageRequest::clamp`]. Applying a window never
/// extends past the end of the sequence.
///
/// # Examples
/// ```
/// use pagination::{PageLimits, PageRequest};
///
/// let rows = ["a", "b", "c", "d"];
/// let window = PageRequest::new(1, Some(2)).clamp(PageLimits::default());
/// assert_eq!(window.apply(&rows), &["b", "c"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    offset: usize,
    limit: usize,
}

impl PageWindow {
    pub(crate) const fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Number of leading rows skipped.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Maximum number of rows selected.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Exclusive end index, saturating instead of overflowing.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset.saturating_add(self.limit)
    }

    /// Select the rows covered by this window.
    #[must_use]
    pub fn apply<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = self.offset.min(rows.len());
        let end = self.end().min(rows.len());
        rows.get(start..end).unwrap_or_default()
    }
}
