//! Raw pagination parameters as supplied by a client.

use serde::{Deserialize, Serialize};

use crate::{PageLimits, PageWindow};

/// Client-supplied offset and row count before any clamping.
///
/// Values are kept signed and unvalidated so adapters can accept whatever
/// integers clients send; [`PageRequest::clamp`] is the only place that
/// interprets them.
///
/// # Examples
/// ```
/// use pagination::{PageLimits, PageRequest};
///
/// let window = PageRequest::new(-20, Some(200)).clamp(PageLimits::default());
/// assert_eq!(window.offset(), 0);
/// assert_eq!(window.limit(), 100);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    offset: i64,
    row_count: Option<i64>,
}

impl PageRequest {
    /// Capture raw pagination values. `row_count` is `None` when the client
    /// did not send one.
    #[must_use]
    pub const fn new(offset: i64, row_count: Option<i64>) -> Self {
        Self { offset, row_count }
    }

    /// Raw offset as received.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }

    /// Raw row count as received, if any.
    #[must_use]
    pub const fn row_count(&self) -> Option<i64> {
        self.row_count
    }

    /// Normalise the raw values into a bounded window.
    ///
    /// Negative offsets become zero. A missing row count falls back to the
    /// policy default; counts above the maximum are reduced to it and counts
    /// of zero or below select nothing.
    #[must_use]
    pub fn clamp(self, limits: PageLimits) -> PageWindow {
        let offset = non_negative(self.offset);
        let requested = self
            .row_count
            .unwrap_or_else(|| i64::from(limits.default_page_size()));
        let limit = non_negative(requested.min(i64::from(limits.max_page_size())));
        PageWindow::new(offset, limit)
    }
}

fn non_negative(value: i64) -> usize {
    if value <= 0 {
        0
    } else {
        usize::try_from(value).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    //! Clamp behaviour for edge-case client inputs.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::defaults(0, None, 0, 100)]
    #[case::negative_offset(-20, Some(100), 0, 100)]
    #[case::oversized_page(0, Some(200), 0, 100)]
    #[case::exact_max(0, Some(100), 0, 100)]
    #[case::small_page(3, Some(7), 3, 7)]
    #[case::zero_rows(0, Some(0), 0, 0)]
    #[case::negative_rows(5, Some(-3), 5, 0)]
    #[case::extreme_offset(i64::MAX, Some(10), usize::try_from(i64::MAX).unwrap_or(usize::MAX), 10)]
    #[case::extreme_negative_offset(i64::MIN, Some(10), 0, 10)]
    fn clamps_raw_values(
        #[case] offset: i64,
        #[case] row_count: Option<i64>,
        #[case] expected_offset: usize,
        #[case] expected_limit: usize,
    ) {
        let window = PageRequest::new(offset, row_count).clamp(PageLimits::default());
        assert_eq!(window.offset(), expected_offset);
        assert_eq!(window.limit(), expected_limit);
    }

    #[rstest]
    fn missing_row_count_uses_policy_default() {
        let limits = PageLimits::new(25, 50).unwrap_or_default();
        let window = PageRequest::new(0, None).clamp(limits);
        assert_eq!(window.limit(), 25);
    }

    #[rstest]
    fn negative_offset_clamps_to_same_window_as_zero() {
        let limits = PageLimits::default();
        assert_eq!(
            PageRequest::new(-20, Some(10)).clamp(limits),
            PageRequest::new(0, Some(10)).clamp(limits)
        );
    }
}
