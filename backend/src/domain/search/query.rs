//! Typed search request validated once at the inbound boundary.

use pagination::PageRequest;

/// Free-text query as typed by the client plus its case-folded form.
///
/// An empty query is valid and matches every account.
///
/// # Examples
/// ```
/// use social_backend::domain::search::SearchText;
///
/// let text = SearchText::new("AbC");
/// assert_eq!(text.as_str(), "AbC");
/// assert_eq!(text.folded(), "abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchText {
    raw: String,
    folded: String,
}

impl SearchText {
    /// Capture a query string. The text is not trimmed; whitespace is part
    /// of the substring to match.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    /// Query as received.
    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }

    /// Lower-cased query used for case-insensitive comparison.
    pub fn folded(&self) -> &str {
        self.folded.as_str()
    }

    /// Whether the query matches every account.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Character length of the query, for logging.
    pub fn char_len(&self) -> usize {
        self.raw.chars().count()
    }
}

/// One search invocation: what to look for and which page to return.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRequest {
    text: SearchText,
    page: PageRequest,
}

impl SearchRequest {
    /// Build a request from a raw query and raw pagination values.
    pub fn new(text: impl Into<String>, page: PageRequest) -> Self {
        Self {
            text: SearchText::new(text),
            page,
        }
    }

    /// Query text.
    pub fn text(&self) -> &SearchText {
        &self.text
    }

    /// Raw pagination values, clamped later by the service policy.
    pub fn page(&self) -> PageRequest {
        self.page
    }
}
