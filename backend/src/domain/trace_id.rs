//! Correlation identifier carried by every search request.
//!
//! The identifier lives in tokio task-local storage for the duration of a
//! request, so [`crate::domain::Error`] values built anywhere below the HTTP
//! adapter pick it up without threading it through every call. Task locals
//! do not follow `tokio::spawn` or `spawn_blocking`; wrap such work in
//! [`TraceId::scope`] again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Header carrying the trace identifier on requests and responses.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// Where a request's trace identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOrigin {
    /// An upstream caller supplied a well-formed identifier.
    Propagated,
    /// No usable identifier arrived, so a fresh one was minted.
    Generated,
}

impl TraceOrigin {
    /// Lower-case label used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Propagated => "propagated",
            Self::Generated => "generated",
        }
    }
}

/// UUID correlating logs, error bodies, and the `trace-id` response header.
///
/// # Examples
/// ```
/// use social_backend::TraceId;
///
/// let id: TraceId = "7f4c1a52-8d0e-4a57-9f6b-0a4e2f1f3c11".parse().unwrap();
/// assert_eq!(id.to_string(), "7f4c1a52-8d0e-4a57-9f6b-0a4e2f1f3c11");
/// assert!(TraceId::current().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint a random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse an inbound header value when it parses as a UUID, otherwise
    /// mint a fresh identifier.
    ///
    /// Malformed values are dropped rather than rejected; a bad correlation
    /// header never fails a search.
    #[must_use]
    pub fn adopt_or_generate(inbound: Option<&str>) -> (Self, TraceOrigin) {
        inbound
            .and_then(|raw| raw.trim().parse().ok())
            .map_or_else(
                || (Self::generate(), TraceOrigin::Generated),
                |id| (id, TraceOrigin::Propagated),
            )
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Wrapped UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl From<Uuid> for TraceId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const UPSTREAM: &str = "7f4c1a52-8d0e-4a57-9f6b-0a4e2f1f3c11";

    #[rstest]
    #[tokio::test]
    async fn scope_exposes_identifier_only_inside() {
        let id = TraceId::generate();
        assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
        assert_eq!(TraceId::current(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn nested_scopes_shadow_outer_identifier() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let seen = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (nested, TraceId::current())
        })
        .await;
        assert_eq!(seen, (Some(inner), Some(outer)));
    }

    #[rstest]
    #[case(Some(UPSTREAM))]
    #[case(Some("  7f4c1a52-8d0e-4a57-9f6b-0a4e2f1f3c11 "))]
    fn adopts_well_formed_inbound_values(#[case] inbound: Option<&str>) {
        let (id, origin) = TraceId::adopt_or_generate(inbound);
        assert_eq!(origin, TraceOrigin::Propagated);
        assert_eq!(id.to_string(), UPSTREAM);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("not-a-uuid"))]
    fn generates_when_inbound_is_unusable(#[case] inbound: Option<&str>) {
        let (id, origin) = TraceId::adopt_or_generate(inbound);
        assert_eq!(origin, TraceOrigin::Generated);
        assert_ne!(id.to_string(), UPSTREAM);
    }

    #[rstest]
    fn displays_lower_case_hyphenated_form() {
        let id: TraceId = UPSTREAM.to_uppercase().parse().expect("uuid parses");
        assert_eq!(id.to_string(), UPSTREAM);
        assert_eq!(TraceId::from(*id.as_uuid()), id);
    }
}
