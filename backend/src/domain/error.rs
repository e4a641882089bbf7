//! Transport-agnostic failure payload for the search use-case.
//!
//! Inbound adapters decide how an [`ErrorCode`] is rendered; the domain only
//! classifies the failure, describes it, and records which request raised it.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::TraceId;

/// Closed set of failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed request parameters or headers.
    InvalidRequest,
    /// The credential did not resolve to an account.
    Unauthorized,
    /// The addressed resource does not exist.
    NotFound,
    /// A backing store could not be reached.
    ServiceUnavailable,
    /// Anything else; never shown verbatim to clients.
    InternalError,
}

impl ErrorCode {
    /// Wire identifier, identical to the serialised form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::ServiceUnavailable => "service_unavailable",
            Self::InternalError => "internal_error",
        }
    }

    /// Message used when a caller supplies a blank one.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request",
            Self::Unauthorized => "Invalid credentials",
            Self::NotFound => "Not found",
            Self::ServiceUnavailable => "Service unavailable",
            Self::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure with an optional structured payload.
///
/// ## Invariants
/// - `message` is never blank; blank input is replaced with
///   [`ErrorCode::default_message`].
/// - `trace_id` is the identifier of the request in scope at construction,
///   unless overridden with [`Error::with_trace_id`].
///
/// # Examples
/// ```
/// use social_backend::domain::{Error, ErrorCode};
///
/// let err = Error::unauthorized("  ");
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
/// assert_eq!(err.message(), "Invalid credentials");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ErrorPayload", into = "ErrorPayload")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<TraceId>,
    details: Option<Value>,
}

/// Reasons a serialised error payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorPayloadError {
    /// `message` was blank.
    #[error("error message must not be blank")]
    BlankMessage,
    /// `traceId` was not a UUID.
    #[error("trace identifier is not a UUID: {0}")]
    MalformedTraceId(String),
}

impl Error {
    /// Classify a failure, capturing the current [`TraceId`] if any.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.default_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current(),
            details: None,
        }
    }

    /// Failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Request the error belongs to.
    pub fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    /// Structured context such as the offending field.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attribute the error to a specific request.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Attach structured context.
    ///
    /// ```
    /// use serde_json::json;
    /// use social_backend::domain::Error;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({"field": "offset"}));
    /// assert_eq!(err.details(), Some(&json!({"field": "offset"})));
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// [`ErrorCode::InvalidRequest`] shorthand.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// [`ErrorCode::Unauthorized`] shorthand.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// [`ErrorCode::NotFound`] shorthand.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// [`ErrorCode::ServiceUnavailable`] shorthand.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// [`ErrorCode::InternalError`] shorthand.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

/// Serialised form of [`Error`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorPayload {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorPayload {
    fn from(error: Error) -> Self {
        Self {
            code: error.code,
            message: error.message,
            trace_id: error.trace_id.map(|id| id.to_string()),
            details: error.details,
        }
    }
}

impl TryFrom<ErrorPayload> for Error {
    type Error = ErrorPayloadError;

    fn try_from(payload: ErrorPayload) -> Result<Self, Self::Error> {
        if payload.message.trim().is_empty() {
            return Err(ErrorPayloadError::BlankMessage);
        }
        let trace_id = payload
            .trace_id
            .map(|raw| {
                raw.parse::<TraceId>()
                    .map_err(|_| ErrorPayloadError::MalformedTraceId(raw))
            })
            .transpose()?;
        Ok(Self {
            code: payload.code,
            message: payload.message,
            trace_id,
            details: payload.details,
        })
    }
}
