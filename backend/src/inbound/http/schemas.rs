//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The credential is unknown.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A storage dependency could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for a failed request.
///
/// Mirrors [`crate::domain::Error`] plus the `success` flag the HTTP adapter
/// adds to every failure body.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Always `false` for failures.
    #[schema(example = false)]
    success: bool,
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "missing required field: Authorization")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "rowCount", "code": "invalid_integer"}`.
    details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_every_domain_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        for code in [
            ErrorCode::InvalidRequest,
            ErrorCode::Unauthorized,
            ErrorCode::NotFound,
            ErrorCode::ServiceUnavailable,
            ErrorCode::InternalError,
        ] {
            assert!(schema_json.contains(code.as_str()), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("success"), "missing success flag");
        assert!(schema_json.contains("traceId"), "missing camelCase traceId");
    }
}
