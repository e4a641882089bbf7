//! Request validation failures for the HTTP adapter.
//!
//! Each rejection is an `invalid_request` domain error whose `details` name
//! the offending field, a machine-readable violation code, and the rejected
//! value where echoing it is safe.

use std::fmt::Display;

use serde::Serialize;

use crate::domain::Error;

/// Machine-readable reason a request field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Violation {
    MissingField,
    InvalidInteger,
    InvalidQuery,
}

/// Name of a header or query parameter as the client spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// `details` payload of a validation failure.
#[derive(Serialize)]
struct FieldViolation<'a> {
    field: &'static str,
    code: Violation,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
}

impl FieldViolation<'_> {
    fn reject(self, message: String) -> Error {
        let error = Error::invalid_request(message);
        match serde_json::to_value(&self) {
            Ok(details) => error.with_details(details),
            Err(_) => error,
        }
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    FieldViolation {
        field: field.0,
        code: Violation::MissingField,
        value: None,
    }
    .reject(format!("missing required field: {field}"))
}

pub(crate) fn invalid_integer_error(field: FieldName, value: &str) -> Error {
    FieldViolation {
        field: field.0,
        code: Violation::InvalidInteger,
        value: Some(value),
    }
    .reject(format!("{field} must be an integer"))
}

/// Rejection for a query string that could not be decoded at all.
pub(crate) fn invalid_query_error(reason: impl Display) -> Error {
    FieldViolation {
        field: "query",
        code: Violation::InvalidQuery,
        value: None,
    }
    .reject(format!("query string is malformed: {reason}"))
}

/// Parse an optional integer parameter, leaving absent values untouched.
///
/// Surrounding whitespace is ignored; anything else that is not a base-10
/// `i64` is rejected as [`Violation::InvalidInteger`].
pub(crate) fn parse_optional_i64(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<i64>, Error> {
    value
        .map(|raw| {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| invalid_integer_error(field, &raw))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    const ROW_COUNT: FieldName = FieldName::new("rowCount");

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a str> {
        error.details().and_then(|d| d.get(key)).and_then(Value::as_str)
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("5"), Some(5))]
    #[case(Some(" 7 "), Some(7))]
    #[case(Some("-3"), Some(-3))]
    fn parses_optional_integers(#[case] raw: Option<&str>, #[case] expected: Option<i64>) {
        let parsed = parse_optional_i64(raw.map(str::to_owned), ROW_COUNT).expect("valid integer");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("1.5")]
    #[case("99999999999999999999")]
    fn rejects_non_integers(#[case] raw: &str) {
        let error = parse_optional_i64(Some(raw.to_owned()), ROW_COUNT).expect_err("rejected");
        assert_eq!(error.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(detail(&error, "field"), Some("rowCount"));
        assert_eq!(detail(&error, "code"), Some("invalid_integer"));
        assert_eq!(detail(&error, "value"), Some(raw));
    }

    #[rstest]
    fn missing_field_names_the_field() {
        let error = missing_field_error(FieldName::new("Authorization"));
        assert_eq!(error.message(), "missing required field: Authorization");
        assert_eq!(detail(&error, "code"), Some("missing_field"));
        assert!(error.details().and_then(|d| d.get("value")).is_none());
    }

    #[rstest]
    fn malformed_query_is_attributed_to_the_query() {
        let error = invalid_query_error("unexpected end of input");
        assert_eq!(error.message(), "query string is malformed: unexpected end of input");
        assert_eq!(detail(&error, "field"), Some("query"));
        assert_eq!(detail(&error, "code"), Some("invalid_query"));
    }
}
