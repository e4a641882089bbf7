//! Authentication helpers used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! credential extraction and requester resolution here.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use tracing::warn;

use crate::domain::ports::IdentityResolver;
use crate::domain::{AccessToken, AccessTokenValidationError, Error, ErrorCode, UserId};

use super::ApiResult;
use super::validation::{FieldName, missing_field_error};

const AUTHORIZATION: FieldName = FieldName::new("Authorization");

/// Credential taken from the `Authorization` header.
///
/// Extraction fails with `400 invalid_request` when the header is absent,
/// not valid UTF-8, or blank. Whether the token is *valid* is decided later
/// by [`resolve_requester`].
#[derive(Debug, Clone)]
pub struct AuthorizationCredential(AccessToken);

impl AuthorizationCredential {
    /// Parsed token.
    pub fn token(&self) -> &AccessToken {
        &self.0
    }

    fn from_headers(req: &HttpRequest) -> ApiResult<Self> {
        let raw = req
            .headers()
            .get(header::AUTHORIZATION)
            .ok_or_else(|| missing_field_error(AUTHORIZATION))?
            .to_str()
            .map_err(|_| Error::invalid_request("Authorization header must be valid UTF-8"))?;
        AccessToken::parse_header(raw)
            .map(Self)
            .map_err(|err| match err {
                AccessTokenValidationError::EmptyToken => missing_field_error(AUTHORIZATION),
            })
    }
}

impl FromRequest for AuthorizationCredential {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req))
    }
}

/// Resolve the requester behind `token`.
///
/// Rejected credentials are logged by fingerprint only.
pub async fn resolve_requester(
    resolver: &dyn IdentityResolver,
    token: &AccessToken,
) -> ApiResult<UserId> {
    resolver.resolve(token).await.inspect_err(|err| {
        if err.code() == ErrorCode::Unauthorized {
            warn!(credential = %token.fingerprint(), "credential rejected");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FIXTURE_ACCESS_TOKEN, FixtureIdentityResolver, MockIdentityResolver};
    use actix_web::test::TestRequest;
    use rstest::rstest;
    use serde_json::Value;

    async fn extract(req: TestRequest) -> ApiResult<AuthorizationCredential> {
        let (req, mut payload) = req.to_http_parts();
        AuthorizationCredential::from_request(&req, &mut payload).await
    }

    fn detail_code(error: &Error) -> Option<&str> {
        error
            .details()
            .and_then(|d| d.get("code"))
            .and_then(Value::as_str)
    }

    #[rstest]
    #[case("abc123", "abc123")]
    #[case("Bearer abc123", "abc123")]
    #[actix_web::test]
    async fn extracts_bare_and_bearer_credentials(#[case] header: &str, #[case] expected: &str) {
        let credential = extract(
            TestRequest::default().insert_header((header::AUTHORIZATION, header)),
        )
        .await
        .expect("credential extracted");
        assert_eq!(credential.token().expose(), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_header_is_a_missing_field() {
        let error = extract(TestRequest::default())
            .await
            .expect_err("missing header rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail_code(&error), Some("missing_field"));
    }

    #[rstest]
    #[case("")]
    #[case("Bearer")]
    #[case("Bearer   ")]
    #[actix_web::test]
    async fn blank_header_is_a_missing_field(#[case] header: &str) {
        let error = extract(TestRequest::default().insert_header((header::AUTHORIZATION, header)))
            .await
            .expect_err("blank header rejected");
        assert_eq!(detail_code(&error), Some("missing_field"));
    }

    #[rstest]
    #[tokio::test]
    async fn resolves_known_token() {
        let token = AccessToken::parse_header(FIXTURE_ACCESS_TOKEN).expect("token shape");
        let id = resolve_requester(&FixtureIdentityResolver, &token)
            .await
            .expect("fixture token resolves");
        assert_eq!(id.get(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn storage_failures_pass_through_unchanged() {
        let mut resolver = MockIdentityResolver::new();
        resolver
            .expect_resolve()
            .times(1)
            .return_once(|_| Err(Error::service_unavailable("identity store offline")));
        let token = AccessToken::parse_header("whatever").expect("token shape");
        let error = resolve_requester(&resolver, &token)
            .await
            .expect_err("resolver failure surfaces");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
