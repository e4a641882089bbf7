//! Authentication primitives such as access tokens.
//!
//! Keep inbound header parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Length of the credential fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

const BEARER_SCHEME: &str = "Bearer";

/// Domain error returned when an authorization credential is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessTokenValidationError {
    /// The credential was blank once the optional scheme was removed.
    #[error("authorization credential must not be empty")]
    EmptyToken,
}

/// Opaque credential presented in the `Authorization` header.
///
/// Legacy clients send the raw token while newer ones prefix it with the
/// `Bearer` scheme; both forms resolve to the same token.
///
/// ## Invariants
/// - the token is trimmed and non-empty.
/// - the token material is zeroed on drop and never printed by `Debug`.
///
/// # Examples
/// ```
/// use social_backend::domain::AccessToken;
///
/// let bare = AccessToken::parse_header("abc123").unwrap();
/// let bearer = AccessToken::parse_header("Bearer abc123").unwrap();
/// assert_eq!(bare.expose(), bearer.expose());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Parse an `Authorization` header value.
    pub fn parse_header(raw: &str) -> Result<Self, AccessTokenValidationError> {
        let token = strip_bearer_scheme(raw.trim_start()).trim();
        if token.is_empty() {
            return Err(AccessTokenValidationError::EmptyToken);
        }
        Ok(Self(Zeroizing::new(token.to_owned())))
    }

    /// Token material for comparison by identity adapters.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Truncated SHA-256 fingerprint safe to include in logs.
    ///
    /// Returns the first 8 bytes of the hash as 16 lowercase hex characters.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        let digest = hasher.finalize();
        hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
    }
}

/// Remove a leading `Bearer` scheme, matched case-insensitively.
///
/// The scheme only counts when followed by whitespace or nothing, so a bare
/// `Bearer` header carries no token and `Bearerabc` is kept as is.
fn strip_bearer_scheme(value: &str) -> &str {
    let Some(scheme) = value.get(..BEARER_SCHEME.len()) else {
        return value;
    };
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return value;
    }
    let rest = value.get(BEARER_SCHEME.len()..).unwrap_or_default();
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        rest
    } else {
        value
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"<redacted>").finish()
    }
}
