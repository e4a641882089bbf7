//! User account data model.
//!
//! The search core reads only the identifier, username, and display name of
//! an account. Credential material stays in the persistence layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum allowed length for a username, in characters.
pub const USERNAME_MAX: usize = 30;
/// Maximum allowed length for a display name, in characters.
pub const DISPLAY_NAME_MAX: usize = 50;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifiers are positive integers.
    #[error("user id must be a positive integer")]
    NonPositiveId,
    /// Usernames must contain visible characters.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeded [`USERNAME_MAX`].
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    /// Display names must contain visible characters.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// Display name exceeded [`DISPLAY_NAME_MAX`].
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong { max: usize },
}

/// Stable account identifier.
///
/// Identifiers are assigned by storage and are strictly positive. They also
/// serve as the final ranking tie-breaker.
///
/// # Examples
/// ```
/// use social_backend::domain::UserId;
///
/// let id = UserId::new(7).expect("positive id");
/// assert_eq!(id.get(), 7);
/// assert!(UserId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn bounded(value: &str, max: usize) -> Result<(), usize> {
    if value.chars().count() > max {
        Err(max)
    } else {
        Ok(())
    }
}

/// Unique handle chosen by the account owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(username.into())
    }

    fn from_owned(username: String) -> Result<Self, UserValidationError> {
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        bounded(&username, USERNAME_MAX)
            .map_err(|max| UserValidationError::UsernameTooLong { max })?;
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Human readable name shown next to the username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(display_name.into())
    }

    fn from_owned(display_name: String) -> Result<Self, UserValidationError> {
        if display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        bounded(&display_name, DISPLAY_NAME_MAX)
            .map_err(|max| UserValidationError::DisplayNameTooLong { max })?;
        Ok(Self(display_name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Searchable projection of a user account.
///
/// ## Invariants
/// - `id` is positive.
/// - `username` and `display_name` are non-blank and within their bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    id: UserId,
    username: Username,
    display_name: DisplayName,
}

impl UserAccount {
    /// Build an account from validated components.
    pub fn new(id: UserId, username: Username, display_name: DisplayName) -> Self {
        Self {
            id,
            username,
            display_name,
        }
    }

    /// Fallible constructor from raw parts, as read from storage.
    pub fn try_from_parts(
        id: i64,
        username: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            Username::new(username)?,
            DisplayName::new(display_name)?,
        ))
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Account handle.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Display name.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }
}
