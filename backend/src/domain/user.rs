//! User identity model.
//!
//! The identity provider issues opaque, stable user identifiers. They are
//! not UUIDs, so validation is limited to shape checks: non-empty, no
//! surrounding whitespace, bounded length.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Provider uids are documented as at most 128 characters.
const MAX_USER_ID_LEN: usize = 128;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdValidationError {
    /// The identifier was empty.
    Empty,
    /// The identifier carried surrounding whitespace or control characters.
    InvalidCharacters,
    /// The identifier exceeded the provider's documented maximum length.
    TooLong {
        /// Permitted maximum length in characters.
        max: usize,
    },
}

impl fmt::Display for UserIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "user id must not be empty"),
            Self::InvalidCharacters => {
                write!(f, "user id must not contain whitespace or control characters")
            }
            Self::TooLong { max } => write!(f, "user id must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserIdValidationError {}

/// Stable user identifier as issued by the identity provider.
///
/// Always derived server-side from a verified token, never from client
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "u9KPZ2JdYfQxTml4vR7wA1sB0cE3")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        if id.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(UserIdValidationError::InvalidCharacters);
        }
        if id.chars().count() > MAX_USER_ID_LEN {
            return Err(UserIdValidationError::TooLong {
                max: MAX_USER_ID_LEN,
            });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn accepts_provider_shaped_ids() {
        let id = UserId::new("u9KPZ2JdYfQxTml4vR7wA1sB0cE3").expect("valid uid");
        assert_eq!(id.as_ref(), "u9KPZ2JdYfQxTml4vR7wA1sB0cE3");
    }

    #[rstest]
    #[case::empty("", UserIdValidationError::Empty)]
    #[case::padded(" uid ", UserIdValidationError::InvalidCharacters)]
    #[case::newline("uid\n", UserIdValidationError::InvalidCharacters)]
    fn rejects_malformed_ids(#[case] raw: &str, #[case] expected: UserIdValidationError) {
        assert_eq!(UserId::new(raw).expect_err("should reject"), expected);
    }

    #[test]
    fn rejects_overlong_ids() {
        let raw = "a".repeat(MAX_USER_ID_LEN + 1);
        assert_eq!(
            UserId::new(raw).expect_err("should reject"),
            UserIdValidationError::TooLong {
                max: MAX_USER_ID_LEN
            }
        );
    }
}
