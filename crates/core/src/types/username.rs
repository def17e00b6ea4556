//! User name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`UserName`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UserNameError {
    /// The input string is empty.
    #[error("user name cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("user name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace.
    #[error("user name cannot contain whitespace")]
    ContainsWhitespace,
}

/// A login identifier chosen at registration.
///
/// Unique across users and immutable after creation. Kept deliberately
/// loose: any non-empty token without whitespace, up to 64 characters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Maximum length of a user name.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `UserName` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 64 characters,
    /// or contains whitespace.
    pub fn parse(s: &str) -> Result<Self, UserNameError> {
        if s.is_empty() {
            return Err(UserNameError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(UserNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(UserNameError::ContainsWhitespace);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the user name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `UserName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserName {
    type Err = UserNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for UserName {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for UserName {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for UserName {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(UserName::parse("alice").is_ok());
        assert!(UserName::parse("alice_42").is_ok());
        assert!(UserName::parse("Ehsan.M").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(UserName::parse(""), Err(UserNameError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(65);
        assert!(matches!(
            UserName::parse(&long),
            Err(UserNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_whitespace() {
        assert!(matches!(
            UserName::parse("alice smith"),
            Err(UserNameError::ContainsWhitespace)
        ));
    }

    #[test]
    fn test_display() {
        let name = UserName::parse("alice").unwrap();
        assert_eq!(name.to_string(), "alice");
    }
}
