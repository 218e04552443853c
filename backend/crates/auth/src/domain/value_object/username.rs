//! Username Value Object
//!
//! The public handle a user signs up and is addressed by. Used for
//! login, display, and the `/users/{username}` lookup path.
//!
//! ## Invariants
//! - Non-empty
//! - At most 150 characters
//! - ASCII letters, digits, and underscore only (`^[A-Za-z0-9_]+$`)
//! - Not the reserved literal `"me"` (collides with the self-service route)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 150;

/// Reserved words that cannot be used as usernames.
///
/// `me` is routed to the self-service endpoint and must never resolve
/// to a real account.
const RESERVED_WORDS: &[&str] = &["me"];

/// Error returned when username validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// Username is empty
    Empty,

    /// Username is too long (maximum: USERNAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// Username contains a character outside `[A-Za-z0-9_]`
    InvalidCharacter { char: char, position: usize },

    /// Username is a reserved word
    Reserved { word: String },
}

impl fmt::Display for UsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only letters, digits and underscore are allowed"
                )
            }
            Self::Reserved { word } => {
                write!(f, "'{word}' is a reserved username")
            }
        }
    }
}

impl std::error::Error for UsernameError {}

/// Validated username
///
/// # Invariants
/// - Non-empty, at most [`USERNAME_MAX_LENGTH`] characters
/// - Matches `^[A-Za-z0-9_]+$`
/// - Not a reserved word
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new Username from raw input
    pub fn new(input: impl Into<String>) -> Result<Self, UsernameError> {
        let value = input.into();
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// Create from a database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    fn validate(value: &str) -> Result<(), UsernameError> {
        if value.is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = value.chars().count();
        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                length,
                max: USERNAME_MAX_LENGTH,
            });
        }

        for (pos, ch) in value.chars().enumerate() {
            if !(ch.is_ascii_alphanumeric() || ch == '_') {
                return Err(UsernameError::InvalidCharacter {
                    char: ch,
                    position: pos,
                });
            }
        }

        if RESERVED_WORDS.contains(&value) {
            return Err(UsernameError::Reserved {
                word: value.to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Username").field(&self.0).finish()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Username {
    type Error = UsernameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod character_validation {
        use super::*;

        #[test]
        fn test_valid_alphanumeric() {
            assert!(Username::new("alice123").is_ok());
        }

        #[test]
        fn test_valid_underscore() {
            assert!(Username::new("alice_bob").is_ok());
        }

        #[test]
        fn test_case_preserved() {
            let name = Username::new("AliceBob").unwrap();
            assert_eq!(name.as_str(), "AliceBob");
        }

        #[test]
        fn test_invalid_dot() {
            assert!(matches!(
                Username::new("alice.bob"),
                Err(UsernameError::InvalidCharacter { char: '.', .. })
            ));
        }

        #[test]
        fn test_invalid_at_sign() {
            assert!(matches!(
                Username::new("alice@bob"),
                Err(UsernameError::InvalidCharacter { char: '@', .. })
            ));
        }

        #[test]
        fn test_invalid_whitespace() {
            assert!(matches!(
                Username::new("alice bob"),
                Err(UsernameError::InvalidCharacter { char: ' ', .. })
            ));
        }

        #[test]
        fn test_invalid_unicode() {
            assert!(matches!(
                Username::new("алиса"),
                Err(UsernameError::InvalidCharacter { .. })
            ));
        }
    }

    mod length_validation {
        use super::*;

        #[test]
        fn test_empty_fails() {
            assert!(matches!(Username::new(""), Err(UsernameError::Empty)));
        }

        #[test]
        fn test_maximum_length() {
            let input = "a".repeat(USERNAME_MAX_LENGTH);
            assert!(Username::new(&input).is_ok());
        }

        #[test]
        fn test_too_long() {
            let input = "a".repeat(USERNAME_MAX_LENGTH + 1);
            assert!(matches!(
                Username::new(&input),
                Err(UsernameError::TooLong { .. })
            ));
        }
    }

    mod reserved_words {
        use super::*;

        #[test]
        fn test_reserved_me() {
            assert!(matches!(
                Username::new("me"),
                Err(UsernameError::Reserved { word }) if word == "me"
            ));
        }

        #[test]
        fn test_me_prefix_allowed() {
            assert!(Username::new("melissa").is_ok());
        }

        #[test]
        fn test_uppercase_me_allowed() {
            // Reservation is literal, matching the route segment exactly.
            assert!(Username::new("Me").is_ok());
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_serialize() {
            let name = Username::new("alice").unwrap();
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, "\"alice\"");
        }

        #[test]
        fn test_deserialize_invalid() {
            let result: Result<Username, _> = serde_json::from_str("\"not valid!\"");
            assert!(result.is_err());
        }
    }
}
