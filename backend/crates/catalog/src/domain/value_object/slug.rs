//! Slug Value Object
//!
//! The URL-visible key for categories and genres.
//!
//! ## Invariants
//! - Non-empty
//! - At most 50 characters
//! - Matches `^[-a-zA-Z0-9_]+$`

use std::fmt;

use crate::error::{CatalogError, CatalogResult};

/// Maximum slug length (in characters)
pub const SLUG_MAX_LENGTH: usize = 50;

/// Validated slug.
///
/// Deliberately not deserializable: raw strings arrive through the DTOs
/// and are validated in the handlers so rejections surface through the
/// bound error taxonomy, not the extractor's.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Create a new Slug from raw input
    pub fn new(input: impl Into<String>) -> CatalogResult<Self> {
        let value = input.into();

        if value.is_empty() {
            return Err(CatalogError::Validation("Slug cannot be empty".to_string()));
        }

        let length = value.chars().count();
        if length > SLUG_MAX_LENGTH {
            return Err(CatalogError::Validation(format!(
                "Slug is too long ({length} chars, maximum {SLUG_MAX_LENGTH})"
            )));
        }

        if let Some(ch) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(CatalogError::Validation(format!(
                "Invalid character '{ch}' in slug. Only letters, digits, hyphen and underscore are allowed"
            )));
        }

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
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        for value in ["movies", "sci-fi", "best_of_2020", "a", "UPPER"] {
            assert!(Slug::new(value).is_ok(), "{value} should be valid");
        }
    }

    #[test]
    fn test_invalid_slugs() {
        for value in ["", "with space", "naïve", "semi;colon", "slash/"] {
            assert!(Slug::new(value).is_err(), "{value} should be invalid");
        }
    }

    #[test]
    fn test_length_limit() {
        assert!(Slug::new("a".repeat(SLUG_MAX_LENGTH)).is_ok());
        assert!(Slug::new("a".repeat(SLUG_MAX_LENGTH + 1)).is_err());
    }
}
