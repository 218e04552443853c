//! Category Entity

use chrono::{DateTime, Utc};
use kernel::id::CategoryId;

use crate::domain::value_object::Slug;
use crate::error::{CatalogError, CatalogResult};

pub const CATEGORY_NAME_MAX_LENGTH: usize = 256;

/// A top-level grouping of titles ("Movies", "Books").
///
/// Addressed by slug on the wire; the UUID stays internal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub category_id: CategoryId,
    pub name: String,
    pub slug: Slug,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>, slug: Slug) -> CatalogResult<Self> {
        Ok(Self {
            category_id: CategoryId::new(),
            name: validate_name(name.into(), CATEGORY_NAME_MAX_LENGTH)?,
            slug,
            created_at: Utc::now(),
        })
    }
}

pub(crate) fn validate_name(name: String, max: usize) -> CatalogResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::Validation("Name cannot be empty".to_string()));
    }
    let length = trimmed.chars().count();
    if length > max {
        return Err(CatalogError::Validation(format!(
            "Name is too long ({length} chars, maximum {max})"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Movies", Slug::new("movies").unwrap()).unwrap();
        assert_eq!(category.name, "Movies");
        assert_eq!(category.slug.as_str(), "movies");
    }

    #[test]
    fn test_name_validation() {
        let slug = Slug::new("x").unwrap();
        assert!(Category::new("", slug.clone()).is_err());
        assert!(Category::new("  ", slug.clone()).is_err());
        assert!(Category::new("a".repeat(257), slug).is_err());
    }

    #[test]
    fn test_name_is_trimmed() {
        let category = Category::new("  Books ", Slug::new("books").unwrap()).unwrap();
        assert_eq!(category.name, "Books");
    }
}
