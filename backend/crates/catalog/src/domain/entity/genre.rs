//! Genre Entity

use chrono::{DateTime, Utc};
use kernel::id::GenreId;

use crate::domain::entity::category::{CATEGORY_NAME_MAX_LENGTH, validate_name};
use crate::domain::value_object::Slug;
use crate::error::CatalogResult;

/// A genre tag attached to titles ("Drama", "Rock").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub genre_id: GenreId,
    pub name: String,
    pub slug: Slug,
    pub created_at: DateTime<Utc>,
}

impl Genre {
    pub fn new(name: impl Into<String>, slug: Slug) -> CatalogResult<Self> {
        Ok(Self {
            genre_id: GenreId::new(),
            name: validate_name(name.into(), CATEGORY_NAME_MAX_LENGTH)?,
            slug,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_genre() {
        let genre = Genre::new("Drama", Slug::new("drama").unwrap()).unwrap();
        assert_eq!(genre.name, "Drama");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(Genre::new("", Slug::new("x").unwrap()).is_err());
    }
}
