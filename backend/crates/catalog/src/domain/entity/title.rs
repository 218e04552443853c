//! Title Entity

use chrono::{DateTime, Utc};
use kernel::id::TitleId;

use crate::domain::entity::category::validate_name;
use crate::domain::value_object::{Slug, TitleYear};
use crate::error::CatalogResult;

pub const TITLE_NAME_MAX_LENGTH: usize = 200;

/// A reviewable work.
///
/// Category and genres are referenced by slug. The average rating is
/// not stored on the entity; it is computed from reviews at query time
/// and carried by [`RatedTitle`].
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    pub title_id: TitleId,
    pub name: String,
    pub year: TitleYear,
    pub description: Option<String>,
    pub category: Option<Slug>,
    pub genres: Vec<Slug>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Title {
    pub fn new(
        name: impl Into<String>,
        year: TitleYear,
        description: Option<String>,
        category: Option<Slug>,
        genres: Vec<Slug>,
    ) -> CatalogResult<Self> {
        let now = Utc::now();
        Ok(Self {
            title_id: TitleId::new(),
            name: validate_name(name.into(), TITLE_NAME_MAX_LENGTH)?,
            year,
            description,
            category,
            genres,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> CatalogResult<()> {
        self.name = validate_name(name.into(), TITLE_NAME_MAX_LENGTH)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_year(&mut self, year: TitleYear) {
        self.year = year;
        self.updated_at = Utc::now();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.updated_at = Utc::now();
    }

    pub fn set_category(&mut self, category: Option<Slug>) {
        self.category = category;
        self.updated_at = Utc::now();
    }

    pub fn set_genres(&mut self, genres: Vec<Slug>) {
        self.genres = genres;
        self.updated_at = Utc::now();
    }
}

/// A title together with its computed average review score.
#[derive(Debug, Clone, PartialEq)]
pub struct RatedTitle {
    pub title: Title,
    /// `None` when the title has no reviews
    pub rating: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_title() -> Title {
        Title::new(
            "The Master and Margarita",
            TitleYear::new(1967).unwrap(),
            None,
            Some(Slug::new("books").unwrap()),
            vec![Slug::new("drama").unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn test_new_title() {
        let title = sample_title();
        assert_eq!(title.year.value(), 1967);
        assert_eq!(title.genres.len(), 1);
    }

    #[test]
    fn test_name_length_limit() {
        let result = Title::new(
            "a".repeat(TITLE_NAME_MAX_LENGTH + 1),
            TitleYear::new(2000).unwrap(),
            None,
            None,
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_set_name_validates() {
        let mut title = sample_title();
        assert!(title.set_name("").is_err());
        assert!(title.set_name("New name").is_ok());
        assert_eq!(title.name, "New name");
    }
}
