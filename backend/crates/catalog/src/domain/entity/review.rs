//! Review Entity

use chrono::{DateTime, Utc};
use kernel::id::{ReviewId, TitleId, UserId};

use crate::domain::value_object::Score;
use crate::error::{CatalogError, CatalogResult};

/// One user's review of one title. Unique per `(author, title)`.
///
/// The author's username is denormalized onto the entity so listings
/// do not join against the auth store.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub review_id: ReviewId,
    pub title_id: TitleId,
    pub author_id: UserId,
    /// Snapshot of the author's username at creation time. Ownership
    /// checks go through `author_id`; a later rename is not fanned out
    /// to this display value.
    pub author_username: String,
    pub text: String,
    pub score: Score,
    pub pub_date: DateTime<Utc>,
}

impl Review {
    pub fn new(
        title_id: TitleId,
        author_id: UserId,
        author_username: impl Into<String>,
        text: impl Into<String>,
        score: Score,
    ) -> CatalogResult<Self> {
        Ok(Self {
            review_id: ReviewId::new(),
            title_id,
            author_id,
            author_username: author_username.into(),
            text: validate_text(text.into())?,
            score,
            pub_date: Utc::now(),
        })
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> CatalogResult<()> {
        self.text = validate_text(text.into())?;
        Ok(())
    }

    pub fn set_score(&mut self, score: Score) {
        self.score = score;
    }
}

pub(crate) fn validate_text(text: String) -> CatalogResult<String> {
    if text.trim().is_empty() {
        return Err(CatalogError::Validation("Text cannot be empty".to_string()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_review() {
        let review = Review::new(
            TitleId::new(),
            UserId::new(),
            "alice",
            "Loved it",
            Score::new(9).unwrap(),
        )
        .unwrap();
        assert_eq!(review.score.value(), 9);
        assert_eq!(review.author_username, "alice");
    }

    #[test]
    fn test_empty_text_rejected() {
        let result = Review::new(
            TitleId::new(),
            UserId::new(),
            "alice",
            "   ",
            Score::new(5).unwrap(),
        );
        assert!(result.is_err());
    }
}
