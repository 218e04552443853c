//! Comment Entity

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, ReviewId, UserId};

use crate::domain::entity::review::validate_text;
use crate::error::CatalogResult;

/// A comment on a review.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub comment_id: CommentId,
    pub review_id: ReviewId,
    pub author_id: UserId,
    /// Snapshot of the author's username at creation time. Ownership
    /// checks go through `author_id`; a later rename is not fanned out
    /// to this display value.
    pub author_username: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        review_id: ReviewId,
        author_id: UserId,
        author_username: impl Into<String>,
        text: impl Into<String>,
    ) -> CatalogResult<Self> {
        Ok(Self {
            comment_id: CommentId::new(),
            review_id,
            author_id,
            author_username: author_username.into(),
            text: validate_text(text.into())?,
            pub_date: Utc::now(),
        })
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> CatalogResult<()> {
        self.text = validate_text(text.into())?;
        Ok(())
    }
}
