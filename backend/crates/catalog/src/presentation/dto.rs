//! API DTOs (Data Transfer Objects)
//!
//! Request bodies carry raw primitives; the handlers validate them into
//! value objects so bad input comes back as a 400 problem document
//! rather than an extractor rejection.

use chrono::{DateTime, Utc};
use kernel::page::{DEFAULT_PAGE_SIZE, PageParams};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{Category, Comment, Genre, RatedTitle, Review};
use crate::domain::value_object::Slug;

// ============================================================================
// Categories & Genres
// ============================================================================

/// Create body shared by categories and genres
#[derive(Debug, Clone, Deserialize)]
pub struct SlugResourceBody {
    pub name: String,
    pub slug: String,
}

/// Category/genre representation
#[derive(Debug, Clone, Serialize)]
pub struct SlugResourceResponse {
    pub name: String,
    pub slug: String,
}

impl From<Category> for SlugResourceResponse {
    fn from(category: Category) -> Self {
        Self {
            name: category.name,
            slug: category.slug.into_inner(),
        }
    }
}

impl From<Genre> for SlugResourceResponse {
    fn from(genre: Genre) -> Self {
        Self {
            name: genre.name,
            slug: genre.slug.into_inner(),
        }
    }
}

/// Query parameters for category/genre listings.
///
/// Pagination fields stay unflattened; query-string deserialization
/// cannot see through `serde(flatten)` for numeric fields.
#[derive(Debug, Clone, Deserialize)]
pub struct SlugResourceListQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl SlugResourceListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

// ============================================================================
// Titles
// ============================================================================

/// Title create body
#[derive(Debug, Clone, Deserialize)]
pub struct TitleCreateBody {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
}

/// Title partial update body; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleUpdateBody {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub genre: Option<Vec<String>>,
}

/// Title representation, rating included
#[derive(Debug, Clone, Serialize)]
pub struct TitleResponse {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub genre: Vec<String>,
}

impl From<RatedTitle> for TitleResponse {
    fn from(rated: RatedTitle) -> Self {
        Self {
            id: rated.title.title_id.into_uuid(),
            name: rated.title.name,
            year: rated.title.year.value(),
            rating: rated.rating,
            description: rated.title.description,
            category: rated.title.category.map(Slug::into_inner),
            genre: rated
                .title
                .genres
                .into_iter()
                .map(Slug::into_inner)
                .collect(),
        }
    }
}

/// Query parameters for the title listing
#[derive(Debug, Clone, Deserialize)]
pub struct TitleListQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl TitleListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

// ============================================================================
// Reviews
// ============================================================================

/// Review create body
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewCreateBody {
    pub text: String,
    pub score: i16,
}

/// Review partial update body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewUpdateBody {
    pub text: Option<String>,
    pub score: Option<i16>,
}

/// Review representation
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub author: String,
    pub text: String,
    pub score: i16,
    pub pub_date: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.review_id.into_uuid(),
            author: review.author_username,
            text: review.text,
            score: review.score.value(),
            pub_date: review.pub_date,
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

/// Comment create body
#[derive(Debug, Clone, Deserialize)]
pub struct CommentCreateBody {
    pub text: String,
}

/// Comment partial update body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentUpdateBody {
    pub text: Option<String>,
}

/// Comment representation
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub author: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.comment_id.into_uuid(),
            author: comment.author_username,
            text: comment.text,
            pub_date: comment.pub_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_body_accepts_any_integer_score() {
        // Range checks live in the handlers so they answer with the
        // shared problem-document format, not a decode rejection.
        let body: ReviewCreateBody =
            serde_json::from_str(r#"{"text": "ok", "score": 11}"#).unwrap();
        assert_eq!(body.score, 11);
    }

    #[test]
    fn test_title_body_genre_defaults_empty() {
        let body: TitleCreateBody =
            serde_json::from_str(r#"{"name": "x", "year": 1999}"#).unwrap();
        assert!(body.genre.is_empty());
        assert!(body.category.is_none());
    }
}
