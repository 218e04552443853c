//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{CommentId, ReviewId, TitleId, UserId};
use kernel::page::{Page, PageParams};

use crate::domain::entity::{Category, Comment, Genre, RatedTitle, Review, Title};
use crate::domain::value_object::Slug;
use crate::error::CatalogResult;

/// Filters for the title listing; all optional, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct TitleFilter {
    /// Substring match on the title name
    pub name: Option<String>,
    /// Exact category slug
    pub category: Option<Slug>,
    /// Exact genre slug
    pub genre: Option<Slug>,
    /// Exact release year
    pub year: Option<i32>,
}

/// Category repository trait
#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    /// Create a category; slug uniqueness decides conflicts
    async fn create(&self, category: &Category) -> CatalogResult<()>;

    /// Find category by slug
    async fn find_by_slug(&self, slug: &Slug) -> CatalogResult<Option<Category>>;

    /// Delete category by slug; `false` when absent
    async fn delete_by_slug(&self, slug: &Slug) -> CatalogResult<bool>;

    /// List categories, optionally filtered by name substring
    async fn list(&self, search: Option<&str>, page: &PageParams)
    -> CatalogResult<Page<Category>>;
}

/// Genre repository trait
#[trait_variant::make(GenreRepository: Send)]
pub trait LocalGenreRepository {
    async fn create(&self, genre: &Genre) -> CatalogResult<()>;

    async fn find_by_slug(&self, slug: &Slug) -> CatalogResult<Option<Genre>>;

    async fn delete_by_slug(&self, slug: &Slug) -> CatalogResult<bool>;

    async fn list(&self, search: Option<&str>, page: &PageParams) -> CatalogResult<Page<Genre>>;
}

/// Title repository trait
#[trait_variant::make(TitleRepository: Send)]
pub trait LocalTitleRepository {
    async fn create(&self, title: &Title) -> CatalogResult<()>;

    /// Find title by id, with its computed average rating
    async fn find_by_id(&self, title_id: &TitleId) -> CatalogResult<Option<RatedTitle>>;

    async fn update(&self, title: &Title) -> CatalogResult<()>;

    /// Delete title by id; `false` when absent
    async fn delete(&self, title_id: &TitleId) -> CatalogResult<bool>;

    async fn list(&self, filter: &TitleFilter, page: &PageParams)
    -> CatalogResult<Page<RatedTitle>>;
}

/// Review repository trait
#[trait_variant::make(ReviewRepository: Send)]
pub trait LocalReviewRepository {
    /// Create a review; `(author, title)` uniqueness decides conflicts
    async fn create(&self, review: &Review) -> CatalogResult<()>;

    async fn find_by_id(&self, review_id: &ReviewId) -> CatalogResult<Option<Review>>;

    /// The author's existing review of a title, if any
    async fn find_by_author_and_title(
        &self,
        author_id: &UserId,
        title_id: &TitleId,
    ) -> CatalogResult<Option<Review>>;

    async fn update(&self, review: &Review) -> CatalogResult<()>;

    async fn delete(&self, review_id: &ReviewId) -> CatalogResult<bool>;

    async fn list_for_title(
        &self,
        title_id: &TitleId,
        page: &PageParams,
    ) -> CatalogResult<Page<Review>>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn create(&self, comment: &Comment) -> CatalogResult<()>;

    async fn find_by_id(&self, comment_id: &CommentId) -> CatalogResult<Option<Comment>>;

    async fn update(&self, comment: &Comment) -> CatalogResult<()>;

    async fn delete(&self, comment_id: &CommentId) -> CatalogResult<bool>;

    async fn list_for_review(
        &self,
        review_id: &ReviewId,
        page: &PageParams,
    ) -> CatalogResult<Page<Comment>>;
}
