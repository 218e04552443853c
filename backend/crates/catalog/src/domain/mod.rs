//! Domain Layer
//!
//! Entities, value objects, and repository traits for the catalog.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Category, Comment, Genre, RatedTitle, Review, Title};
pub use repository::{
    CategoryRepository, CommentRepository, GenreRepository, ReviewRepository, TitleFilter,
    TitleRepository,
};
pub use value_object::{Score, Slug, TitleYear};
