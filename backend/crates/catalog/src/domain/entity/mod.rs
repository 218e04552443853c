//! Entity Module

pub mod category;
pub mod comment;
pub mod genre;
pub mod review;
pub mod title;

pub use category::Category;
pub use comment::Comment;
pub use genre::Genre;
pub use review::Review;
pub use title::{RatedTitle, Title};
