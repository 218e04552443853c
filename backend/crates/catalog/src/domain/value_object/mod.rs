//! Value Objects

pub mod score;
pub mod slug;
pub mod title_year;

pub use score::Score;
pub use slug::Slug;
pub use title_year::TitleYear;
