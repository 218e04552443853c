//! Infrastructure Layer
//!
//! Concrete implementations of the catalog repository traits.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCatalogRepository;
pub use postgres::PgCatalogRepository;
