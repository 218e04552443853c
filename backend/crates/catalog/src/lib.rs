//! Catalog Backend Module
//!
//! The reviewable resource layer: categories, genres, titles, reviews,
//! and comments. Structured like the auth crate:
//! - `domain/` - Entities, value objects, repository traits
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! Reads are public. Every mutation is gated by the authorization
//! evaluator from the auth crate, with ownership resolved against the
//! stored author of the targeted review or comment.

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::{catalog_router, catalog_router_generic};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
