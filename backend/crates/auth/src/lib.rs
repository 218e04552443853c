//! Auth (Authentication & Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations, outbound mail
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - User signup with email confirmation codes (no passwords)
//! - Bearer token issuance (signed, time-bound, stateless)
//! - Role-based access (User, Moderator, Admin)
//! - Pure authorization evaluator gating every resource action
//!
//! ## Security Model
//! - Confirmation codes are single-use and expire after a TTL
//! - Code comparison is constant-time
//! - Tokens verified by signature + expiry only, no server-side lookup

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{Claims, TokenIssuer};
pub use domain::authorization::{Action, Caller, Deny, Verb, authorize};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::CurrentUser;
pub use presentation::router::{auth_router, users_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
