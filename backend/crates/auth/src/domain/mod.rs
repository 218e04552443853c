//! Domain Layer
//!
//! Contains entities, value objects, repository traits, the mail port,
//! and the authorization evaluator.

pub mod authorization;
pub mod entity;
pub mod mailer;
pub mod repository;
pub mod value_object;

// Re-exports
pub use authorization::{Action, Caller, Deny, Verb, authorize};
pub use entity::user::User;
pub use mailer::{MailMessage, Mailer};
pub use repository::UserRepository;
