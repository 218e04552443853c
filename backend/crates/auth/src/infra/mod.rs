//! Infrastructure Layer
//!
//! Concrete implementations of the domain's repository and mailer traits.

pub mod mail;
pub mod memory;
pub mod postgres;

pub use mail::{RecordingMailer, TracingMailer};
pub use memory::InMemoryUserRepository;
pub use postgres::PgAuthRepository;
