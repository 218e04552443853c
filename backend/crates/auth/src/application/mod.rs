//! Application Layer
//!
//! Use cases orchestrating domain entities and repository traits.

pub mod config;
pub mod issue_token;
pub mod manage_users;
pub mod me;
pub mod sign_up;
pub mod token;

pub use config::AuthConfig;
pub use issue_token::{IssueTokenInput, IssueTokenOutput, IssueTokenUseCase};
pub use manage_users::{CreateUserInput, ManageUsersUseCase, UpdateUserInput};
pub use me::{MeUpdateInput, MeUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{Claims, TokenIssuer};
