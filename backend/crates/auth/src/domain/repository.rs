//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId, username::Username};
use crate::error::AuthResult;
use kernel::page::{Page, PageParams};

/// User repository trait
///
/// The store is the single source of truth; create/update are assumed
/// atomic per row, with unique constraints on username and email
/// deciding concurrent sign-up races.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Delete user by username; `false` when absent
    async fn delete_by_username(&self, username: &Username) -> AuthResult<bool>;

    /// List users, optionally filtered by username substring
    async fn list(&self, search: Option<&str>, page: &PageParams) -> AuthResult<Page<User>>;
}
