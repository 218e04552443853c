//! API DTOs (Data Transfer Objects)
//!
//! Wire shapes are snake_case JSON. Unknown request fields are ignored,
//! which is what makes `role` silently read-only on `/users/me`.

use kernel::page::{DEFAULT_PAGE_SIZE, PageParams};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
}

/// Sign up response, echoing the accepted pair
#[derive(Debug, Clone, Serialize)]
pub struct SignUpResponse {
    pub username: String,
    pub email: String,
}

// ============================================================================
// Token Exchange
// ============================================================================

/// Token exchange request
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub confirmation_code: String,
}

/// Token exchange response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// User Representation
// ============================================================================

/// Public user representation.
///
/// Never carries the confirmation code or internal UUID.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            bio: user.bio,
            role: user.role.code().to_string(),
        }
    }
}

// ============================================================================
// Self Profile
// ============================================================================

/// Partial self update. There is no `role` field here; a `role` key in
/// the request body is dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeUpdateRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

// ============================================================================
// User Administration
// ============================================================================

/// Admin create request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

/// Admin partial update request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

/// Query parameters for the user listing.
///
/// Pagination fields stay unflattened; query-string deserialization
/// cannot see through `serde(flatten)` for numeric fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UserListQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl UserListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}
