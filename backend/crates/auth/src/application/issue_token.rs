//! Issue Token Use Case
//!
//! Exchanges `(username, confirmation_code)` for a signed bearer token.
//! An unknown username is a not-found, not an invalid credential; a
//! wrong, expired, or already-used code is invalid credentials.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

/// Token exchange input
pub struct IssueTokenInput {
    pub username: String,
    pub confirmation_code: String,
}

/// Token exchange output
pub struct IssueTokenOutput {
    pub token: String,
}

/// Issue token use case
pub struct IssueTokenUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    tokens: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<R> IssueTokenUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, tokens: Arc<TokenIssuer>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: IssueTokenInput) -> AuthResult<IssueTokenOutput> {
        let username =
            Username::new(input.username).map_err(|e| AuthError::Validation(e.to_string()))?;

        let mut user = self
            .user_repo
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.verify_confirmation_code(&input.confirmation_code, self.config.code_ttl) {
            return Err(AuthError::InvalidCredentials);
        }

        // Single-use: a verified code is consumed before the token leaves.
        user.clear_confirmation_code();
        self.user_repo.update(&user).await?;

        let token = self.tokens.issue(&user)?;

        tracing::info!(username = %user.username, "Bearer token issued");

        Ok(IssueTokenOutput { token })
    }
}
