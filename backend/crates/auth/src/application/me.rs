//! Self Profile Use Case
//!
//! Read and update of the authenticated caller's own account via
//! `/users/me`. The role field is never writable here, whatever the
//! caller's privilege.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, username::Username};
use crate::error::{AuthError, AuthResult};

/// Partial self update; `None` fields are left untouched.
#[derive(Debug, Default)]
pub struct MeUpdateInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

/// Self profile use case
pub struct MeUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> MeUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn get(&self, user_id: &UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn update(&self, user_id: &UserId, input: MeUpdateInput) -> AuthResult<User> {
        let mut user = self.get(user_id).await?;

        if let Some(raw) = input.username {
            let username =
                Username::new(raw).map_err(|e| AuthError::Validation(e.to_string()))?;
            if username != user.username {
                if let Some(other) = self.user_repo.find_by_username(&username).await? {
                    if other.user_id != user.user_id {
                        return Err(AuthError::UsernameTaken);
                    }
                }
                user.set_username(username);
            }
        }

        if let Some(raw) = input.email {
            let email = Email::new(raw).map_err(|e| AuthError::Validation(e.to_string()))?;
            if email != user.email {
                if let Some(other) = self.user_repo.find_by_email(&email).await? {
                    if other.user_id != user.user_id {
                        return Err(AuthError::EmailTaken);
                    }
                }
                user.set_email(email);
            }
        }

        user.set_profile(input.first_name, input.last_name, input.bio);

        self.user_repo.update(&user).await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_role::UserRole;
    use crate::infra::memory::InMemoryUserRepository;

    async fn seeded() -> (Arc<InMemoryUserRepository>, MeUseCase<InMemoryUserRepository>, UserId) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = User::new(
            Username::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
        );
        let user_id = user.user_id;
        repo.create(&user).await.unwrap();

        let use_case = MeUseCase::new(Arc::clone(&repo));
        (repo, use_case, user_id)
    }

    #[tokio::test]
    async fn test_get_own_profile() {
        let (_, use_case, user_id) = seeded().await;
        let user = use_case.get(&user_id).await.unwrap();
        assert_eq!(user.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let (_, use_case, user_id) = seeded().await;

        use_case
            .update(
                &user_id,
                MeUpdateInput {
                    bio: Some("Reader of long books".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let user = use_case
            .update(
                &user_id,
                MeUpdateInput {
                    first_name: Some("Alice".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(user.bio.as_deref(), Some("Reader of long books"));
        assert_eq!(user.first_name.as_deref(), Some("Alice"));
        assert_eq!(user.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_role_survives_profile_update() {
        let (repo, use_case, user_id) = seeded().await;

        use_case
            .update(
                &user_id,
                MeUpdateInput {
                    bio: Some("still just a user".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let user = repo.find_by_id(&user_id).await.unwrap().unwrap();
        assert_eq!(user.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_username_change_conflicts() {
        let (repo, use_case, user_id) = seeded().await;
        repo.create(&User::new(
            Username::new("bob").unwrap(),
            Email::new("bob@example.com").unwrap(),
        ))
        .await
        .unwrap();

        let result = use_case
            .update(
                &user_id,
                MeUpdateInput {
                    username: Some("bob".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::UsernameTaken)));
    }

    #[tokio::test]
    async fn test_same_username_is_not_a_conflict() {
        let (_, use_case, user_id) = seeded().await;

        let user = use_case
            .update(
                &user_id,
                MeUpdateInput {
                    username: Some("alice".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(user.username.as_str(), "alice");
    }
}
