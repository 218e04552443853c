//! User Administration Use Case
//!
//! Full account CRUD for admins under `/users`. Unlike self-service,
//! the role field is writable here, including creating moderators and
//! other admins directly.

use std::sync::Arc;

use kernel::page::{Page, PageParams};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole, username::Username};
use crate::error::{AuthError, AuthResult};

/// Admin create input
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

/// Admin partial update; `None` fields are left untouched.
#[derive(Debug, Default)]
pub struct UpdateUserInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

/// User administration use case
pub struct ManageUsersUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> ManageUsersUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    pub async fn list(&self, search: Option<&str>, page: &PageParams) -> AuthResult<Page<User>> {
        self.user_repo.list(search, page).await
    }

    pub async fn get(&self, username: &str) -> AuthResult<User> {
        let username =
            Username::new(username).map_err(|e| AuthError::Validation(e.to_string()))?;
        self.user_repo
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn create(&self, input: CreateUserInput) -> AuthResult<User> {
        let username =
            Username::new(input.username).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        let role = parse_role(input.role)?.unwrap_or_default();

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let mut user = User::new(username, email);
        user.set_role(role);
        user.set_profile(input.first_name, input.last_name, input.bio);

        self.user_repo.create(&user).await?;

        tracing::info!(username = %user.username, role = user.role.code(), "User created by admin");

        Ok(user)
    }

    pub async fn update(&self, username: &str, input: UpdateUserInput) -> AuthResult<User> {
        let mut user = self.get(username).await?;

        if let Some(raw) = input.username {
            let new_username =
                Username::new(raw).map_err(|e| AuthError::Validation(e.to_string()))?;
            if new_username != user.username {
                if let Some(other) = self.user_repo.find_by_username(&new_username).await? {
                    if other.user_id != user.user_id {
                        return Err(AuthError::UsernameTaken);
                    }
                }
                user.set_username(new_username);
            }
        }

        if let Some(raw) = input.email {
            let new_email = Email::new(raw).map_err(|e| AuthError::Validation(e.to_string()))?;
            if new_email != user.email {
                if let Some(other) = self.user_repo.find_by_email(&new_email).await? {
                    if other.user_id != user.user_id {
                        return Err(AuthError::EmailTaken);
                    }
                }
                user.set_email(new_email);
            }
        }

        if let Some(role) = parse_role(input.role)? {
            user.set_role(role);
        }

        user.set_profile(input.first_name, input.last_name, input.bio);

        self.user_repo.update(&user).await?;

        Ok(user)
    }

    pub async fn delete(&self, username: &str) -> AuthResult<()> {
        let username =
            Username::new(username).map_err(|e| AuthError::Validation(e.to_string()))?;
        if self.user_repo.delete_by_username(&username).await? {
            Ok(())
        } else {
            Err(AuthError::UserNotFound)
        }
    }
}

fn parse_role(raw: Option<String>) -> AuthResult<Option<UserRole>> {
    match raw {
        None => Ok(None),
        Some(code) => UserRole::from_code(&code)
            .map(Some)
            .ok_or_else(|| AuthError::Validation(format!("unknown role '{code}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryUserRepository;

    fn use_case() -> ManageUsersUseCase<InMemoryUserRepository> {
        ManageUsersUseCase::new(Arc::new(InMemoryUserRepository::new()))
    }

    fn create_input(username: &str, role: Option<&str>) -> CreateUserInput {
        CreateUserInput {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role: role.map(str::to_string),
            first_name: None,
            last_name: None,
            bio: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_user_role() {
        let use_case = use_case();
        let user = use_case.create(create_input("alice", None)).await.unwrap();
        assert_eq!(user.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_create_with_explicit_role() {
        let use_case = use_case();
        let user = use_case
            .create(create_input("mod", Some("moderator")))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Moderator);
    }

    #[tokio::test]
    async fn test_unknown_role_rejected() {
        let use_case = use_case();
        let result = use_case.create(create_input("alice", Some("superuser"))).await;
        assert!(matches!(result, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_conflicts() {
        let use_case = use_case();
        use_case.create(create_input("alice", None)).await.unwrap();

        let result = use_case.create(create_input("alice", None)).await;
        assert!(matches!(result, Err(AuthError::UsernameTaken)));

        let mut same_email = create_input("bob", None);
        same_email.email = "alice@example.com".to_string();
        let result = use_case.create(same_email).await;
        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_update_role() {
        let use_case = use_case();
        use_case.create(create_input("alice", None)).await.unwrap();

        let user = use_case
            .update(
                "alice",
                UpdateUserInput {
                    role: Some("admin".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        let use_case = use_case();
        use_case.create(create_input("alice", None)).await.unwrap();

        assert!(use_case.get("alice").await.is_ok());
        use_case.delete("alice").await.unwrap();
        assert!(matches!(
            use_case.get("alice").await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            use_case.delete("alice").await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_search() {
        let use_case = use_case();
        for name in ["alice", "alina", "bob"] {
            use_case.create(create_input(name, None)).await.unwrap();
        }

        let page = use_case
            .list(Some("ali"), &PageParams::default())
            .await
            .unwrap();
        assert_eq!(page.count, 2);
    }
}
