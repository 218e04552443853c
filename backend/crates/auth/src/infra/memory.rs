//! In-Memory Repository
//!
//! A `Mutex<Vec<User>>` store for tests and local development. Shares
//! the trait contract with the Postgres implementation, including the
//! uniqueness rules the database enforces with constraints.

use std::sync::Mutex;

use kernel::page::{Page, PageParams};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, username::Username};
use crate::error::{AuthError, AuthResult};

/// In-memory user store
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AuthResult<std::sync::MutexGuard<'_, Vec<User>>> {
        self.users
            .lock()
            .map_err(|_| AuthError::Internal("user store lock poisoned".to_string()))
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.lock()?;

        if users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::UsernameTaken);
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let users = self.lock()?;
        Ok(users.iter().find(|u| &u.user_id == user_id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>> {
        let users = self.lock()?;
        Ok(users.iter().find(|u| &u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.lock()?;
        Ok(users.iter().find(|u| &u.email == email).cloned())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.lock()?;
        match users.iter_mut().find(|u| u.user_id == user.user_id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AuthError::UserNotFound),
        }
    }

    async fn delete_by_username(&self, username: &Username) -> AuthResult<bool> {
        let mut users = self.lock()?;
        let before = users.len();
        users.retain(|u| &u.username != username);
        Ok(users.len() < before)
    }

    async fn list(&self, search: Option<&str>, page: &PageParams) -> AuthResult<Page<User>> {
        let users = self.lock()?;

        let mut matched: Vec<User> = users
            .iter()
            .filter(|u| match search {
                Some(needle) => u
                    .username
                    .as_str()
                    .to_lowercase()
                    .contains(&needle.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.username.as_str().cmp(b.username.as_str()));

        let count = matched.len() as u64;
        let results = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(Page { count, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User::new(
            Username::new(name).unwrap(),
            Email::new(format!("{name}@example.com")).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let alice = user("alice");
        repo.create(&alice).await.unwrap();

        let found = repo
            .find_by_username(&Username::new("alice").unwrap())
            .await
            .unwrap();
        assert!(found.is_some());
        assert!(
            repo.find_by_username(&Username::new("bob").unwrap())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_uniqueness_enforced() {
        let repo = InMemoryUserRepository::new();
        repo.create(&user("alice")).await.unwrap();

        let duplicate = User::new(
            Username::new("alice").unwrap(),
            Email::new("other@example.com").unwrap(),
        );
        assert!(matches!(
            repo.create(&duplicate).await,
            Err(AuthError::UsernameTaken)
        ));
    }

    #[tokio::test]
    async fn test_list_search_and_pagination() {
        let repo = InMemoryUserRepository::new();
        for name in ["alice", "alina", "bob"] {
            repo.create(&user(name)).await.unwrap();
        }

        let page = repo
            .list(Some("ali"), &PageParams::default())
            .await
            .unwrap();
        assert_eq!(page.count, 2);

        let first = repo
            .list(None, &PageParams { page: 1, page_size: 2 })
            .await
            .unwrap();
        assert_eq!(first.count, 3);
        assert_eq!(first.results.len(), 2);
        assert_eq!(first.results[0].username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryUserRepository::new();
        repo.create(&user("alice")).await.unwrap();

        let name = Username::new("alice").unwrap();
        assert!(repo.delete_by_username(&name).await.unwrap());
        assert!(!repo.delete_by_username(&name).await.unwrap());
    }
}
