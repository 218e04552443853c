//! Sign Up Use Case
//!
//! Provisions a user for a `(username, email)` pair and mails a
//! confirmation code. Repeating the identical pair is idempotent: the
//! existing account gets a fresh code instead of a conflict.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::mailer::{MailMessage, Mailer};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, username::Username};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub username: String,
    pub email: String,
}

/// Sign up output, echoing the accepted pair
pub struct SignUpOutput {
    pub username: String,
    pub email: String,
}

/// Sign up use case
pub struct SignUpUseCase<R, M>
where
    R: UserRepository,
    M: Mailer,
{
    user_repo: Arc<R>,
    mailer: Arc<M>,
}

impl<R, M> SignUpUseCase<R, M>
where
    R: UserRepository,
    M: Mailer,
{
    pub fn new(user_repo: Arc<R>, mailer: Arc<M>) -> Self {
        Self { user_repo, mailer }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let username =
            Username::new(input.username).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;

        let by_username = self.user_repo.find_by_username(&username).await?;
        let by_email = self.user_repo.find_by_email(&email).await?;

        let mut user = match (by_username, by_email) {
            // Fresh pair
            (None, None) => {
                let user = User::new(username, email);
                self.user_repo.create(&user).await?;
                user
            }
            // Exact repeat of an existing pair: resend, never conflict
            (Some(u), Some(v)) if u.user_id == v.user_id => u,
            // The pair collides with someone else's account
            (Some(_), _) => return Err(AuthError::UsernameTaken),
            (None, Some(_)) => return Err(AuthError::EmailTaken),
        };

        let code = user.issue_confirmation_code();
        self.user_repo.update(&user).await?;

        // Delivery failure must not roll back provisioning; the user can
        // simply sign up again to get a new code.
        let message = MailMessage::confirmation_code(&user.email, &code);
        if let Err(e) = self.mailer.send(&message).await {
            tracing::warn!(error = %e, username = %user.username, "Confirmation mail failed");
        }

        tracing::info!(username = %user.username, "Confirmation code issued");

        Ok(SignUpOutput {
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::mail::RecordingMailer;
    use crate::infra::memory::InMemoryUserRepository;

    fn use_case() -> (
        Arc<InMemoryUserRepository>,
        Arc<RecordingMailer>,
        SignUpUseCase<InMemoryUserRepository, RecordingMailer>,
    ) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let mailer = Arc::new(RecordingMailer::new());
        let use_case = SignUpUseCase::new(Arc::clone(&repo), Arc::clone(&mailer));
        (repo, mailer, use_case)
    }

    fn input(username: &str, email: &str) -> SignUpInput {
        SignUpInput {
            username: username.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_fresh_pair_creates_user_and_mails_code() {
        let (repo, mailer, use_case) = use_case();

        let output = use_case
            .execute(input("alice", "alice@example.com"))
            .await
            .unwrap();
        assert_eq!(output.username, "alice");
        assert_eq!(output.email, "alice@example.com");

        let user = repo
            .find_by_username(&Username::new("alice").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(user.confirmation_code.is_some());

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "alice@example.com");
    }

    #[tokio::test]
    async fn test_repeat_pair_resends_instead_of_conflicting() {
        let (repo, mailer, use_case) = use_case();

        use_case
            .execute(input("alice", "alice@example.com"))
            .await
            .unwrap();
        use_case
            .execute(input("alice", "alice@example.com"))
            .await
            .unwrap();

        // Still one account, two mails, and only the latest code active.
        let page = repo
            .list(None, &kernel::page::PageParams::default())
            .await
            .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(mailer.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_username_taken_by_other_email() {
        let (_, _, use_case) = use_case();

        use_case
            .execute(input("alice", "alice@example.com"))
            .await
            .unwrap();
        let result = use_case.execute(input("alice", "other@example.com")).await;
        assert!(matches!(result, Err(AuthError::UsernameTaken)));
    }

    #[tokio::test]
    async fn test_email_taken_by_other_username() {
        let (_, _, use_case) = use_case();

        use_case
            .execute(input("alice", "alice@example.com"))
            .await
            .unwrap();
        let result = use_case.execute(input("bob", "alice@example.com")).await;
        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_reserved_username_rejected() {
        let (_, mailer, use_case) = use_case();

        let result = use_case.execute(input("me", "me@example.com")).await;
        assert!(matches!(result, Err(AuthError::Validation(_))));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_email_is_normalized() {
        let (repo, _, use_case) = use_case();

        let output = use_case
            .execute(input("alice", "  Alice@Example.COM "))
            .await
            .unwrap();
        assert_eq!(output.email, "alice@example.com");

        let user = repo
            .find_by_email(&Email::new("alice@example.com").unwrap())
            .await
            .unwrap();
        assert!(user.is_some());
    }
}
