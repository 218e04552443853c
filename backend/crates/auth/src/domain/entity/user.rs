//! User Entity

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{
    confirmation_code::ConfirmationCode, email::Email, user_id::UserId, user_role::UserRole,
    username::Username,
};

/// User entity
///
/// Created on first successful sign-up for a never-seen
/// `(username, email)` pair; reused idempotently on repeat sign-up with
/// the identical pair. Never deleted by the auth core itself.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier, assigned at creation, immutable
    pub user_id: UserId,
    /// Unique handle, also the lookup key for `/users/{username}`
    pub username: Username,
    /// Unique, lowercased address the confirmation code is mailed to
    pub email: Email,
    /// Privilege level; only admins may change it
    pub role: UserRole,
    /// Optional profile fields
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    /// Single active confirmation code, if any
    pub confirmation_code: Option<ConfirmationCode>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default role.
    pub fn new(username: Username, email: Email) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            username,
            email,
            role: UserRole::default(),
            first_name: None,
            last_name: None,
            bio: None,
            confirmation_code: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Issue a fresh confirmation code, replacing any previous one.
    ///
    /// Returns the plaintext secret so the caller can hand it to the
    /// mail collaborator. The plaintext never appears in API responses.
    pub fn issue_confirmation_code(&mut self) -> String {
        let code = ConfirmationCode::issue();
        let secret = code.secret().to_string();
        self.confirmation_code = Some(code);
        self.updated_at = Utc::now();
        secret
    }

    /// Verify a presented code against the active one.
    ///
    /// Fails when no code is active, the code expired, or it mismatches.
    pub fn verify_confirmation_code(&self, presented: &str, ttl: Duration) -> bool {
        match &self.confirmation_code {
            Some(code) => !code.is_expired(ttl) && code.matches(presented),
            None => false,
        }
    }

    /// Invalidate the active code. Called after a successful exchange
    /// so codes are single-use.
    pub fn clear_confirmation_code(&mut self) {
        self.confirmation_code = None;
        self.updated_at = Utc::now();
    }

    /// Update user role
    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    pub fn set_username(&mut self, username: Username) {
        self.username = username;
        self.updated_at = Utc::now();
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    pub fn set_profile(
        &mut self,
        first_name: Option<String>,
        last_name: Option<String>,
        bio: Option<String>,
    ) {
        if first_name.is_some() {
            self.first_name = first_name;
        }
        if last_name.is_some() {
            self.last_name = last_name;
        }
        if bio.is_some() {
            self.bio = bio;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            Username::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = sample_user();
        assert_eq!(user.role, UserRole::User);
        assert!(user.confirmation_code.is_none());
        assert!(user.first_name.is_none());
    }

    #[test]
    fn test_issue_replaces_previous_code() {
        let mut user = sample_user();
        let first = user.issue_confirmation_code();
        let second = user.issue_confirmation_code();
        assert_ne!(first, second);

        // Only the latest code verifies.
        assert!(!user.verify_confirmation_code(&first, Duration::hours(24)));
        assert!(user.verify_confirmation_code(&second, Duration::hours(24)));
    }

    #[test]
    fn test_verify_without_active_code() {
        let user = sample_user();
        assert!(!user.verify_confirmation_code("anything", Duration::hours(24)));
    }

    #[test]
    fn test_clear_makes_code_single_use() {
        let mut user = sample_user();
        let secret = user.issue_confirmation_code();
        assert!(user.verify_confirmation_code(&secret, Duration::hours(24)));

        user.clear_confirmation_code();
        assert!(!user.verify_confirmation_code(&secret, Duration::hours(24)));
    }

    #[test]
    fn test_set_profile_keeps_unset_fields() {
        let mut user = sample_user();
        user.set_profile(Some("Alice".into()), None, None);
        user.set_profile(None, Some("Liddell".into()), None);
        assert_eq!(user.first_name.as_deref(), Some("Alice"));
        assert_eq!(user.last_name.as_deref(), Some("Liddell"));
        assert!(user.bio.is_none());
    }
}
