//! Confirmation Code Value Object
//!
//! The single-use secret issued at sign-up and exchanged for an access
//! token. Exactly one code is active per user; issuing a new one
//! replaces the old.
//!
//! Codes expire after a TTL and are invalidated on successful exchange.
//! The original system kept codes valid indefinitely and reusable; both
//! deviations are deliberate hardening (see DESIGN.md).

use chrono::{DateTime, Duration, Utc};
use platform::crypto::{constant_time_eq, random_secret};

/// Random bytes per code; base64url-encoded this yields 32 characters.
const CODE_BYTES_LEN: usize = 24;

/// An issued confirmation code bound to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationCode {
    secret: String,
    issued_at: DateTime<Utc>,
}

impl ConfirmationCode {
    /// Issue a fresh code.
    pub fn issue() -> Self {
        Self {
            secret: random_secret(CODE_BYTES_LEN),
            issued_at: Utc::now(),
        }
    }

    /// Reconstruct from storage.
    pub fn from_db(secret: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            secret: secret.into(),
            issued_at,
        }
    }

    /// Constant-time comparison against a presented code.
    pub fn matches(&self, presented: &str) -> bool {
        constant_time_eq(self.secret.as_bytes(), presented.as_bytes())
    }

    /// Whether the code has outlived its TTL.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        Utc::now() - self.issued_at > ttl
    }

    /// The plaintext secret, for the outbound mail only.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_generates_distinct_secrets() {
        let a = ConfirmationCode::issue();
        let b = ConfirmationCode::issue();
        assert_ne!(a.secret(), b.secret());
    }

    #[test]
    fn test_matches() {
        let code = ConfirmationCode::issue();
        let secret = code.secret().to_string();
        assert!(code.matches(&secret));
        assert!(!code.matches("wrong-code"));
        assert!(!code.matches(""));
    }

    #[test]
    fn test_expiry() {
        let fresh = ConfirmationCode::issue();
        assert!(!fresh.is_expired(Duration::hours(24)));

        let stale = ConfirmationCode::from_db("abc", Utc::now() - Duration::hours(25));
        assert!(stale.is_expired(Duration::hours(24)));
        assert!(!stale.is_expired(Duration::hours(48)));
    }

    #[test]
    fn test_secret_is_url_safe() {
        let code = ConfirmationCode::issue();
        assert!(
            code.secret()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }
}
