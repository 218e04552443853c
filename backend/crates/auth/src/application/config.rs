//! Application Configuration
//!
//! Configuration for the Auth application layer.

use chrono::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC signing secret for bearer tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Bearer token lifetime (24 hours)
    pub token_ttl: Duration,
    /// Confirmation code lifetime (24 hours)
    pub code_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: Duration::hours(24),
            code_ttl: Duration::hours(24),
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&platform::crypto::random_bytes(32));
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config from an externally supplied secret.
    ///
    /// Secrets shorter than 32 bytes are rejected; longer ones are
    /// truncated.
    pub fn from_secret(secret: &[u8]) -> Option<Self> {
        if secret.len() < 32 {
            return None;
        }
        let mut buf = [0u8; 32];
        buf.copy_from_slice(&secret[..32]);
        Some(Self {
            token_secret: buf,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_secret_rejects_short_input() {
        assert!(AuthConfig::from_secret(&[1u8; 16]).is_none());
        assert!(AuthConfig::from_secret(&[1u8; 32]).is_some());
        assert!(AuthConfig::from_secret(&[1u8; 48]).is_some());
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_ne!(a.token_secret, b.token_secret);
    }
}
