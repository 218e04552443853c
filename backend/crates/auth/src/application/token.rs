//! Bearer Token Issuance and Verification
//!
//! Tokens are signed JWTs (HS256) verified statelessly: signature plus
//! expiry, no server-side session lookup. Revocation before expiry is
//! deliberately not supported.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User UUID
    pub sub: Uuid,
    /// Username at issuance time
    pub username: String,
    /// Role code at issuance time
    pub role: String,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

impl Claims {
    /// Role parsed back from the claim; `None` for unknown codes.
    pub fn role(&self) -> Option<UserRole> {
        UserRole::from_code(&self.role)
    }
}

/// Issues and verifies bearer tokens.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issue a token for `user`, valid for the configured TTL.
    pub fn issue(&self, user: &User) -> AuthResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.user_id.into_uuid(),
            username: user.username.as_str().to_string(),
            role: user.role.code().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("token encoding failed: {e}")))
    }

    /// Verify signature and expiry; returns the embedded claims.
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::Unauthorized)
    }
}
