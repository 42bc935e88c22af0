//! Session Management and JWT Tokens
//!
//! This module owns the token lifecycle: issue, validate, revoke.
//! Tokens are stateless JWTs; revocation is an in-process denylist so a
//! logged-out token stops validating before it expires.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Token lifetime: 24 hours
const TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Session validation error
#[derive(Debug, Error)]
pub enum SessionError {
    /// Token was explicitly revoked via logout
    #[error("token revoked")]
    Revoked,

    /// Token is malformed, has a bad signature, or expired
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Token store with an explicit issue/validate/revoke lifecycle
///
/// Cloning is cheap; all clones share the same revocation set.
#[derive(Clone)]
pub struct SessionStore {
    encoding: EncodingKey,
    decoding: DecodingKey,
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl SessionStore {
    /// Create a session store from a signing secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
            revoked: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Create a session store from the `JWT_SECRET` environment variable
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using development secret");
            "dev-secret-key-change-in-production".to_string()
        });
        Self::new(&secret)
    }

    /// Issue a token for a user
    ///
    /// # Arguments
    /// * `user_id` - User ID (UUID)
    /// * `email` - User email
    ///
    /// # Returns
    /// JWT token string
    pub fn issue(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs();

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: now + TOKEN_TTL_SECS,
            iat: now,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify and decode a token
    ///
    /// Checks the signature and expiry, then the revocation set.
    pub fn validate(&self, token: &str) -> Result<Claims, SessionError> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;

        if self.revoked.read().unwrap().contains(token) {
            return Err(SessionError::Revoked);
        }

        Ok(token_data.claims)
    }

    /// Revoke a token so later validations fail
    pub fn revoke(&self, token: &str) {
        self.revoked.write().unwrap().insert(token.to_string());
    }
}
