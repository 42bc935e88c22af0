//! Authentication Handler Types
//!
//! Request and response types shared by the signup, login, me, and
//! logout handlers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::users::{Role, User};

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    /// Display name
    pub name: String,
    /// Email address (must be unique)
    pub email: String,
    /// Password (hashed before storage)
    pub password: String,
    /// Role, case-insensitive: owner, admin, member, or viewer
    pub role: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    /// Password (verified against the stored hash)
    pub password: String,
}

/// Auth response
///
/// Returned by signup and login. Contains the bearer token and the user
/// view for immediate authentication.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// Bearer token (24-hour expiration)
    pub token: String,
    pub user: UserView,
}

/// User view without sensitive data
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
