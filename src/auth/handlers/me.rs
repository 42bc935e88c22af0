//! Current User Handler
//!
//! Implements GET /api/auth/me, returning the authenticated user's view.

use axum::response::Json;

use crate::auth::handlers::types::UserView;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Get the current authenticated user
pub async fn get_me(AuthUser(user): AuthUser) -> Result<Json<UserView>, ApiError> {
    Ok(Json(UserView {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    }))
}
