//! Logout Handler
//!
//! Implements POST /api/auth/logout. Revokes the presented token in the
//! session store; the token stops validating immediately even though its
//! expiry lies in the future.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    response::Json,
};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

/// Logout handler
///
/// Runs behind the auth middleware, so the token has already been
/// validated; it only remains to revoke it.
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    state.sessions.revoke(token);
    tracing::info!("User logged out: {}", user.email);

    Ok(Json(serde_json::json!({
        "message": "Logged out successfully"
    })))
}
