//! Login Handler
//!
//! Implements user authentication for POST /api/auth/login.
//!
//! # Security
//!
//! Unknown email and wrong password return the same 401 so accounts
//! cannot be enumerated. Password verification goes through bcrypt.

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::auth::handlers::types::{AuthResponse, LoginRequest, UserView};
use crate::auth::users::get_user_by_email;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Login handler
///
/// Verifies the email and password and returns a bearer token on
/// success.
///
/// # Errors
///
/// * `Unauthorized` - unknown email or wrong password
/// * `InvalidInput` - missing email or password
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::invalid_input("Email and password are required"));
    }

    let user = get_user_by_email(&state.db, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login for unknown email: {}", request.email);
            ApiError::unauthorized("Invalid credentials")
        })?;

    let valid = verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        ApiError::internal("Failed to verify password")
    })?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", request.email);
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = state.sessions.issue(user.id, &user.email).map_err(|e| {
        tracing::error!("Failed to issue token: {:?}", e);
        ApiError::internal("Failed to issue token")
    })?;

    tracing::info!("User logged in: {} ({})", user.name, user.email);

    Ok(Json(AuthResponse {
        token,
        user: UserView::from(&user),
    }))
}
