//! Signup Handler
//!
//! Implements user registration for POST /api/auth/signup.
//!
//! # Registration Process
//!
//! 1. Validate required fields and the role value
//! 2. Check that the email is not already registered
//! 3. Hash the password using bcrypt
//! 4. Create the user and issue a token
//!
//! # Security
//!
//! Passwords are hashed with bcrypt at DEFAULT_COST and never returned
//! in responses.

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::auth::handlers::types::{AuthResponse, SignupRequest, UserView};
use crate::auth::users::{create_user, get_user_by_email, Role};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Sign up handler
///
/// # Errors
///
/// * `InvalidInput` - missing field, unknown role, or duplicate email
/// * `Storage` - database or hashing failure
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    for (field, value) in [
        ("name", &request.name),
        ("email", &request.email),
        ("password", &request.password),
        ("role", &request.role),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::invalid_input(format!(
                "Missing required field: {field}"
            )));
        }
    }

    let role: Role = request.role.parse().map_err(|_| {
        ApiError::invalid_input("Invalid role. Must be one of: owner, admin, member, viewer")
    })?;

    if get_user_by_email(&state.db, &request.email).await?.is_some() {
        tracing::warn!("Signup with already registered email: {}", request.email);
        return Err(ApiError::invalid_input("Email already registered"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST).map_err(|e| {
        tracing::error!("Password hashing failed: {:?}", e);
        ApiError::internal("Failed to hash password")
    })?;

    let user = create_user(&state.db, &request.name, &request.email, &password_hash, role).await?;

    let token = state.sessions.issue(user.id, &user.email).map_err(|e| {
        tracing::error!("Failed to issue token: {:?}", e);
        ApiError::internal("Failed to issue token")
    })?;

    tracing::info!("User registered: {} ({})", user.name, user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserView::from(&user),
        }),
    ))
}
