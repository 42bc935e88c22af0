//! Authentication Middleware
//!
//! Protects routes that require a signed-in user. Extracts the bearer
//! token from the Authorization header, validates it against the
//! session store, resolves the user record (identity and role come from
//! the database, not the token), and attaches the result to request
//! extensions for handlers.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::users::{get_user_by_id, Role};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Authenticated user resolved from a bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Authentication middleware
///
/// 1. Extracts the token from the Authorization header
/// 2. Validates it (signature, expiry, revocation)
/// 3. Loads the user record for identity and role
/// 4. Attaches `AuthenticatedUser` to request extensions
///
/// Returns 401 if any step fails.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::unauthorized("Authentication required")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        ApiError::unauthorized("Authentication required")
    })?;

    let claims = state.sessions.validate(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        ApiError::unauthorized("Invalid or expired token")
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::error!("Invalid user ID in token: {:?}", e);
        ApiError::unauthorized("Invalid or expired token")
    })?;

    let user = get_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token for unknown user: {}", user_id);
            ApiError::unauthorized("Invalid or expired token")
        })?;

    request.extensions_mut().insert(AuthenticatedUser {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Usable as a handler parameter on any route behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::unauthorized("Authentication required")
            })?;

        Ok(AuthUser(user))
    }
}
