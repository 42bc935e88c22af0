//! Router Configuration
//!
//! Combines the public and protected route tables into the final Axum
//! router: authentication middleware on the protected set, then CORS and
//! request tracing over everything.

use axum::{http::StatusCode, middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_middleware;
use crate::routes::api_routes::{protected_routes, public_routes};
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let protected = protected_routes().layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    Router::new()
        .merge(public_routes())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
        .with_state(state)
}
