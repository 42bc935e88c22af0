//! Server Initialization
//!
//! Assembles the Axum application: database pool, session store, state,
//! and the router with all routes and layers.

use axum::Router;

use crate::auth::sessions::SessionStore;
use crate::routes::router::create_router;
use crate::server::config::load_database;
use crate::server::state::AppState;

/// Create and configure the Axum application
///
/// Connects to the database (running migrations), builds the session
/// store from the environment, and wires up the router. The database is
/// mandatory; a connection failure aborts startup.
pub async fn create_app() -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing PackPal backend server");

    let pool = load_database().await?;
    let sessions = SessionStore::from_env();

    let state = AppState {
        db: pool,
        sessions,
    };

    tracing::info!("Router configured");
    Ok(create_router(state))
}
