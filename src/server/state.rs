//! Application State Management
//!
//! Defines the application state shared across handlers and the
//! `FromRef` impls that let Axum extract individual services.
//!
//! # Thread Safety
//!
//! Both fields clone cheaply: the pool is internally reference-counted
//! and the session store shares one revocation set across clones.

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::auth::sessions::SessionStore;

/// Application state for the Axum server
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub db: SqlitePool,
    /// Token store (issue, validate, revoke)
    pub sessions: SessionStore,
}

/// Allow handlers to extract the pool directly from `AppState`
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

/// Allow handlers to extract the session store directly from `AppState`
impl FromRef<AppState> for SessionStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}
