//! API Route Tables
//!
//! This module defines the API route tables, split by authentication
//! requirement.
//!
//! # Routes
//!
//! ## Public
//! - `GET /` - API welcome payload
//! - `POST /api/auth/signup` - user registration
//! - `POST /api/auth/login` - user login
//! - `POST /api/suggestions` - packing suggestion heuristic
//!
//! ## Protected (bearer token)
//! - `GET /api/auth/me`, `POST /api/auth/logout`
//! - `GET|POST /api/checklists`, `GET|PUT|DELETE /api/checklists/{id}`
//! - `GET /api/checklists/{id}/progress`
//! - `POST /api/checklists/{id}/items`
//! - `PUT|DELETE /api/checklists/items/{item_id}`
//! - `GET|POST /api/members/{checklist_id}`,
//!   `DELETE /api/members/{membership_id}` (one route: the id is a
//!   checklist for GET/POST and a membership for DELETE)
//! - `GET /api/members/available`
//! - `GET /api/alerts`, `GET /api/alerts/{checklist_id}`

use axum::{
    routing::{get, post, put},
    Json, Router,
};

use crate::alerts::handlers::{get_all_alerts, get_checklist_alerts};
use crate::auth::handlers::{get_me, login, logout, signup};
use crate::checklists::handlers::{
    create_checklist, delete_checklist, get_checklist_details, get_progress, list_checklists,
    update_checklist,
};
use crate::items::handlers::{create_item, delete_item, update_item};
use crate::members::handlers::{add_member, available_users, list_members, remove_member};
use crate::server::state::AppState;
use crate::suggestions::get_suggestions;

/// Welcome payload naming the API groups
async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to PackPal API",
        "version": "1.0.0",
        "endpoints": {
            "auth": "/api/auth",
            "checklists": "/api/checklists",
            "members": "/api/members",
            "alerts": "/api/alerts",
            "suggestions": "/api/suggestions"
        }
    }))
}

/// Routes that require no authentication
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/suggestions", post(get_suggestions))
}

/// Routes behind the authentication middleware
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/auth/logout", post(logout))
        .route("/api/checklists", get(list_checklists).post(create_checklist))
        .route(
            "/api/checklists/{id}",
            get(get_checklist_details)
                .put(update_checklist)
                .delete(delete_checklist),
        )
        .route("/api/checklists/{id}/progress", get(get_progress))
        .route("/api/checklists/{id}/items", post(create_item))
        .route(
            "/api/checklists/items/{item_id}",
            put(update_item).delete(delete_item),
        )
        .route("/api/members/available", get(available_users))
        .route(
            "/api/members/{id}",
            get(list_members).post(add_member).delete(remove_member),
        )
        .route("/api/alerts", get(get_all_alerts))
        .route("/api/alerts/{checklist_id}", get(get_checklist_alerts))
}
