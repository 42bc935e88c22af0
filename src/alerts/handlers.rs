//! Alert HTTP Handlers
//!
//! Two read-only feeds: one checklist's alerts, and the alerts across
//! every checklist the user can access. Alerts are created internally
//! by other handlers; there is no POST surface.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::alerts::db::{self, AlertKind};
use crate::checklists::db::{get_checklist, list_accessible};
use crate::error::ApiError;
use crate::members::db::is_member;
use crate::middleware::auth::AuthUser;
use crate::policy;
use crate::server::state::AppState;

/// Cap on the cross-checklist alert feed
const FEED_LIMIT: i64 = 50;

/// Alert view for the per-checklist feed
#[derive(Debug, Serialize)]
pub struct AlertView {
    pub id: Uuid,
    pub kind: AlertKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Alert view for the cross-checklist feed, with its checklist named
#[derive(Debug, Serialize)]
pub struct AlertFeedView {
    pub id: Uuid,
    pub kind: AlertKind,
    pub message: String,
    pub checklist: ChecklistRef,
    pub created_at: DateTime<Utc>,
}

/// Checklist reference nested in feed entries
#[derive(Debug, Serialize)]
pub struct ChecklistRef {
    pub id: Uuid,
    pub title: String,
}

/// Get all alerts for a specific checklist, newest first
pub async fn get_checklist_alerts(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(checklist_id): Path<Uuid>,
) -> Result<Json<Vec<AlertView>>, ApiError> {
    let checklist = get_checklist(&state.db, checklist_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Checklist not found"))?;

    let member = is_member(&state.db, checklist_id, actor.id).await?;
    if !policy::can_view(actor.id, checklist.created_by, member) {
        return Err(ApiError::forbidden(
            "You don't have access to this checklist",
        ));
    }

    let alerts = db::list_for_checklist(&state.db, checklist_id)
        .await?
        .into_iter()
        .map(|a| AlertView {
            id: a.id,
            kind: a.kind,
            message: a.message,
            created_at: a.created_at,
        })
        .collect();

    Ok(Json(alerts))
}

/// Get alerts across all checklists accessible to the user
///
/// Accessible means created or member-of, for every role. Capped at the
/// 50 most recent.
pub async fn get_all_alerts(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Vec<AlertFeedView>>, ApiError> {
    let accessible = list_accessible(&state.db, actor.id, true).await?;
    if accessible.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let ids: Vec<Uuid> = accessible.iter().map(|c| c.id).collect();
    let alerts = db::list_for_checklists(&state.db, &ids, FEED_LIMIT).await?;

    let feed = alerts
        .into_iter()
        .map(|a| {
            let title = accessible
                .iter()
                .find(|c| c.id == a.checklist_id)
                .map(|c| c.title.clone())
                .unwrap_or_else(|| "Unknown Checklist".to_string());
            AlertFeedView {
                id: a.id,
                kind: a.kind,
                message: a.message,
                checklist: ChecklistRef {
                    id: a.checklist_id,
                    title,
                },
                created_at: a.created_at,
            }
        })
        .collect();

    Ok(Json(feed))
}
