//! Checklist HTTP Handlers
//!
//! Listing, creation, detail, rename, delete, and the progress
//! breakdown. Creation auto-adds the creator as a member; deletion
//! cascades to items, memberships, and alerts in one transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::users::{get_user_by_id, Role, UserRef};
use crate::checklists::db;
use crate::error::ApiError;
use crate::items::db::{list_with_assignees, status_counts};
use crate::items::handlers::ItemView;
use crate::members::db::{is_member, list_for_checklist};
use crate::members::handlers::MemberView;
use crate::middleware::auth::AuthUser;
use crate::policy::{self, Action};
use crate::server::state::AppState;

/// Item-status counts shown on checklist summaries
#[derive(Debug, Serialize)]
pub struct ChecklistStats {
    pub total: i64,
    pub packed: i64,
    pub delivered: i64,
}

/// Checklist summary for the listing endpoint
#[derive(Debug, Serialize)]
pub struct ChecklistSummary {
    pub id: Uuid,
    pub title: String,
    pub creator: UserRef,
    pub created_at: DateTime<Utc>,
    pub stats: ChecklistStats,
}

/// Checklist view without children
#[derive(Debug, Serialize)]
pub struct ChecklistView {
    pub id: Uuid,
    pub title: String,
    pub creator: UserRef,
    pub created_at: DateTime<Utc>,
}

/// Checklist detail with items and members
#[derive(Debug, Serialize)]
pub struct ChecklistDetail {
    pub id: Uuid,
    pub title: String,
    pub creator: UserRef,
    pub created_at: DateTime<Utc>,
    pub items: Vec<ItemView>,
    pub members: Vec<MemberView>,
}

/// Request body for creating or renaming a checklist
#[derive(Debug, Deserialize)]
pub struct ChecklistRequest {
    #[serde(default)]
    pub title: String,
}

/// One status slice of the progress breakdown
#[derive(Debug, Serialize)]
pub struct StatusSlice {
    pub count: i64,
    pub percent: f64,
}

/// Progress breakdown for one checklist
#[derive(Debug, Serialize)]
pub struct ProgressView {
    pub checklist_id: Uuid,
    pub total_items: i64,
    pub to_pack: StatusSlice,
    pub packed: StatusSlice,
    pub delivered: StatusSlice,
}

/// Resolve a creator reference, tolerating a missing user record
async fn creator_ref(state: &AppState, created_by: Uuid) -> Result<UserRef, ApiError> {
    let name = get_user_by_id(&state.db, created_by)
        .await?
        .map(|u| u.name)
        .unwrap_or_else(|| "Unknown".to_string());
    Ok(UserRef {
        id: created_by,
        name,
    })
}

/// Get all checklists accessible to the current user
///
/// Owners and admins see the union of checklists they created and
/// checklists they were added to; members and viewers only see the
/// latter.
pub async fn list_checklists(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Vec<ChecklistSummary>>, ApiError> {
    let include_created = matches!(actor.role, Role::Owner | Role::Admin);
    let checklists = db::list_accessible(&state.db, actor.id, include_created).await?;

    let mut result = Vec::with_capacity(checklists.len());
    for checklist in checklists {
        let creator = creator_ref(&state, checklist.created_by).await?;
        let counts = status_counts(&state.db, checklist.id).await?;
        result.push(ChecklistSummary {
            id: checklist.id,
            title: checklist.title,
            creator,
            created_at: checklist.created_at,
            stats: ChecklistStats {
                total: counts.total,
                packed: counts.packed,
                delivered: counts.delivered,
            },
        });
    }

    Ok(Json(result))
}

/// Create a new checklist (owner/admin only)
///
/// The creator is added as a member in the same transaction.
pub async fn create_checklist(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Json(request): Json<ChecklistRequest>,
) -> Result<(StatusCode, Json<ChecklistView>), ApiError> {
    policy::require(actor.role, Action::CreateChecklist)?;

    if request.title.trim().is_empty() {
        return Err(ApiError::invalid_input("Checklist title is required"));
    }

    let mut tx = state.db.begin().await?;
    let checklist = db::insert_checklist(&mut tx, &request.title, actor.id).await?;
    crate::members::db::insert_membership(&mut tx, checklist.id, actor.id).await?;
    tx.commit().await?;

    tracing::info!("Checklist '{}' created by {}", checklist.title, actor.email);

    Ok((
        StatusCode::CREATED,
        Json(ChecklistView {
            id: checklist.id,
            title: checklist.title,
            creator: UserRef {
                id: actor.id,
                name: actor.name,
            },
            created_at: checklist.created_at,
        }),
    ))
}

/// Get a checklist's details with its items and members
pub async fn get_checklist_details(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(checklist_id): Path<Uuid>,
) -> Result<Json<ChecklistDetail>, ApiError> {
    let checklist = db::get_checklist(&state.db, checklist_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Checklist not found"))?;

    let member = is_member(&state.db, checklist_id, actor.id).await?;
    if !policy::can_view(actor.id, checklist.created_by, member) {
        return Err(ApiError::forbidden(
            "You don't have access to this checklist",
        ));
    }

    let items = list_with_assignees(&state.db, checklist_id)
        .await?
        .into_iter()
        .map(ItemView::from)
        .collect();

    let members = list_for_checklist(&state.db, checklist_id)
        .await?
        .into_iter()
        .map(|m| MemberView {
            id: m.user_id,
            name: m.name,
            email: m.email,
            role: m.role,
            membership_id: m.membership_id,
        })
        .collect();

    let creator = creator_ref(&state, checklist.created_by).await?;

    Ok(Json(ChecklistDetail {
        id: checklist.id,
        title: checklist.title,
        creator,
        created_at: checklist.created_at,
        items,
        members,
    }))
}

/// Rename a checklist (owner/admin only)
pub async fn update_checklist(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(checklist_id): Path<Uuid>,
    Json(request): Json<ChecklistRequest>,
) -> Result<Json<ChecklistView>, ApiError> {
    policy::require(actor.role, Action::RenameChecklist)?;

    if request.title.trim().is_empty() {
        return Err(ApiError::invalid_input("Checklist title is required"));
    }

    let checklist = db::get_checklist(&state.db, checklist_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Checklist not found"))?;

    let mut conn = state.db.acquire().await?;
    db::rename_checklist(&mut conn, checklist.id, &request.title).await?;
    drop(conn);

    let creator = creator_ref(&state, checklist.created_by).await?;

    Ok(Json(ChecklistView {
        id: checklist.id,
        title: request.title,
        creator,
        created_at: checklist.created_at,
    }))
}

/// Delete a checklist (owner only)
///
/// Items, memberships, and alerts are removed with it.
pub async fn delete_checklist(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(checklist_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    policy::require(actor.role, Action::DeleteChecklist)?;

    let checklist = db::get_checklist(&state.db, checklist_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Checklist not found"))?;

    let mut tx = state.db.begin().await?;
    db::delete_checklist_cascade(&mut tx, checklist.id).await?;
    tx.commit().await?;

    tracing::info!("Checklist '{}' deleted by {}", checklist.title, actor.email);

    Ok(Json(serde_json::json!({
        "message": "Checklist deleted successfully"
    })))
}

/// Get progress statistics for a checklist
pub async fn get_progress(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(checklist_id): Path<Uuid>,
) -> Result<Json<ProgressView>, ApiError> {
    let checklist = db::get_checklist(&state.db, checklist_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Checklist not found"))?;

    let member = is_member(&state.db, checklist_id, actor.id).await?;
    if !policy::can_view(actor.id, checklist.created_by, member) {
        return Err(ApiError::forbidden(
            "You don't have access to this checklist",
        ));
    }

    let counts = status_counts(&state.db, checklist_id).await?;

    Ok(Json(ProgressView {
        checklist_id,
        total_items: counts.total,
        to_pack: StatusSlice {
            count: counts.to_pack,
            percent: percent(counts.to_pack, counts.total),
        },
        packed: StatusSlice {
            count: counts.packed,
            percent: percent(counts.packed, counts.total),
        },
        delivered: StatusSlice {
            count: counts.delivered,
            percent: percent(counts.delivered, counts.total),
        },
    }))
}

/// Share of `total`, as a percentage rounded to one decimal place
fn percent(count: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}
