//! Item HTTP Handlers
//!
//! Item creation and deletion are owner/admin mutations. Status updates
//! run through the contextual policy check; a denied attempt still
//! leaves a conflict alert behind before the error returns. Assignment
//! updates run the explicit collision precondition and log a conflict
//! alert without blocking the assignment.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::alerts::db::{insert_alert, AlertKind};
use crate::auth::users::{get_user_by_id, Role, UserRef};
use crate::checklists::db::get_checklist;
use crate::error::ApiError;
use crate::items::db::{self, ItemStatus, ItemWithAssignee};
use crate::members::db::is_member;
use crate::middleware::auth::{AuthUser, AuthenticatedUser};
use crate::policy::{self, Action};
use crate::server::state::AppState;

/// Item view returned by item and checklist-detail endpoints
#[derive(Debug, Serialize)]
pub struct ItemView {
    pub id: Uuid,
    pub title: String,
    pub status: ItemStatus,
    pub assigned_to: Option<UserRef>,
    pub created_at: DateTime<Utc>,
}

impl From<ItemWithAssignee> for ItemView {
    fn from(row: ItemWithAssignee) -> Self {
        let assigned_to = match (row.assigned_to, row.assignee_name) {
            (Some(id), Some(name)) => Some(UserRef { id, name }),
            _ => None,
        };
        Self {
            id: row.id,
            title: row.title,
            status: row.status,
            assigned_to,
            created_at: row.created_at,
        }
    }
}

/// Request body for creating an item
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub title: String,
    /// Optional initial assignee; must hold a membership
    pub assigned_to: Option<Uuid>,
}

/// Request body for updating an item
///
/// `assigned_to` distinguishes absent (leave untouched) from explicit
/// null (clear the assignment).
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<Uuid>>,
}

/// Deserialize a field so a present null maps to Some(None)
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Add an item to a checklist (owner/admin only)
pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(checklist_id): Path<Uuid>,
    Json(request): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemView>), ApiError> {
    policy::require(actor.role, Action::CreateItem)?;

    if request.title.trim().is_empty() {
        return Err(ApiError::invalid_input("Item title is required"));
    }

    if get_checklist(&state.db, checklist_id).await?.is_none() {
        return Err(ApiError::not_found("Checklist not found"));
    }

    let mut assignee: Option<UserRef> = None;
    if let Some(target) = request.assigned_to {
        let target_user = get_user_by_id(&state.db, target)
            .await?
            .ok_or_else(|| ApiError::not_found("Assigned user not found"))?;
        if !is_member(&state.db, checklist_id, target).await? {
            return Err(ApiError::invalid_input(
                "User is not a member of this checklist",
            ));
        }
        assignee = Some(UserRef::from(&target_user));
    }

    let mut conn = state.db.acquire().await?;
    let item = db::insert_item(&mut conn, checklist_id, &request.title, request.assigned_to).await?;

    tracing::info!(
        "Item '{}' added to checklist {} by {}",
        item.title,
        checklist_id,
        actor.email
    );

    Ok((
        StatusCode::CREATED,
        Json(ItemView {
            id: item.id,
            title: item.title,
            status: item.status,
            assigned_to: assignee,
            created_at: item.created_at,
        }),
    ))
}

/// Update an item's status and/or assignment
///
/// Status and assignment changes requested together commit as one unit:
/// if either part is refused, neither is applied.
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(item_id): Path<Uuid>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<ItemView>, ApiError> {
    let item = db::get_item(&state.db, item_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;
    let checklist = get_checklist(&state.db, item.checklist_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Checklist not found"))?;

    let member = is_member(&state.db, item.checklist_id, actor.id).await?;
    if !policy::can_view(actor.id, checklist.created_by, member) {
        return Err(ApiError::forbidden(
            "You don't have access to this checklist",
        ));
    }

    // Decide the status change before touching anything.
    let mut status_change: Option<(ItemStatus, ItemStatus)> = None;
    if let Some(raw) = &request.status {
        let next: ItemStatus = raw.parse().map_err(|_| {
            ApiError::invalid_input("Invalid status. Must be one of: To Pack, Packed, Delivered")
        })?;

        if !policy::can_change_status(actor.role, actor.id, item.assigned_to) {
            // Denied attempts still leave a conflict alert behind; it is
            // the only write of the request and commits before the error
            // returns.
            let (alert_message, error_message) = denied_status_messages(&actor, &item, next);
            let mut conn = state.db.acquire().await?;
            insert_alert(
                &mut conn,
                AlertKind::Conflict,
                &alert_message,
                item.checklist_id,
            )
            .await?;

            tracing::warn!(
                "Denied status change on item {} by {} ({})",
                item.id,
                actor.email,
                actor.role
            );
            return Err(ApiError::forbidden(error_message));
        }

        if !item.status.can_transition_to(next) {
            return Err(ApiError::invalid_input(format!(
                "Cannot move '{}' from {} to {}",
                item.title, item.status, next
            )));
        }

        status_change = Some((item.status, next));
    }

    // Decide the assignment change and its collision alert.
    let mut assignment_change: Option<Option<Uuid>> = None;
    let mut collision_message: Option<String> = None;
    if let Some(assignment) = request.assigned_to {
        policy::require(actor.role, Action::AssignItem)?;

        if let Some(target) = assignment {
            let target_user = get_user_by_id(&state.db, target)
                .await?
                .ok_or_else(|| ApiError::not_found("Assigned user not found"))?;
            if !is_member(&state.db, item.checklist_id, target).await? {
                return Err(ApiError::invalid_input(
                    "User is not a member of this checklist",
                ));
            }

            if let Some(collision) = db::check_assignment_collision(&state.db, &item, target).await?
            {
                let prior_name = match collision.prior_holder {
                    Some(id) => get_user_by_id(&state.db, id)
                        .await?
                        .map(|u| u.name)
                        .unwrap_or_else(|| "nobody".to_string()),
                    None => "nobody".to_string(),
                };
                collision_message = Some(format!(
                    "Potential conflict: '{}' assigned to both {} and {}",
                    item.title, prior_name, target_user.name
                ));
            }
        }

        assignment_change = Some(assignment);
    }

    // Single commit unit: entity writes and their alerts land together.
    if status_change.is_some() || assignment_change.is_some() {
        let mut tx = state.db.begin().await?;

        if let Some((old, new)) = status_change {
            db::update_status(&mut tx, item.id, new).await?;
            insert_alert(
                &mut tx,
                AlertKind::Update,
                &format!(
                    "{} changed '{}' status from '{}' to '{}'",
                    actor.name, item.title, old, new
                ),
                item.checklist_id,
            )
            .await?;
        }

        if let Some(target) = assignment_change {
            if let Some(message) = &collision_message {
                insert_alert(&mut tx, AlertKind::Conflict, message, item.checklist_id).await?;
            }
            db::update_assignee(&mut tx, item.id, target).await?;
        }

        tx.commit().await?;
    }

    let view = db::get_with_assignee(&state.db, item.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;

    Ok(Json(ItemView::from(view)))
}

/// Alert and error messages for a denied status-change attempt
fn denied_status_messages(
    actor: &AuthenticatedUser,
    item: &db::Item,
    attempted: ItemStatus,
) -> (String, &'static str) {
    if actor.role == Role::Viewer {
        (
            format!(
                "{} attempted to mark '{}' as {} but viewers cannot update items",
                actor.name, item.title, attempted
            ),
            "Viewers cannot update item status",
        )
    } else {
        (
            format!(
                "{} attempted to mark '{}' as {} but was not assigned to it",
                actor.name, item.title, attempted
            ),
            "You can only update items assigned to you",
        )
    }
}

/// Delete an item (owner/admin only)
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(item_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    policy::require(actor.role, Action::DeleteItem)?;

    let item = db::get_item(&state.db, item_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;

    let mut conn = state.db.acquire().await?;
    db::delete_item(&mut conn, item.id).await?;

    tracing::info!("Item '{}' deleted by {}", item.title, actor.email);

    Ok(Json(serde_json::json!({
        "message": "Item deleted successfully"
    })))
}
