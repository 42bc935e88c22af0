//! Membership HTTP Handlers
//!
//! Listing members of a checklist, adding and removing members, and the
//! user picker for owners and admins. Adding or removing a member emits
//! an "update" alert in the same transaction as the membership write.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::alerts::db::{insert_alert, AlertKind};
use crate::auth::users::{get_user_by_id, list_users, Role};
use crate::checklists::db::get_checklist;
use crate::error::ApiError;
use crate::members::db;
use crate::middleware::auth::AuthUser;
use crate::policy::{self, Action};
use crate::server::state::AppState;

/// Member of a checklist, with the membership id needed for removal
#[derive(Debug, Serialize)]
pub struct MemberView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub membership_id: Uuid,
}

/// Request body for adding a member
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: Uuid,
}

/// Response for a newly created membership
#[derive(Debug, Serialize)]
pub struct MembershipView {
    pub id: Uuid,
    pub checklist_id: Uuid,
    pub user: MemberUser,
    pub created_at: DateTime<Utc>,
}

/// User details nested in a membership response
#[derive(Debug, Serialize)]
pub struct MemberUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Get all members of a checklist
pub async fn list_members(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(checklist_id): Path<Uuid>,
) -> Result<Json<Vec<MemberView>>, ApiError> {
    let checklist = get_checklist(&state.db, checklist_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Checklist not found"))?;

    let is_member = db::is_member(&state.db, checklist_id, actor.id).await?;
    if !policy::can_view(actor.id, checklist.created_by, is_member) {
        return Err(ApiError::forbidden(
            "You don't have access to this checklist",
        ));
    }

    let members = db::list_for_checklist(&state.db, checklist_id)
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

    Ok(Json(members))
}

/// Add a member to a checklist (owner/admin only)
pub async fn add_member(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(checklist_id): Path<Uuid>,
    Json(request): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<MembershipView>), ApiError> {
    policy::require(actor.role, Action::AddMember)?;

    if get_checklist(&state.db, checklist_id).await?.is_none() {
        return Err(ApiError::not_found("Checklist not found"));
    }

    let member_user = get_user_by_id(&state.db, request.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if db::is_member(&state.db, checklist_id, request.user_id).await? {
        return Err(ApiError::invalid_input(
            "User is already a member of this checklist",
        ));
    }

    let mut tx = state.db.begin().await?;
    let membership = db::insert_membership(&mut tx, checklist_id, request.user_id).await?;
    insert_alert(
        &mut tx,
        AlertKind::Update,
        &format!("{} added {} to the checklist", actor.name, member_user.name),
        checklist_id,
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        "Member {} added to checklist {} by {}",
        member_user.email,
        checklist_id,
        actor.email
    );

    Ok((
        StatusCode::CREATED,
        Json(MembershipView {
            id: membership.id,
            checklist_id: membership.checklist_id,
            user: MemberUser {
                id: member_user.id,
                name: member_user.name,
                email: member_user.email,
                role: member_user.role,
            },
            created_at: membership.created_at,
        }),
    ))
}

/// Remove a member from a checklist (owner/admin only)
///
/// Removal is refused when the target membership belongs to the
/// checklist's only remaining owner-roled member.
pub async fn remove_member(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(membership_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    policy::require(actor.role, Action::RemoveMember)?;

    let membership = db::get_membership(&state.db, membership_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Membership not found"))?;

    let member_user = get_user_by_id(&state.db, membership.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Associated user or checklist not found"))?;
    if get_checklist(&state.db, membership.checklist_id)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found(
            "Associated user or checklist not found",
        ));
    }

    if member_user.role == Role::Owner {
        let owner_count = db::count_owner_members(&state.db, membership.checklist_id).await?;
        if owner_count <= 1 {
            return Err(ApiError::forbidden(
                "Cannot remove the only owner of the checklist",
            ));
        }
    }

    let mut tx = state.db.begin().await?;
    db::delete_membership(&mut tx, membership_id).await?;
    insert_alert(
        &mut tx,
        AlertKind::Update,
        &format!(
            "{} removed {} from the checklist",
            actor.name, member_user.name
        ),
        membership.checklist_id,
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        "Member {} removed from checklist {} by {}",
        member_user.email,
        membership.checklist_id,
        actor.email
    );

    Ok(Json(serde_json::json!({
        "message": "Member removed successfully"
    })))
}

/// Get all users that can be added to checklists (owner/admin only)
pub async fn available_users(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Vec<MemberUser>>, ApiError> {
    policy::require(actor.role, Action::AddMember)?;

    let users = list_users(&state.db)
        .await?
        .into_iter()
        .map(|u| MemberUser {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
        })
        .collect();

    Ok(Json(users))
}
