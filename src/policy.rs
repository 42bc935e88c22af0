//! Access Control Policy
//!
//! The single decision point for which role may perform which mutation.
//! Handlers evaluate the capability table once at the top of the request
//! (`require`), before any input validation or existence check, so an
//! under-privileged actor is turned away first.
//!
//! Two decisions need more context than (role, action) and get their own
//! functions: status changes depend on the item's current assignee, and
//! read access depends on checklist creatorship or membership.

use uuid::Uuid;

use crate::auth::users::Role;
use crate::error::ApiError;

/// Mutations and reads gated by the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateChecklist,
    RenameChecklist,
    DeleteChecklist,
    AddMember,
    RemoveMember,
    CreateItem,
    DeleteItem,
    UpdateItemStatus,
    AssignItem,
    ViewChecklist,
}

impl Action {
    /// The capability table: is `role` ever allowed to perform this action?
    ///
    /// `UpdateItemStatus` for members and `ViewChecklist` carry an
    /// additional contextual condition, checked by `can_change_status`
    /// and `can_view` respectively.
    pub fn allowed_for(self, role: Role) -> bool {
        match self {
            Action::CreateChecklist
            | Action::RenameChecklist
            | Action::AddMember
            | Action::RemoveMember
            | Action::CreateItem
            | Action::DeleteItem
            | Action::AssignItem => matches!(role, Role::Owner | Role::Admin),
            Action::DeleteChecklist => matches!(role, Role::Owner),
            Action::UpdateItemStatus => {
                matches!(role, Role::Owner | Role::Admin | Role::Member)
            }
            Action::ViewChecklist => true,
        }
    }
}

/// Require that `role` may perform `action`, or fail with Forbidden
pub fn require(role: Role, action: Action) -> Result<(), ApiError> {
    if action.allowed_for(role) {
        Ok(())
    } else {
        Err(ApiError::forbidden("Insufficient permissions"))
    }
}

/// Decide whether `actor` may change the status of an item
///
/// Owners and admins always may. Members only when the item is currently
/// assigned to them; an unassigned item is not theirs to move. Viewers
/// never may, assigned or not.
pub fn can_change_status(role: Role, actor: Uuid, assignee: Option<Uuid>) -> bool {
    match role {
        Role::Owner | Role::Admin => true,
        Role::Member => assignee == Some(actor),
        Role::Viewer => false,
    }
}

/// Decide whether `actor` may read a checklist and its children
///
/// Read access belongs to the creator and to membership holders; roles
/// play no part here.
pub fn can_view(actor: Uuid, created_by: Uuid, is_member: bool) -> bool {
    is_member || actor == created_by
}
