//! Checklist Module
//!
//! Checklists are the owned collections at the center of the model:
//! created by one user, holding items, memberships, and alerts that
//! live and die with them.

pub mod db;
pub mod handlers;

pub use db::Checklist;
pub use handlers::{
    create_checklist, delete_checklist, get_checklist_details, get_progress, list_checklists,
    update_checklist,
};
