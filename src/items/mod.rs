//! Item Module
//!
//! Items are the trackable units inside a checklist. Each carries a
//! packing status and at most one assignee, who must hold a membership
//! on the item's checklist.

pub mod db;
pub mod handlers;

pub use db::{AssignmentCollision, Item, ItemStatus, StatusCounts};
pub use handlers::{create_item, delete_item, update_item, ItemView};
