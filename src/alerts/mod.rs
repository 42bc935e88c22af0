//! Alert Module
//!
//! Immutable notification records describing notable or conflicting
//! actions on a checklist, ordered newest first for display.

pub mod db;
pub mod handlers;

pub use db::{insert_alert, Alert, AlertKind};
pub use handlers::{get_all_alerts, get_checklist_alerts};
