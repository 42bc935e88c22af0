//! Item Model and Database Operations
//!
//! An item is a trackable unit within a checklist: a title, a packing
//! status, and at most one assignee who must hold a membership on the
//! item's checklist.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;
use uuid::Uuid;

/// Packing status of an item
///
/// The packing flow runs To Pack → Packed → Delivered. The machine is
/// explicit but deliberately permissive: items come back out of bags,
/// so backward transitions stay legal (see `can_transition_to`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum ItemStatus {
    #[serde(rename = "To Pack")]
    #[sqlx(rename = "To Pack")]
    ToPack,
    Packed,
    Delivered,
}

/// Error returned when parsing an unknown status string
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid status: {0}")]
pub struct InvalidStatus(pub String);

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::ToPack => "To Pack",
            ItemStatus::Packed => "Packed",
            ItemStatus::Delivered => "Delivered",
        }
    }

    /// Whether moving from `self` to `next` is a legal transition
    ///
    /// Every pair is currently legal, backward ones included; this is
    /// the single seam where a stricter rule would go.
    pub fn can_transition_to(self, _next: ItemStatus) -> bool {
        true
    }
}

impl FromStr for ItemStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "To Pack" => Ok(ItemStatus::ToPack),
            "Packed" => Ok(ItemStatus::Packed),
            "Delivered" => Ok(ItemStatus::Delivered),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Item {
    pub id: Uuid,
    pub title: String,
    pub status: ItemStatus,
    pub checklist_id: Uuid,
    pub assigned_to: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Item joined with its assignee's name, for item views
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemWithAssignee {
    pub id: Uuid,
    pub title: String,
    pub status: ItemStatus,
    pub assigned_to: Option<Uuid>,
    pub assignee_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-status item counts for one checklist
#[derive(Debug, Default, Clone, Copy)]
pub struct StatusCounts {
    pub total: i64,
    pub to_pack: i64,
    pub packed: i64,
    pub delivered: i64,
}

/// Result of the duplicate-assignment precondition check
///
/// Present when another item with the same title on the same checklist
/// is already assigned to the target user. The collision only informs:
/// callers log a conflict alert and proceed with the assignment.
#[derive(Debug)]
pub struct AssignmentCollision {
    /// The item already carrying the same title for the target assignee
    pub duplicate_item_id: Uuid,
    /// Current assignee of the item being reassigned, if any
    pub prior_holder: Option<Uuid>,
}

/// Get an item by ID
pub async fn get_item(pool: &SqlitePool, id: Uuid) -> Result<Option<Item>, sqlx::Error> {
    let item = sqlx::query_as::<_, Item>(
        r#"
        SELECT id, title, status, checklist_id, assigned_to, created_at
        FROM items
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

/// Get an item joined with its assignee's name
pub async fn get_with_assignee(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<ItemWithAssignee>, sqlx::Error> {
    let item = sqlx::query_as::<_, ItemWithAssignee>(
        r#"
        SELECT i.id, i.title, i.status, i.assigned_to, u.name AS assignee_name, i.created_at
        FROM items i
        LEFT JOIN users u ON u.id = i.assigned_to
        WHERE i.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

/// List a checklist's items with assignee names, oldest first
pub async fn list_with_assignees(
    pool: &SqlitePool,
    checklist_id: Uuid,
) -> Result<Vec<ItemWithAssignee>, sqlx::Error> {
    let items = sqlx::query_as::<_, ItemWithAssignee>(
        r#"
        SELECT i.id, i.title, i.status, i.assigned_to, u.name AS assignee_name, i.created_at
        FROM items i
        LEFT JOIN users u ON u.id = i.assigned_to
        WHERE i.checklist_id = ?
        ORDER BY i.created_at ASC
        "#,
    )
    .bind(checklist_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Count a checklist's items grouped by status
pub async fn status_counts(
    pool: &SqlitePool,
    checklist_id: Uuid,
) -> Result<StatusCounts, sqlx::Error> {
    let rows = sqlx::query_as::<_, (ItemStatus, i64)>(
        r#"
        SELECT status, COUNT(*)
        FROM items
        WHERE checklist_id = ?
        GROUP BY status
        "#,
    )
    .bind(checklist_id)
    .fetch_all(pool)
    .await?;

    let mut counts = StatusCounts::default();
    for (status, count) in rows {
        counts.total += count;
        match status {
            ItemStatus::ToPack => counts.to_pack = count,
            ItemStatus::Packed => counts.packed = count,
            ItemStatus::Delivered => counts.delivered = count,
        }
    }

    Ok(counts)
}

/// Check whether assigning `new_assignee` to `item` collides with an
/// existing same-title assignment on the same checklist
pub async fn check_assignment_collision(
    pool: &SqlitePool,
    item: &Item,
    new_assignee: Uuid,
) -> Result<Option<AssignmentCollision>, sqlx::Error> {
    let duplicate: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT id
        FROM items
        WHERE checklist_id = ? AND title = ? AND assigned_to = ? AND id != ?
        LIMIT 1
        "#,
    )
    .bind(item.checklist_id)
    .bind(&item.title)
    .bind(new_assignee)
    .bind(item.id)
    .fetch_optional(pool)
    .await?;

    Ok(duplicate.map(|duplicate_item_id| AssignmentCollision {
        duplicate_item_id,
        prior_holder: item.assigned_to,
    }))
}

/// Insert an item; status defaults to To Pack
pub async fn insert_item(
    conn: &mut SqliteConnection,
    checklist_id: Uuid,
    title: &str,
    assigned_to: Option<Uuid>,
) -> Result<Item, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let item = sqlx::query_as::<_, Item>(
        r#"
        INSERT INTO items (id, title, status, checklist_id, assigned_to, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, title, status, checklist_id, assigned_to, created_at
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(ItemStatus::ToPack)
    .bind(checklist_id)
    .bind(assigned_to)
    .bind(now)
    .fetch_one(conn)
    .await?;

    Ok(item)
}

/// Update an item's status
pub async fn update_status(
    conn: &mut SqliteConnection,
    id: Uuid,
    status: ItemStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE items SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(conn)
        .await?;

    Ok(())
}

/// Update an item's assignee; `None` clears the assignment
pub async fn update_assignee(
    conn: &mut SqliteConnection,
    id: Uuid,
    assigned_to: Option<Uuid>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE items SET assigned_to = ? WHERE id = ?")
        .bind(assigned_to)
        .bind(id)
        .execute(conn)
        .await?;

    Ok(())
}

/// Delete an item by ID
pub async fn delete_item(conn: &mut SqliteConnection, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM items WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(())
}
