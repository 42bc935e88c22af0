//! Alert Model and Database Operations
//!
//! Alerts are append-only notification records owned by a checklist.
//! The application writes them as side effects of member and item
//! mutations and never updates or deletes them individually.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

/// Kind of alert: a detected conflict, or a notable update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AlertKind {
    Conflict,
    Update,
}

/// Alert record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Alert {
    pub id: Uuid,
    pub kind: AlertKind,
    pub message: String,
    pub checklist_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insert an alert
///
/// Takes a connection so callers can commit the alert atomically with
/// the mutation that caused it.
pub async fn insert_alert(
    conn: &mut SqliteConnection,
    kind: AlertKind,
    message: &str,
    checklist_id: Uuid,
) -> Result<Alert, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let alert = sqlx::query_as::<_, Alert>(
        r#"
        INSERT INTO alerts (id, kind, message, checklist_id, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, kind, message, checklist_id, created_at
        "#,
    )
    .bind(id)
    .bind(kind)
    .bind(message)
    .bind(checklist_id)
    .bind(now)
    .fetch_one(conn)
    .await?;

    Ok(alert)
}

/// List one checklist's alerts, newest first
pub async fn list_for_checklist(
    pool: &SqlitePool,
    checklist_id: Uuid,
) -> Result<Vec<Alert>, sqlx::Error> {
    let alerts = sqlx::query_as::<_, Alert>(
        r#"
        SELECT id, kind, message, checklist_id, created_at
        FROM alerts
        WHERE checklist_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(checklist_id)
    .fetch_all(pool)
    .await?;

    Ok(alerts)
}

/// List alerts across several checklists, newest first, capped
pub async fn list_for_checklists(
    pool: &SqlitePool,
    checklist_ids: &[Uuid],
    limit: i64,
) -> Result<Vec<Alert>, sqlx::Error> {
    if checklist_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = sqlx::QueryBuilder::new(
        "SELECT id, kind, message, checklist_id, created_at FROM alerts WHERE checklist_id IN (",
    );
    let mut separated = builder.separated(", ");
    for id in checklist_ids {
        separated.push_bind(*id);
    }
    builder.push(") ORDER BY created_at DESC LIMIT ");
    builder.push_bind(limit);

    let alerts = builder
        .build_query_as::<Alert>()
        .fetch_all(pool)
        .await?;

    Ok(alerts)
}
