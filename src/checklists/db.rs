//! Checklist Model and Database Operations
//!
//! A checklist is created by exactly one user and owns its items,
//! memberships, and alerts: deleting the checklist removes all three.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

/// Checklist record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Checklist {
    pub id: Uuid,
    pub title: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Get a checklist by ID
pub async fn get_checklist(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<Checklist>, sqlx::Error> {
    let checklist = sqlx::query_as::<_, Checklist>(
        r#"
        SELECT id, title, created_by, created_at
        FROM checklists
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(checklist)
}

/// List the checklists a user can access
///
/// With `include_created` the result is the union of checklists the
/// user created and checklists they hold a membership on (the
/// owner/admin view); without it, memberships only (the member/viewer
/// view).
pub async fn list_accessible(
    pool: &SqlitePool,
    user_id: Uuid,
    include_created: bool,
) -> Result<Vec<Checklist>, sqlx::Error> {
    let checklists = if include_created {
        sqlx::query_as::<_, Checklist>(
            r#"
            SELECT DISTINCT c.id, c.title, c.created_by, c.created_at
            FROM checklists c
            LEFT JOIN memberships m ON m.checklist_id = c.id AND m.user_id = ?
            WHERE c.created_by = ? OR m.user_id IS NOT NULL
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, Checklist>(
            r#"
            SELECT c.id, c.title, c.created_by, c.created_at
            FROM checklists c
            JOIN memberships m ON m.checklist_id = c.id
            WHERE m.user_id = ?
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?
    };

    Ok(checklists)
}

/// Insert a checklist
pub async fn insert_checklist(
    conn: &mut SqliteConnection,
    title: &str,
    created_by: Uuid,
) -> Result<Checklist, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let checklist = sqlx::query_as::<_, Checklist>(
        r#"
        INSERT INTO checklists (id, title, created_by, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, title, created_by, created_at
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(created_by)
    .bind(now)
    .fetch_one(conn)
    .await?;

    Ok(checklist)
}

/// Rename a checklist
pub async fn rename_checklist(
    conn: &mut SqliteConnection,
    id: Uuid,
    title: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE checklists SET title = ? WHERE id = ?")
        .bind(title)
        .bind(id)
        .execute(conn)
        .await?;

    Ok(())
}

/// Delete a checklist and everything it owns
///
/// Items, memberships, and alerts go first so no orphans remain even if
/// foreign-key enforcement is off. Callers wrap this in a transaction.
pub async fn delete_checklist_cascade(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM items WHERE checklist_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM memberships WHERE checklist_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM alerts WHERE checklist_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM checklists WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(())
}
