//! Database Operations for Memberships
//!
//! A membership grants a user access to a checklist, independent of
//! checklist ownership. The (checklist, user) pair is unique.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::auth::users::Role;

/// Membership record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Membership {
    pub id: Uuid,
    pub checklist_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Membership joined with its user's details, for member listings
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberRecord {
    pub membership_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Check whether a user holds a membership on a checklist
pub async fn is_member(
    pool: &SqlitePool,
    checklist_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM memberships
        WHERE checklist_id = ? AND user_id = ?
        "#,
    )
    .bind(checklist_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Get a membership by ID
pub async fn get_membership(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<Membership>, sqlx::Error> {
    let membership = sqlx::query_as::<_, Membership>(
        r#"
        SELECT id, checklist_id, user_id, created_at
        FROM memberships
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(membership)
}

/// List a checklist's members with their user details
pub async fn list_for_checklist(
    pool: &SqlitePool,
    checklist_id: Uuid,
) -> Result<Vec<MemberRecord>, sqlx::Error> {
    let members = sqlx::query_as::<_, MemberRecord>(
        r#"
        SELECT m.id AS membership_id, u.id AS user_id, u.name, u.email, u.role
        FROM memberships m
        JOIN users u ON u.id = m.user_id
        WHERE m.checklist_id = ?
        ORDER BY m.created_at ASC
        "#,
    )
    .bind(checklist_id)
    .fetch_all(pool)
    .await?;

    Ok(members)
}

/// Count a checklist's members whose role is owner
///
/// Backs the last-owner removal guard: the scan runs over every
/// membership of the checklist and counts users holding the owner role.
pub async fn count_owner_members(
    pool: &SqlitePool,
    checklist_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM memberships m
        JOIN users u ON u.id = m.user_id
        WHERE m.checklist_id = ? AND u.role = 'owner'
        "#,
    )
    .bind(checklist_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Insert a membership
///
/// Takes a connection so callers can run it inside the same transaction
/// as the alert it emits.
pub async fn insert_membership(
    conn: &mut SqliteConnection,
    checklist_id: Uuid,
    user_id: Uuid,
) -> Result<Membership, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let membership = sqlx::query_as::<_, Membership>(
        r#"
        INSERT INTO memberships (id, checklist_id, user_id, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, checklist_id, user_id, created_at
        "#,
    )
    .bind(id)
    .bind(checklist_id)
    .bind(user_id)
    .bind(now)
    .fetch_one(conn)
    .await?;

    Ok(membership)
}

/// Delete a membership by ID
pub async fn delete_membership(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM memberships WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(())
}
