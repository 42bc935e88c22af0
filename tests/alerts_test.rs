//! Alert API integration tests
//!
//! Per-checklist feed ordering and access, and the cross-checklist feed
//! with its nested checklist references.

mod common;

use axum::http::StatusCode;
use common::{add_member, bearer, create_checklist, create_item, list_alerts, signup_user, test_server};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_checklist_alerts_newest_first() {
    let (server, _pool) = test_server().await;
    let owner = signup_user(&server, "Asha", "asha@example.com", "owner").await;
    let member = signup_user(&server, "Bala", "bala@example.com", "member").await;
    let checklist_id = create_checklist(&server, &owner, "Goa Trip").await;
    add_member(&server, &owner, checklist_id, member.id).await;
    let item_id = create_item(&server, &owner, checklist_id, "Tent").await;

    let (name, value) = bearer(&owner);
    let response = server
        .put(&format!("/api/checklists/items/{item_id}"))
        .add_header(name, value)
        .json(&serde_json::json!({ "status": "Packed" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let alerts = list_alerts(&server, &owner, checklist_id).await;
    assert_eq!(alerts.len(), 2);
    assert_eq!(
        alerts[0]["message"],
        "Asha changed 'Tent' status from 'To Pack' to 'Packed'"
    );
    assert_eq!(alerts[1]["message"], "Asha added Bala to the checklist");
}

#[tokio::test]
async fn test_checklist_alerts_access_control() {
    let (server, _pool) = test_server().await;
    let owner = signup_user(&server, "Asha", "asha@example.com", "owner").await;
    let outsider = signup_user(&server, "Chan", "chan@example.com", "member").await;
    let checklist_id = create_checklist(&server, &owner, "Goa Trip").await;

    let (name, value) = bearer(&outsider);
    let response = server
        .get(&format!("/api/alerts/{checklist_id}"))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let (name, value) = bearer(&owner);
    let response = server
        .get(&format!("/api/alerts/{}", uuid::Uuid::new_v4()))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_all_alerts_feed_nests_checklist() {
    let (server, _pool) = test_server().await;
    let owner = signup_user(&server, "Asha", "asha@example.com", "owner").await;
    let member = signup_user(&server, "Bala", "bala@example.com", "member").await;
    let checklist_id = create_checklist(&server, &owner, "Goa Trip").await;
    add_member(&server, &owner, checklist_id, member.id).await;

    let (name, value) = bearer(&owner);
    let response = server.get("/api/alerts").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let feed: Vec<serde_json::Value> = response.json();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["kind"], "update");
    assert_eq!(feed[0]["checklist"]["id"], checklist_id.to_string());
    assert_eq!(feed[0]["checklist"]["title"], "Goa Trip");
}

#[tokio::test]
async fn test_all_alerts_feed_scoped_to_accessible_checklists() {
    let (server, _pool) = test_server().await;
    let owner = signup_user(&server, "Asha", "asha@example.com", "owner").await;
    let other_owner = signup_user(&server, "Omar", "omar@example.com", "owner").await;
    let member = signup_user(&server, "Bala", "bala@example.com", "member").await;

    let mine = create_checklist(&server, &owner, "Goa Trip").await;
    let theirs = create_checklist(&server, &other_owner, "Offsite").await;
    add_member(&server, &owner, mine, member.id).await;
    add_member(&server, &other_owner, theirs, member.id).await;

    // Each checklist now carries one add-member alert; the member sees
    // both, the first owner only their own.
    let (name, value) = bearer(&member);
    let feed: Vec<serde_json::Value> =
        server.get("/api/alerts").add_header(name, value).await.json();
    assert_eq!(feed.len(), 2);

    let (name, value) = bearer(&owner);
    let feed: Vec<serde_json::Value> =
        server.get("/api/alerts").add_header(name, value).await.json();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["checklist"]["title"], "Goa Trip");
}

#[tokio::test]
async fn test_all_alerts_feed_empty_for_new_user() {
    let (server, _pool) = test_server().await;
    let user = signup_user(&server, "Newbie", "new@example.com", "member").await;

    let (name, value) = bearer(&user);
    let response = server.get("/api/alerts").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let feed: Vec<serde_json::Value> = response.json();
    assert!(feed.is_empty());
}
