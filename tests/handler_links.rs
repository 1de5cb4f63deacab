//! Integration tests for link update and deletion.

mod common;

use axum::http::StatusCode;
use linkboard::domain::repositories::LinkRepository;
use serde_json::{Value, json};

use common::{ADMIN, ALICE, BOB, spawn_app};

#[tokio::test]
async fn test_owner_can_update_destination() {
    let app = spawn_app();
    app.create_link(Some(ALICE), json!({ "url": "https://old.example", "alias": "mine" }))
        .await;

    let response = app
        .server
        .patch("/api/links/mine")
        .authorization_bearer(ALICE)
        .json(&json!({ "url": "https://new.example" }))
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["url"], "https://new.example");
    // The alias and counter survive the edit.
    assert_eq!(body["alias"], "mine");
    assert_eq!(body["clicks"], 0);
}

#[tokio::test]
async fn test_non_owner_cannot_update() {
    let app = spawn_app();
    app.create_link(Some(ALICE), json!({ "url": "https://old.example", "alias": "mine" }))
        .await;

    let response = app
        .server
        .patch("/api/links/mine")
        .authorization_bearer(BOB)
        .json(&json!({ "url": "https://hijacked.example" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);

    let link = app.repo.find_by_alias("mine").await.unwrap().unwrap();
    assert_eq!(link.url, "https://old.example");
}

#[tokio::test]
async fn test_anonymous_cannot_update_owned_link() {
    let app = spawn_app();
    app.create_link(Some(ALICE), json!({ "url": "https://old.example", "alias": "mine" }))
        .await;

    let response = app
        .server
        .patch("/api/links/mine")
        .json(&json!({ "url": "https://hijacked.example" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_can_update_any_link() {
    let app = spawn_app();
    app.create_link(Some(ALICE), json!({ "url": "https://old.example", "alias": "mine" }))
        .await;

    let response = app
        .server
        .patch("/api/links/mine")
        .authorization_bearer(ADMIN)
        .json(&json!({ "url": "https://moderated.example" }))
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_unowned_link_is_editable_by_anyone() {
    let app = spawn_app();
    app.create_link(None, json!({ "url": "https://old.example", "alias": "public" }))
        .await;

    let response = app
        .server
        .patch("/api/links/public")
        .authorization_bearer(BOB)
        .json(&json!({ "url": "https://new.example" }))
        .await;

    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_update_with_invalid_url_is_rejected() {
    let app = spawn_app();
    app.create_link(Some(ALICE), json!({ "url": "https://old.example", "alias": "mine" }))
        .await;

    let response = app
        .server
        .patch("/api/links/mine")
        .authorization_bearer(ALICE)
        .json(&json!({ "url": "javascript:alert(1)" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_alias_is_not_found() {
    let app = spawn_app();

    let response = app
        .server
        .patch("/api/links/ghost")
        .authorization_bearer(ALICE)
        .json(&json!({ "url": "https://new.example" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_delete_removes_link_and_history() {
    let app = spawn_app();
    app.create_link(Some(ALICE), json!({ "url": "https://example.com", "alias": "mine" }))
        .await;
    app.server.get("/mine").await.assert_status(StatusCode::TEMPORARY_REDIRECT);

    let response = app
        .server
        .delete("/api/links/mine")
        .authorization_bearer(ALICE)
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], true);

    assert!(app.repo.find_by_alias("mine").await.unwrap().is_none());
    assert!(app.repo.visits_by_alias("mine", 10).await.unwrap().is_empty());

    // A redirect after deletion falls back to the root.
    let response = app.server.get("/mine").await;
    assert_eq!(response.headers().get("location").unwrap(), "/");
}

#[tokio::test]
async fn test_non_owner_cannot_delete() {
    let app = spawn_app();
    app.create_link(Some(ALICE), json!({ "url": "https://example.com", "alias": "mine" }))
        .await;

    let response = app
        .server
        .delete("/api/links/mine")
        .authorization_bearer(BOB)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(app.repo.find_by_alias("mine").await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_unknown_alias_is_not_found() {
    let app = spawn_app();

    let response = app
        .server
        .delete("/api/links/ghost")
        .authorization_bearer(ALICE)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
