//! Integration tests for link creation.

mod common;

use axum::http::StatusCode;
use linkboard::domain::repositories::LinkRepository;
use serde_json::{Value, json};

use common::{ALICE, spawn_app};

#[tokio::test]
async fn test_create_generates_alias_of_configured_length() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["alias"].as_str().unwrap().len(), 7);
    assert_eq!(body["url"], "https://example.com");
    assert_eq!(
        body["short_url"].as_str().unwrap(),
        format!("short.test/{}", body["alias"].as_str().unwrap())
    );
    assert_eq!(body["clicks"], 0);
    assert!(body.get("owner_id").is_none());
}

#[tokio::test]
async fn test_authenticated_creation_records_owner() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/links")
        .authorization_bearer(ALICE)
        .json(&json!({ "url": "https://example.com", "alias": "my-link" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["alias"], "my-link");
    assert_eq!(body["owner_id"], "alice");
}

#[tokio::test]
async fn test_taken_custom_alias_is_a_conflict() {
    let app = spawn_app();
    app.create_link(None, json!({ "url": "https://one.example", "alias": "taken" }))
        .await;

    let response = app
        .server
        .post("/api/links")
        .json(&json!({ "url": "https://two.example", "alias": "taken" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "conflict");
    assert_eq!(body["error"]["details"]["alias"], "taken");

    // The original mapping is untouched.
    let link = app.repo.find_by_alias("taken").await.unwrap().unwrap();
    assert_eq!(link.url, "https://one.example");
}

#[tokio::test]
async fn test_empty_alias_means_generate() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "alias": "" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["alias"].as_str().unwrap().len(), 7);
}

#[tokio::test]
async fn test_invalid_url_is_rejected_without_store_write() {
    let app = spawn_app();

    for url in ["not-a-url", "ftp://example.com/file", ""] {
        let response = app
            .server
            .post("/api/links")
            .json(&json!({ "url": url, "alias": "wont-exist" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "validation_error");
    }

    assert!(app.repo.find_by_alias("wont-exist").await.unwrap().is_none());
}

#[tokio::test]
async fn test_malformed_alias_is_rejected() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "alias": "no spaces!" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_alternate_domain_changes_short_url() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "alias": "alt", "domain": "alt.test" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["short_url"], "alt.test/alt");
    assert_eq!(body["domain"], "alt.test");
}

#[tokio::test]
async fn test_unsupported_domain_is_rejected() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "domain": "evil.test" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_bearer_token_is_rejected() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/links")
        .authorization_bearer("not-a-real-token")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get("www-authenticate").unwrap(),
        "Bearer"
    );
}
