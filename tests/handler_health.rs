//! Integration test for the health endpoint.

mod common;

use axum::http::StatusCode;
use serde_json::Value;

use common::spawn_app;

#[tokio::test]
async fn test_health_reports_store_and_queue() {
    let app = spawn_app();

    let response = app.server.get("/health").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["store"]["status"], "ok");
    assert_eq!(body["checks"]["visit_queue"]["status"], "ok");
}
