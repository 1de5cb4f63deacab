//! Shared test harness: an in-process server over the in-memory store.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use tokio::sync::mpsc;

use linkboard::application::services::VisitRecording;
use linkboard::config::{Config, StorageBackend};
use linkboard::domain::repositories::LinkRepository;
use linkboard::domain::visit_worker::run_visit_worker;
use linkboard::infrastructure::persistence::MemoryLinkRepository;
use linkboard::routes::app_router;
use linkboard::state::AppState;

/// Token for the regular user `alice`.
pub const ALICE: &str = "alice-token";
/// Token for the regular user `bob`.
pub const BOB: &str = "bob-token";
/// Token for the admin user `root`.
pub const ADMIN: &str = "admin-token";

pub struct TestApp {
    pub server: TestServer,
    pub repo: Arc<MemoryLinkRepository>,
}

/// Spawns an app with synchronous visit recording.
pub fn spawn_app() -> TestApp {
    spawn_app_with(VisitRecording::Synchronous)
}

/// Spawns an app with the given visit recording mode.
///
/// The visit worker runs on the test runtime, so detached-mode tests must
/// poll the store for the recording to land.
pub fn spawn_app_with(mode: VisitRecording) -> TestApp {
    let repo = Arc::new(MemoryLinkRepository::new());
    let dyn_repo: Arc<dyn LinkRepository> = repo.clone();

    let (visit_tx, visit_rx) = mpsc::channel(100);
    tokio::spawn(run_visit_worker(visit_rx, dyn_repo.clone()));

    let state = AppState::build(dyn_repo, &test_config(mode), visit_tx)
        .expect("failed to build test state");
    let server = TestServer::new(app_router(state)).expect("failed to start test server");

    TestApp { server, repo }
}

fn test_config(mode: VisitRecording) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".to_string(),
        storage_backend: StorageBackend::Memory,
        database_url: None,
        domains: vec!["short.test".to_string(), "alt.test".to_string()],
        alias_length: 7,
        alias_max_retries: 10,
        visit_recording: mode,
        visit_queue_capacity: 100,
        visit_history_limit: 1000,
        api_tokens: format!("{ALICE}=alice,{BOB}=bob,{ADMIN}=root:admin"),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        db_max_connections: 1,
        db_connect_timeout: 1,
    }
}

impl TestApp {
    /// Creates a link via the API and returns its alias.
    pub async fn create_link(&self, token: Option<&str>, body: Value) -> String {
        let mut req = self.server.post("/api/links").json(&body);
        if let Some(token) = token {
            req = req.authorization_bearer(token);
        }

        let response = req.await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["alias"]
            .as_str()
            .expect("alias missing from create response")
            .to_string()
    }

    /// Creates a link to `url` owned by the given token's user.
    pub async fn create_simple_link(&self, token: Option<&str>, url: &str) -> String {
        self.create_link(token, json!({ "url": url })).await
    }
}
