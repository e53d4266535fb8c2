// SPDX-License-Identifier: MIT

//! Shared test harness: a router backed by a throwaway SQLite file.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use calorie_tracker::config::Config;
use calorie_tracker::db::Database;
use calorie_tracker::routes::create_router;
use calorie_tracker::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// A full application wired against a temp-file database.
///
/// The pool holds several connections, so an in-memory database would
/// give each connection its own empty schema. A file in a temp dir keeps
/// every connection on the same data and disappears with the test.
pub struct TestApp {
    pub router: Router,
    #[allow(dead_code)]
    pub state: Arc<AppState>,
    _db_dir: tempfile::TempDir,
}

impl TestApp {
    #[allow(dead_code)]
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn with config overrides applied on top of the test defaults.
    pub async fn spawn_with(tweak: impl FnOnce(&mut Config)) -> Self {
        let db_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = db_dir.path().join("tracker.sqlite");

        let mut config = Config::test_default();
        config.database_url = format!("sqlite:{}", db_path.display());
        tweak(&mut config);

        let db = Database::connect(&config.database_url)
            .await
            .expect("Failed to open test database");
        let state = Arc::new(AppState::new(config, db));

        Self {
            router: create_router(state.clone()),
            state,
            _db_dir: db_dir,
        }
    }

    /// Send a request and return the status plus the parsed JSON envelope.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[allow(dead_code)]
    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    #[allow(dead_code)]
    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// Register a fresh account and return its bearer token.
    #[allow(dead_code)]
    pub async fn register(&self, username: &str) -> String {
        let (status, body) = self
            .post(
                "/auth/register",
                None,
                json!({ "username": username, "password": "hunter2!" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "registration failed: {body}");
        body["data"]["token"]
            .as_str()
            .expect("token missing from registration response")
            .to_string()
    }
}
