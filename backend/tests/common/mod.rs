//! Common test utilities for integration tests
//!
//! Each `TestApp` owns a temporary directory holding its history file, so
//! tests never share state.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bmi_calculator_backend::{
    config::AppConfig, repositories::HistoryStore, routes, state::AppState,
};
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub history_path: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    /// Create a new test application with an empty history file location
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let history_path = dir.path().join("bmi_history.xml");
        Self::with_history_file(dir, history_path)
    }

    /// Create a test application over an existing history file in `dir`
    pub fn with_history_file(dir: TempDir, history_path: PathBuf) -> Self {
        let config = test_config(history_path.clone());
        let store = HistoryStore::open(&history_path, config.history.effective_capacity());
        let state = AppState::new(config, store);
        let app = routes::create_router(state);

        Self {
            app,
            history_path,
            _dir: dir,
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.send("GET", path, Body::empty()).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.send("POST", path, Body::from(body.to_string())).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> (StatusCode, String) {
        self.send("DELETE", path, Body::empty()).await
    }

    /// Submit the calculator form
    pub async fn calculate(
        &self,
        weight: &str,
        height: &str,
        age: &str,
        gender: &str,
    ) -> (StatusCode, String) {
        let body = serde_json::json!({
            "weight": weight,
            "height": height,
            "age": age,
            "gender": gender,
        });
        self.post("/api/v1/bmi", &body.to_string()).await
    }

    async fn send(&self, method: &str, path: &str, body: Body) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(body)
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}

fn test_config(history_path: PathBuf) -> AppConfig {
    AppConfig {
        server: bmi_calculator_backend::config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        history: bmi_calculator_backend::config::HistoryConfig {
            path: history_path,
            capacity: 10,
        },
    }
}
