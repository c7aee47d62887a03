//! Shared fixtures for HTTP integration tests
#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use ::common::prelude::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use slides_daemon::http_server;
use slides_daemon::sessions::SessionStore;
use slides_daemon::uploads::Uploads;
use slides_daemon::ServiceState;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "admin-password";
pub const MEMBER_PASSWORD: &str = "member-password";

pub struct TestApp {
    pub router: Router,
    pub state: ServiceState,
    _uploads_dir: TempDir,
}

/// The full router over an in-memory catalog with admin `root` and
/// member `alice`.
pub async fn setup_app() -> TestApp {
    let catalog = Catalog::in_memory().with_hash_cost(HashCost::Low);
    assert!(catalog.bootstrap_admin("root", ADMIN_PASSWORD).unwrap());
    let admin = catalog.authenticate("root", ADMIN_PASSWORD).unwrap();
    catalog
        .add_user(&admin, "alice", MEMBER_PASSWORD, Role::Member)
        .unwrap();

    let uploads_dir = TempDir::new().unwrap();
    let uploads = Uploads::open(uploads_dir.path()).await.unwrap();
    let sessions = SessionStore::new(Duration::from_secs(3600));
    let state = ServiceState::new(catalog, sessions, uploads);

    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let config = http_server::Config::new(addr, 10 * 1024 * 1024);
    TestApp {
        router: http_server::router(config, state.clone()),
        state,
        _uploads_dir: uploads_dir,
    }
}

impl TestApp {
    /// POST a JSON body, returning the status and the decoded JSON reply.
    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = request.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    pub async fn get(&self, path: &str, accept: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(path)
            .header(header::ACCEPT, accept)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// Log in through the API and return the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/v0/auth/login",
                None,
                serde_json::json!({"username": username, "password": password}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }
}
