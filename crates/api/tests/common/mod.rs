#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tally_api::auth::token::SharedSecret;
use tally_api::config::{CorsOrigins, LogFormat, ServerConfig};
use tally_api::router::build_app_router;
use tally_api::services::{ProjectService, ReportService};
use tally_api::state::AppState;
use tally_db::{DbPool, Params, Row, SqlStore, Store, StoreError};

/// Bearer secret configured for every test app.
pub const TOKEN: &str = "test-token";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        auth_token: SharedSecret::new(TOKEN),
        cors_origins: CorsOrigins::List(vec![HeaderValue::from_static("http://localhost:5173")]),
        request_timeout_secs: 30,
        log_format: LogFormat::Text,
    }
}

/// Fresh in-memory database with migrations applied.
pub async fn test_pool() -> DbPool {
    let pool = tally_db::create_pool("sqlite::memory:").await.unwrap();
    tally_db::run_migrations(&pool).await.unwrap();
    pool
}

/// Build the full application router over a fresh database.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack. The returned router is cheap to clone and
/// every clone shares the same database.
pub async fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState::new(test_pool().await, config.clone());
    build_app_router(state, &config)
}

/// Project and report services over a fresh database.
pub async fn services() -> (ProjectService, ReportService) {
    let store: Arc<dyn Store> = Arc::new(SqlStore::new(test_pool().await));
    wire(store)
}

pub fn wire(store: Arc<dyn Store>) -> (ProjectService, ReportService) {
    let projects = ProjectService::new(Arc::clone(&store));
    let reports = ReportService::new(store, projects.clone());
    (projects, reports)
}

// ---------------------------------------------------------------------------
// Store wrapper that counts mutations
// ---------------------------------------------------------------------------

/// Delegates to a real [`SqlStore`] and counts `execute` calls.
pub struct CountingStore {
    inner: SqlStore,
    executes: AtomicUsize,
}

impl CountingStore {
    pub async fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: SqlStore::new(test_pool().await),
            executes: AtomicUsize::new(0),
        })
    }

    pub fn executes(&self) -> usize {
        self.executes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Store for CountingStore {
    async fn query(&self, statement: &str, params: &Params) -> Result<Vec<Row>, StoreError> {
        self.inner.query(statement, params).await
    }

    async fn execute(&self, statement: &str, params: &Params) -> Result<(), StoreError> {
        self.executes.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(statement, params).await
    }
}

// ---------------------------------------------------------------------------
// Store wrapper that races a project deletion
// ---------------------------------------------------------------------------

/// Delegates to a real [`SqlStore`]. Once armed, the next project lookup
/// succeeds and then the looked-up project is deleted, so the caller's
/// following write hits the foreign key.
pub struct VanishingProjectStore {
    inner: SqlStore,
    armed: AtomicBool,
}

impl VanishingProjectStore {
    pub async fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: SqlStore::new(test_pool().await),
            armed: AtomicBool::new(false),
        })
    }

    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Store for VanishingProjectStore {
    async fn query(&self, statement: &str, params: &Params) -> Result<Vec<Row>, StoreError> {
        let rows = self.inner.query(statement, params).await?;

        if statement.contains("FROM projects") && self.armed.swap(false, Ordering::SeqCst) {
            if let Some(id) = params.get("id") {
                self.inner
                    .execute(
                        "DELETE FROM projects WHERE id = :id",
                        &Params::new().bind("id", id),
                    )
                    .await?;
            }
        }
        Ok(rows)
    }

    async fn execute(&self, statement: &str, params: &Params) -> Result<(), StoreError> {
        self.inner.execute(statement, params).await
    }
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn authed(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {TOKEN}"))
}

/// Unauthenticated GET.
pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// GET with the test bearer token.
pub async fn get_authed(app: &Router, uri: &str) -> Response {
    send(app, authed(Method::GET, uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    let request = authed(Method::POST, uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    let request = authed(Method::PUT, uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    send(app, authed(Method::DELETE, uri).body(Body::empty()).unwrap()).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a project over HTTP and return its id.
pub async fn create_project(app: &Router, name: &str) -> String {
    let response = post_json(
        app,
        "/api/projects",
        serde_json::json!({"name": name, "description": format!("{name} description")}),
    )
    .await;
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create a report over HTTP and return its id.
pub async fn create_report(app: &Router, project_id: &str, text: &str) -> String {
    let response = post_json(
        app,
        "/api/reports",
        serde_json::json!({"text": text, "projectId": project_id}),
    )
    .await;
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}
