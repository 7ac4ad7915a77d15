#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use notebox_api::config::ServerConfig;
use notebox_api::router::build_app_router;
use notebox_api::state::AppState;
use notebox_db::{DbPool, NoteStore, SqliteNoteStore};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
    }
}

/// Fresh in-memory SQLite pool with migrations applied.
pub async fn test_pool() -> DbPool {
    let pool = notebox_db::create_memory_pool().await.unwrap();
    notebox_db::run_migrations(&pool).await.unwrap();
    pool
}

/// Build the full application router over the given store, with the same
/// middleware stack production uses.
pub fn build_app_with_store(store: Arc<dyn NoteStore>) -> Router {
    build_app_router(AppState { store }, &test_config())
}

/// Build the application router backed by SQLite on `pool`.
pub fn build_test_app(pool: DbPool) -> Router {
    build_app_with_store(Arc::new(SqliteNoteStore::new(pool)))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("PUT", uri, body)).await
}

/// Send a raw body with a JSON content type (for malformed-payload tests).
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}
