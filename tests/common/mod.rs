// Shared helpers for the integration suites. Requests are driven straight
// into the router with tower's oneshot, so no listener is spawned.

#![allow(dead_code)]

use std::sync::Once;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use taskboard_api::app;

static ENV: Once = Once::new();

/// Test environment: the auth middleware is bypassed, like the original server.
pub fn test_env() {
    ENV.call_once(|| std::env::set_var("APP_ENV", "test"));
}

/// Router backed by a lazy pool that never connects. Only good for requests
/// that are rejected before any query runs.
pub fn offline_app() -> axum::Router {
    test_env();
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://postgres@localhost:5432/taskboard")
        .expect("lazy pool");
    app(pool)
}

/// Pool for datastore-backed tests, with migrations applied. Yields `None`
/// when DATABASE_URL is unset or unreachable so the suite can still run
/// without a live Postgres.
pub async fn database_pool() -> Option<PgPool> {
    test_env();
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .ok()?;
    sqlx::migrate!("./migrations").run(&pool).await.ok()?;
    Some(pool)
}

pub async fn send(app: &axum::Router, request: Request<Body>) -> Result<axum::response::Response> {
    Ok(app.clone().oneshot(request).await?)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(response: axum::response::Response) -> Result<String> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

pub async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
