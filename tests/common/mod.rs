// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use todolist_api::config::Config;
use todolist_api::db::Db;
use todolist_api::routes::create_router;
use todolist_api::services::{CredentialService, TokenService};
use todolist_api::AppState;
use tower::ServiceExt;

/// Create a test app backed by an in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    let config = Config::test_default();

    let db = Db::connect(&config.database_url)
        .await
        .expect("Failed to open in-memory database");

    let credentials = CredentialService::new(db.clone());
    let tokens = TokenService::new(&config.jwt_signing_key, config.token_ttl_hours);

    let state = Arc::new(AppState {
        config,
        db,
        credentials,
        tokens,
    });

    (create_router(state.clone()), state)
}

/// Build a JSON request, optionally with a bearer token.
#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body was not valid JSON")
}

/// Register an account and return its session token.
#[allow(dead_code)]
pub async fn register(app: &Router, email: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/accounts",
            None,
            Some(json!({"email": email, "password": password})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    let body = body_json(response).await;
    body["token"].as_str().expect("token in response").to_string()
}

/// Create a todo for the given token and return its JSON representation.
#[allow(dead_code)]
pub async fn create_todo(app: &Router, token: &str, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/todos", Some(token), Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
