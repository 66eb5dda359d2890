// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and login routes.

use crate::error::{AppError, Result};
use crate::models::AccountSummary;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", post(register))
        .route("/sessions", post(login))
}

/// Credentials payload for both registration and login.
///
/// Fields are optional so a missing field produces our 400 validation
/// response instead of a body-rejection error.
#[derive(Deserialize)]
struct CredentialsRequest {
    email: Option<String>,
    password: Option<String>,
}

impl CredentialsRequest {
    fn into_parts(self) -> Result<(String, String)> {
        let email = self
            .email
            .ok_or_else(|| AppError::validation("email", "is required"))?;
        let password = self
            .password
            .ok_or_else(|| AppError::validation("password", "is required"))?;
        Ok((email, password))
    }
}

#[derive(Serialize)]
struct RegisterResponse {
    account: AccountSummary,
    token: String,
    expires_in: i64,
}

#[derive(Serialize)]
struct SessionResponse {
    token: String,
    expires_in: i64,
}

/// Register a new account and issue its first session token.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let (email, password) = body.into_parts()?;

    let account = state.credentials.register(&email, &password).await?;
    let token = state.tokens.issue(account.id)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            account: account.summary(),
            token,
            expires_in: state.tokens.ttl_secs(),
        }),
    ))
}

/// Exchange credentials for a session token.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>> {
    let (email, password) = body.into_parts()?;

    let account = state.credentials.verify(&email, &password).await?;
    let token = state.tokens.issue(account.id)?;

    tracing::info!(account_id = %account.id, "Session opened");

    Ok(Json(SessionResponse {
        token,
        expires_in: state.tokens.ttl_secs(),
    }))
}
