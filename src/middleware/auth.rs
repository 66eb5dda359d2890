// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token authentication middleware.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

/// Authenticated account extracted from the session token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub account_id: Uuid,
}

/// Middleware that requires a valid bearer token.
///
/// Every failure mode (missing header, malformed header, bad signature,
/// expired token, account no longer present) produces the same 401 so the
/// response does not reveal which check failed.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(h) if h.starts_with("Bearer ") => &h[7..],
        _ => return Err(AppError::Unauthorized),
    };

    let account_id = state
        .tokens
        .verify(token)
        .map_err(|_| AppError::Unauthorized)?;

    // A signed token for a deleted account must not grant access.
    if state.db.account_by_id(account_id).await?.is_none() {
        return Err(AppError::Unauthorized);
    }

    request.extensions_mut().insert(AuthUser { account_id });

    Ok(next.run(request).await)
}
