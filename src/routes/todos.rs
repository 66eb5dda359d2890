// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Todo CRUD routes for authenticated accounts.
//!
//! Every handler receives the authenticated account from the access guard
//! and passes it to owner-scoped store operations, so a todo belonging to
//! another account is reported as 404 rather than 403.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{todo, Priority, Todo};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

fn default_page() -> u32 {
    1
}
fn default_limit() -> u32 {
    10
}

const MAX_LIMIT: u32 = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos", post(create_todo))
        .route("/todos/{id}", get(get_todo))
        .route("/todos/{id}", put(update_todo))
        .route("/todos/{id}", delete(delete_todo))
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct ListQuery {
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    page: u32,
    /// Pagination: items per page, clamped to [`MAX_LIMIT`]
    #[serde(default = "default_limit")]
    limit: u32,
    /// Case-insensitive substring match against title or description
    search: Option<String>,
}

#[derive(Serialize)]
struct PaginationInfo {
    current_page: u32,
    total_pages: u32,
    total_todos: i64,
    has_next_page: bool,
    has_prev_page: bool,
}

#[derive(Serialize)]
struct ListResponse {
    items: Vec<Todo>,
    pagination: PaginationInfo,
}

/// Number of pages needed for `total` records at `limit` per page.
fn page_count(total: i64, limit: u32) -> u32 {
    if total <= 0 {
        return 0;
    }
    ((total as u64).div_ceil(limit as u64)) as u32
}

/// List the account's todos, newest first.
async fn list_todos(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>> {
    if query.page == 0 {
        return Err(AppError::BadRequest("page must be at least 1".to_string()));
    }
    let limit = query.limit.clamp(1, MAX_LIMIT);
    let offset = (query.page - 1).saturating_mul(limit);

    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let items = state
        .db
        .list_todos(user.account_id, search, limit, offset)
        .await?;
    let total = state.db.count_todos(user.account_id, search).await?;

    let total_pages = page_count(total, limit);
    let pagination = PaginationInfo {
        current_page: query.page,
        total_pages,
        total_todos: total,
        has_next_page: query.page < total_pages,
        has_prev_page: query.page > 1,
    };

    Ok(Json(ListResponse { items, pagination }))
}

// ─── Create ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct CreateTodoRequest {
    /// Required; optional here so a missing field yields a 400 with
    /// field detail rather than a body-rejection error.
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    due_date: Option<NaiveDate>,
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>)> {
    let title = body
        .title
        .ok_or_else(|| AppError::validation("title", "is required"))
        .and_then(|t| todo::validate_title(&t))?;

    let new_todo = Todo {
        id: Uuid::new_v4(),
        owner_id: user.account_id,
        title,
        description: todo::validate_description(body.description)?,
        priority: Priority::parse_lenient(body.priority.as_deref()),
        due_date: body.due_date,
        completed: false,
        created_at: Utc::now(),
    };
    state.db.insert_todo(&new_todo).await?;

    tracing::debug!(account_id = %user.account_id, todo_id = %new_todo.id, "Todo created");

    Ok((StatusCode::CREATED, Json(new_todo)))
}

// ─── Single-record Operations ────────────────────────────────

async fn get_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>> {
    let found = state
        .db
        .todo_for_owner(user.account_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("todo not found".to_string()))?;
    Ok(Json(found))
}

/// Partial update: only fields present in the body change.
///
/// A JSON `null` is treated the same as an absent field, so there is no
/// way to clear a description or due date through this endpoint.
#[derive(Deserialize)]
struct UpdateTodoRequest {
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    due_date: Option<NaiveDate>,
    completed: Option<bool>,
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>> {
    let mut record = state
        .db
        .todo_for_owner(user.account_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("todo not found".to_string()))?;

    if let Some(title) = body.title {
        record.title = todo::validate_title(&title)?;
    }
    if body.description.is_some() {
        record.description = todo::validate_description(body.description)?;
    }
    if let Some(priority) = body.priority.as_deref() {
        record.priority = Priority::parse_lenient(Some(priority));
    }
    if let Some(due_date) = body.due_date {
        record.due_date = Some(due_date);
    }
    if let Some(completed) = body.completed {
        record.completed = completed;
    }

    state.db.update_todo(&record).await?;

    Ok(Json(record))
}

#[derive(Serialize)]
struct DeleteResponse {
    success: bool,
    message: String,
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state.db.delete_todo(user.account_id, id).await?;
    if !deleted {
        return Err(AppError::NotFound("todo not found".to_string()));
    }

    Ok(Json(DeleteResponse {
        success: true,
        message: "Todo deleted".to_string(),
    }))
}
