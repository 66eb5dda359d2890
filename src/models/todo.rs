// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Todo model and field validation rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 100;
/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Todo priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    /// Parse a client-supplied priority string.
    ///
    /// Unknown or missing values fall back to `medium` rather than failing.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("low") => Priority::Low,
            Some("high") => Priority::High,
            _ => Priority::Medium,
        }
    }
}

/// Stored todo record, scoped to exactly one owning account.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Validate and normalize a title: required, non-empty after trimming,
/// bounded length.
pub fn validate_title(raw: &str) -> Result<String, AppError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::validation("title", "must not be empty"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::validation(
            "title",
            format!("must be at most {} characters", MAX_TITLE_LEN),
        ));
    }
    Ok(title.to_string())
}

/// Validate an optional description against the length bound.
pub fn validate_description(raw: Option<String>) -> Result<Option<String>, AppError> {
    match raw {
        Some(text) if text.chars().count() > MAX_DESCRIPTION_LEN => Err(AppError::validation(
            "description",
            format!("must be at most {} characters", MAX_DESCRIPTION_LEN),
        )),
        other => Ok(other),
    }
}
