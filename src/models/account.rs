// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account model for storage and API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Registered account row.
///
/// The password hash never leaves the credential path; API responses use
/// [`AccountSummary`] instead.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    /// Normalized (trimmed, lowercased) email, unique across accounts
    pub email: String,
    /// Argon2id PHC hash of the account password
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// Account shape exposed through the API (no secret material).
#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
