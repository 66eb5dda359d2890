// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Accounts (credential storage)
//! - Todos (per-owner records with search and pagination)
//!
//! Every todo operation takes the owner's account id and applies
//! `owner_id = ?` in the query, so a record belonging to another account
//! is indistinguishable from a record that does not exist.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Account, Todo};

/// SQLite database client.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Connect to the database and apply pending migrations.
    ///
    /// In-memory databases are pinned to a single connection, since each
    /// SQLite connection would otherwise see its own empty database.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to SQLite: {}", e)))?;

        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to run migrations: {}", e)))?;

        tracing::info!(url = database_url, "Connected to SQLite");

        Ok(Self { pool })
    }

    // ─── Account Operations ──────────────────────────────────────

    /// Persist a new account.
    ///
    /// The UNIQUE constraint on email backstops the pre-insert duplicate
    /// check in the credential service.
    pub async fn create_account(&self, account: &Account) -> Result<(), AppError> {
        let result = sqlx::query(
            "INSERT INTO accounts (id, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::Conflict("email is already registered".to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Look up an account by normalized email.
    pub async fn account_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash, created_at FROM accounts WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    /// Look up an account by id.
    pub async fn account_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash, created_at FROM accounts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    // ─── Todo Operations ─────────────────────────────────────────

    /// Persist a new todo.
    pub async fn insert_todo(&self, todo: &Todo) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO todos (id, owner_id, title, description, priority, due_date, completed, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(todo.id)
        .bind(todo.owner_id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.priority)
        .bind(todo.due_date)
        .bind(todo.completed)
        .bind(todo.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Get a todo by id, scoped to the owner.
    pub async fn todo_for_owner(
        &self,
        owner_id: Uuid,
        todo_id: Uuid,
    ) -> Result<Option<Todo>, AppError> {
        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, owner_id, title, description, priority, due_date, completed, created_at \
             FROM todos WHERE id = ? AND owner_id = ?",
        )
        .bind(todo_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    /// Write back an updated todo, scoped to the owner.
    pub async fn update_todo(&self, todo: &Todo) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE todos SET title = ?, description = ?, priority = ?, due_date = ?, completed = ? \
             WHERE id = ? AND owner_id = ?",
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.priority)
        .bind(todo.due_date)
        .bind(todo.completed)
        .bind(todo.id)
        .bind(todo.owner_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Hard-delete a todo, scoped to the owner.
    ///
    /// Returns `false` if no row matched (absent or owned by someone else).
    pub async fn delete_todo(&self, owner_id: Uuid, todo_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ? AND owner_id = ?")
            .bind(todo_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the owner's todos, newest first, with optional substring search
    /// against title or description.
    pub async fn list_todos(
        &self,
        owner_id: Uuid,
        search: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Todo>, AppError> {
        let todos = match search {
            Some(term) => {
                let pattern = like_pattern(term);
                sqlx::query_as::<_, Todo>(
                    "SELECT id, owner_id, title, description, priority, due_date, completed, created_at \
                     FROM todos WHERE owner_id = ? \
                     AND (LOWER(title) LIKE ? ESCAPE '\\' OR LOWER(COALESCE(description, '')) LIKE ? ESCAPE '\\') \
                     ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
                )
                .bind(owner_id)
                .bind(&pattern)
                .bind(&pattern)
                .bind(limit as i64)
                .bind(offset as i64)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Todo>(
                    "SELECT id, owner_id, title, description, priority, due_date, completed, created_at \
                     FROM todos WHERE owner_id = ? \
                     ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
                )
                .bind(owner_id)
                .bind(limit as i64)
                .bind(offset as i64)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(todos)
    }

    /// Count the owner's todos matching the same filter as [`Self::list_todos`].
    pub async fn count_todos(
        &self,
        owner_id: Uuid,
        search: Option<&str>,
    ) -> Result<i64, AppError> {
        let count = match search {
            Some(term) => {
                let pattern = like_pattern(term);
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM todos WHERE owner_id = ? \
                     AND (LOWER(title) LIKE ? ESCAPE '\\' OR LOWER(COALESCE(description, '')) LIKE ? ESCAPE '\\')",
                )
                .bind(owner_id)
                .bind(&pattern)
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM todos WHERE owner_id = ?")
                    .bind(owner_id)
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }
}

/// Build a case-insensitive LIKE pattern with wildcard characters escaped,
/// so user input is matched literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::Utc;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("milk"), "%milk%");
        assert_eq!(like_pattern("MILK"), "%milk%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }

    fn sample_todo(owner_id: Uuid, title: &str) -> Todo {
        Todo {
            id: Uuid::new_v4(),
            owner_id,
            title: title.to_string(),
            description: None,
            priority: Priority::Medium,
            due_date: None,
            completed: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_todo_round_trip_is_owner_scoped() {
        let db = Db::connect("sqlite::memory:").await.unwrap();

        let owner = Account {
            id: Uuid::new_v4(),
            email: "owner@example.com".to_string(),
            password_hash: "$argon2id$test".to_string(),
            created_at: Utc::now(),
        };
        let stranger = Account {
            id: Uuid::new_v4(),
            email: "stranger@example.com".to_string(),
            password_hash: "$argon2id$test".to_string(),
            created_at: Utc::now(),
        };
        db.create_account(&owner).await.unwrap();
        db.create_account(&stranger).await.unwrap();

        let todo = sample_todo(owner.id, "Buy milk");
        db.insert_todo(&todo).await.unwrap();

        // Owner sees the record
        let found = db.todo_for_owner(owner.id, todo.id).await.unwrap();
        assert_eq!(found.unwrap().title, "Buy milk");

        // Another account does not
        let hidden = db.todo_for_owner(stranger.id, todo.id).await.unwrap();
        assert!(hidden.is_none());

        // Delete scoped to the wrong owner is a no-op
        assert!(!db.delete_todo(stranger.id, todo.id).await.unwrap());
        assert!(db.delete_todo(owner.id, todo.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let db = Db::connect("sqlite::memory:").await.unwrap();

        let account = Account {
            id: Uuid::new_v4(),
            email: "dup@example.com".to_string(),
            password_hash: "$argon2id$test".to_string(),
            created_at: Utc::now(),
        };
        db.create_account(&account).await.unwrap();

        let twin = Account {
            id: Uuid::new_v4(),
            ..account.clone()
        };
        let err = db.create_account(&twin).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
