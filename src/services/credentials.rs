// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration and credential verification.
//!
//! Passwords are hashed with Argon2id; the salt is generated per hash and
//! embedded in the PHC string. Lookup failures and hash mismatches produce
//! the same error so login responses never reveal whether an email is
//! registered.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use uuid::Uuid;

use crate::db::Db;
use crate::error::AppError;
use crate::models::Account;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Registers accounts and verifies login credentials.
#[derive(Clone)]
pub struct CredentialService {
    db: Db,
}

impl CredentialService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Register a new account.
    ///
    /// Validates and normalizes the email, enforces the password policy,
    /// and rejects duplicate emails before hashing. The plaintext password
    /// is consumed here and never stored.
    pub async fn register(&self, email: &str, password: &str) -> Result<Account, AppError> {
        let email = normalize_email(email);
        validate_email(&email)?;
        validate_password(password)?;

        if self.db.account_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("email is already registered".to_string()));
        }

        let account = Account {
            id: Uuid::new_v4(),
            email,
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };
        self.db.create_account(&account).await?;

        tracing::info!(account_id = %account.id, "Account registered");
        Ok(account)
    }

    /// Verify login credentials, returning the account on success.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn verify(&self, email: &str, password: &str) -> Result<Account, AppError> {
        let email = normalize_email(email);

        let account = self
            .db
            .account_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        verify_password(password, &account.password_hash)?;
        Ok(account)
    }
}

/// Normalize an email for storage and lookup: trim and lowercase.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Basic email shape check: one `@` with a non-empty local part and a
/// domain containing a dot.
fn validate_email(email: &str) -> Result<(), AppError> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.ends_with('.') {
        return Err(AppError::validation("email", "must be a valid email address"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

/// Hash a password with Argon2id and a fresh random salt.
fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
fn verify_password(password: &str, stored_hash: &str) -> Result<(), AppError> {
    // A hash we cannot parse is server-side corruption, not a bad login.
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Stored password hash invalid: {}", e)))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AppError::InvalidCredentials)
}
