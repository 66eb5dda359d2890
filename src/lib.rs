// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Todolist API: per-account todo management behind token authentication.
//!
//! This crate provides the backend API for registering accounts, issuing
//! session tokens, and managing each account's private list of todos.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Db;
use services::{CredentialService, TokenService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub credentials: CredentialService,
    pub tokens: TokenService,
}
