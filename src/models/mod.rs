// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models shared between storage and the API.

pub mod account;
pub mod todo;

pub use account::{Account, AccountSummary};
pub use todo::{Priority, Todo};
