// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Domain services.

pub mod credentials;
pub mod token;

pub use credentials::CredentialService;
pub use token::TokenService;
