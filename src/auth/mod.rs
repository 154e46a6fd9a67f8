// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! # Authentication Module
//!
//! Credential handling and bearer-token authentication for the ledger API.
//!
//! ## Auth Flow
//!
//! 1. `POST /users` stores a one-way salted password hash (never the raw
//!    password)
//! 2. `POST /login` verifies the credential and issues a signed HS256 token
//!    with the account id as subject and a fixed 30-minute expiry
//! 3. Protected handlers use the `Auth` extractor, which verifies the
//!    `Authorization: Bearer <token>` header and re-loads the acting account
//!    from the ledger (statelessly: no server-side session)
//!
//! ## Security
//!
//! - No refresh mechanism; clients re-login after expiry
//! - Clock skew tolerance is 60 seconds
//! - Login failures for unknown email and wrong password are
//!   indistinguishable to the caller

pub mod error;
pub mod extractor;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use extractor::Auth;
pub use password::{hash_password, verify_password};
pub use token::TokenSigner;
