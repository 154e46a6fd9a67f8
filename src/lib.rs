// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! Quantevo Ledger - Account Balance & Transfer Service
//!
//! This crate provides a small ledger backend: per-account balances, atomic
//! peer-to-peer transfers with an immutable transaction log, JWT-based
//! authentication, and a pre-transfer verification pipeline against external
//! FX and fraud services.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Authentication (password hashing, signed tokens, extractor)
//! - `ledger` - Account store, transfer engine, and transaction log (redb)
//! - `providers` - External FX-rate and fraud-screen clients

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod ledger;
pub mod providers;
pub mod state;
