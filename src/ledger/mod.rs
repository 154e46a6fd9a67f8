// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! # Ledger Module
//!
//! The durable record of account balances and their transaction history.
//!
//! - `model` - Account and transaction types shared across the crate
//! - `db` - Embedded ACID store (redb): account store, transfer engine,
//!   and append-only transaction log
//!
//! ## Consistency Model
//!
//! Every transfer runs inside a single redb write transaction: both balance
//! mutations, the transaction row, and its index entries commit together or
//! not at all. redb serializes write transactions, so two concurrent
//! transfers from the same account cannot both pass the sufficient-funds
//! check against a stale balance.

pub mod db;
pub mod model;

pub use db::{LedgerDb, LedgerError, LedgerResult, NewAccount, TransferSpec};
pub use model::{Account, PartySnapshot, Transaction, TransferOutcome, TxStatus, TxType};
