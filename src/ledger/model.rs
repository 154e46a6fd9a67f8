// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! Core ledger types: accounts, transactions, and transfer receipts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user account holding a balance.
///
/// Owned by the account store; balances are mutated only through the
/// transfer engine or the account-creation flow. Accounts are never deleted
/// in normal operation. The `password_hash` field must never reach an API
/// response — handlers map accounts into dedicated response types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Opaque account identifier, allocated from a store counter.
    pub account_id: u64,
    /// Email address (globally unique).
    pub email: String,
    /// Phone number (globally unique).
    pub phone: String,
    /// Display name.
    pub full_name: String,
    /// Current balance. Never materially negative outside a rolled-back
    /// operation.
    pub balance: Decimal,
    /// ISO-ish currency code (e.g. "USD").
    pub currency: String,
    /// One-way salted password hash (PHC string).
    pub password_hash: String,
    /// Card number assigned at registration (unique).
    pub card_number: Option<u64>,
    /// First database entry; immutable.
    pub created_at: DateTime<Utc>,
    /// Bumped on every balance change.
    pub updated_at: DateTime<Utc>,
}

/// Transaction status lifecycle: pending → completed | failed | blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Completed,
    Failed,
    Blocked,
}

/// Kind of ledger movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Transfer,
    Deposit,
    Withdrawal,
}

/// An immutable ledger entry describing one transfer.
///
/// Invariant for the sender leg: `remaining_balance == initial_balance - amount`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    /// Unique transaction identifier (caller-supplied or allocated).
    pub transaction_id: u64,
    /// Debited account.
    pub sender_id: u64,
    /// Credited account.
    pub receiver_id: u64,
    /// Transferred amount (> 0).
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// Currency code of the transfer.
    pub currency: String,
    /// Movement kind.
    pub transaction_type: TxType,
    /// Final status of the attempt.
    pub status: TxStatus,
    /// Sender balance before the transfer.
    #[schema(value_type = String)]
    pub initial_balance: Decimal,
    /// Sender balance after the transfer.
    #[schema(value_type = String)]
    pub remaining_balance: Decimal,
    /// Payment method used (e.g. "wallet").
    pub payment_method: String,
    /// Commit time.
    pub timestamp: DateTime<Utc>,
}

/// Before/after balance snapshot for one party of a transfer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PartySnapshot {
    /// Account identifier.
    pub account_id: u64,
    /// Display name.
    pub name: String,
    /// Balance before the transfer committed.
    #[schema(value_type = String)]
    pub initial_balance: Decimal,
    /// Balance after the transfer committed.
    #[schema(value_type = String)]
    pub remaining_balance: Decimal,
}

/// Receipt describing a committed transfer: the ledger entry plus both
/// parties' before/after balances.
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub transaction: Transaction,
    pub sender: PartySnapshot,
    pub receiver: PartySnapshot,
}
