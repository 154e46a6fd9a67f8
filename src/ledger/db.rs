// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! Embedded ledger database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `accounts`: account_id → serialized Account
//! - `account_email_index`: email → account_id
//! - `account_phone_index`: phone → account_id
//! - `card_index`: card_number → account_id
//! - `transactions`: transaction_id → serialized Transaction
//! - `tx_time_index`: composite key (!timestamp|!tx_id) → transaction_id
//! - `account_tx_index`: composite key (account_id|!timestamp|!tx_id) → direction
//! - `meta`: counter name → next value
//!
//! ## Atomicity
//!
//! A transfer touches two account rows, one transaction row, and three index
//! rows. All of them are written inside one redb write transaction: the
//! debited-but-uncredited intermediate state is never observable, and an
//! abort (drop without commit) leaves no trace. redb admits a single write
//! transaction at a time, which serializes concurrent transfers touching the
//! same account.

use std::path::Path;

use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable, Table, TableDefinition};
use rust_decimal::Decimal;

use super::model::{Account, PartySnapshot, Transaction, TransferOutcome, TxStatus, TxType};

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: account_id → serialized Account (JSON bytes).
const ACCOUNTS: TableDefinition<u64, &[u8]> = TableDefinition::new("accounts");

/// Index: email → account_id. Enforces email uniqueness.
const EMAIL_INDEX: TableDefinition<&str, u64> = TableDefinition::new("account_email_index");

/// Index: phone → account_id. Enforces phone uniqueness.
const PHONE_INDEX: TableDefinition<&str, u64> = TableDefinition::new("account_phone_index");

/// Index: card_number → account_id.
const CARD_INDEX: TableDefinition<u64, u64> = TableDefinition::new("card_index");

/// Primary table: transaction_id → serialized Transaction (JSON bytes).
/// Append-only; no update or delete path exists.
const TRANSACTIONS: TableDefinition<u64, &[u8]> = TableDefinition::new("transactions");

/// Index: `!timestamp_millis_be | !tx_id_be` → transaction_id.
/// The inverted timestamp yields newest-first ordering on a forward scan;
/// the inverted id breaks same-millisecond ties newest-first too.
const TX_TIME_INDEX: TableDefinition<&[u8], u64> = TableDefinition::new("tx_time_index");

/// Index: `account_id_be | !timestamp_millis_be | !tx_id_be` → "sent"|"received".
const ACCOUNT_TX_INDEX: TableDefinition<&[u8], &str> = TableDefinition::new("account_tx_index");

/// Counters: `next_account_id`, `next_transaction_id`, `next_card_number`.
const META: TableDefinition<&str, u64> = TableDefinition::new("meta");

/// Card numbers are allocated as `CARD_BASE + n`.
const CARD_BASE: u64 = 4_000_000_000_000_000;

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("account {0} not found")]
    AccountNotFound(u64),

    #[error("recipient {0} not found")]
    ReceiverNotFound(u64),

    #[error("transaction {0} not found")]
    TransactionNotFound(u64),

    #[error("insufficient balance")]
    InsufficientFunds,

    #[error("amount must be greater than 0")]
    InvalidAmount,

    #[error("sender and receiver must be different accounts")]
    SelfTransfer,

    #[error("transaction {0} already exists")]
    DuplicateTransaction(u64),

    #[error("{0} is already in use")]
    Conflict(String),

    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Index Key Helpers
// =============================================================================

/// Build a key for the tx_time_index table: `!timestamp_be | !tx_id_be`.
fn make_time_key(timestamp_millis: i64, tx_id: u64) -> [u8; 16] {
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&(!(timestamp_millis as u64)).to_be_bytes());
    key[8..].copy_from_slice(&(!tx_id).to_be_bytes());
    key
}

/// Build a key for the account_tx_index table:
/// `account_id_be | !timestamp_be | !tx_id_be`.
fn make_account_key(account_id: u64, timestamp_millis: i64, tx_id: u64) -> [u8; 24] {
    let mut key = [0u8; 24];
    key[..8].copy_from_slice(&account_id.to_be_bytes());
    key[8..24].copy_from_slice(&make_time_key(timestamp_millis, tx_id));
    key
}

/// Extract the tx_id portion from a 24-byte account index key.
fn tx_id_from_account_key(key: &[u8]) -> Option<u64> {
    key.get(16..24)
        .and_then(|bytes| bytes.try_into().ok())
        .map(|bytes| !u64::from_be_bytes(bytes))
}

/// Read and advance a meta counter, returning the value to use.
fn bump_counter(
    meta: &mut Table<&str, u64>,
    key: &str,
    first: u64,
) -> Result<u64, redb::StorageError> {
    let current = meta.get(key)?.map(|v| v.value()).unwrap_or(first);
    meta.insert(key, current + 1)?;
    Ok(current)
}

// =============================================================================
// Request Types
// =============================================================================

/// Inputs for account creation. The password is already hashed by the caller.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub phone: String,
    pub full_name: String,
    pub currency: String,
    pub password_hash: String,
    pub initial_deposit: Decimal,
}

/// Inputs for a transfer. `transaction_id` is allocated when omitted.
#[derive(Debug, Clone)]
pub struct TransferSpec {
    pub sender_id: u64,
    pub receiver_id: u64,
    pub amount: Decimal,
    pub currency: String,
    pub transaction_id: Option<u64>,
    pub payment_method: String,
}

// =============================================================================
// LedgerDb
// =============================================================================

/// Embedded ACID ledger: account store, transfer engine, transaction log.
pub struct LedgerDb {
    db: Database,
}

impl LedgerDb {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> LedgerResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ACCOUNTS)?;
            let _ = write_txn.open_table(EMAIL_INDEX)?;
            let _ = write_txn.open_table(PHONE_INDEX)?;
            let _ = write_txn.open_table(CARD_INDEX)?;
            let _ = write_txn.open_table(TRANSACTIONS)?;
            let _ = write_txn.open_table(TX_TIME_INDEX)?;
            let _ = write_txn.open_table(ACCOUNT_TX_INDEX)?;
            let _ = write_txn.open_table(META)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    // =========================================================================
    // Account Store
    // =========================================================================

    /// Create an account, enforcing email and phone uniqueness.
    ///
    /// Allocates the account id and a card number from the meta counters.
    /// The uniqueness checks and all writes happen in one write transaction.
    pub fn create_account(&self, new: NewAccount) -> LedgerResult<Account> {
        if new.initial_deposit <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        let write_txn = self.db.begin_write()?;
        let account = {
            let mut accounts = write_txn.open_table(ACCOUNTS)?;
            let mut email_idx = write_txn.open_table(EMAIL_INDEX)?;
            let mut phone_idx = write_txn.open_table(PHONE_INDEX)?;
            let mut card_idx = write_txn.open_table(CARD_INDEX)?;
            let mut meta = write_txn.open_table(META)?;

            if email_idx.get(new.email.as_str())?.is_some() {
                return Err(LedgerError::Conflict("email".to_string()));
            }
            if phone_idx.get(new.phone.as_str())?.is_some() {
                return Err(LedgerError::Conflict("phone".to_string()));
            }

            let account_id = bump_counter(&mut meta, "next_account_id", 1)?;
            let card_number = CARD_BASE + bump_counter(&mut meta, "next_card_number", 1)?;

            let now = Utc::now();
            let account = Account {
                account_id,
                email: new.email,
                phone: new.phone,
                full_name: new.full_name,
                balance: new.initial_deposit,
                currency: new.currency,
                password_hash: new.password_hash,
                card_number: Some(card_number),
                created_at: now,
                updated_at: now,
            };

            let json = serde_json::to_vec(&account)?;
            accounts.insert(&account_id, json.as_slice())?;
            email_idx.insert(account.email.as_str(), account_id)?;
            phone_idx.insert(account.phone.as_str(), account_id)?;
            card_idx.insert(&card_number, account_id)?;
            account
        };
        write_txn.commit()?;
        Ok(account)
    }

    /// Look up an account by id.
    pub fn get_account(&self, account_id: u64) -> LedgerResult<Account> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ACCOUNTS)?;
        match table.get(&account_id)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Err(LedgerError::AccountNotFound(account_id)),
        }
    }

    /// Look up an account by email (used by login).
    pub fn find_by_email(&self, email: &str) -> LedgerResult<Option<Account>> {
        let read_txn = self.db.begin_read()?;
        let email_idx = read_txn.open_table(EMAIL_INDEX)?;
        let Some(id) = email_idx.get(email)?.map(|v| v.value()) else {
            return Ok(None);
        };
        let accounts = read_txn.open_table(ACCOUNTS)?;
        match accounts.get(&id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Whether an account with this id exists.
    pub fn account_exists(&self, account_id: u64) -> LedgerResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ACCOUNTS)?;
        Ok(table.get(&account_id)?.is_some())
    }

    // =========================================================================
    // Transfer Engine
    // =========================================================================

    /// Move funds between two accounts and append the transaction record.
    ///
    /// Both balance mutations and the log append commit atomically; a failed
    /// attempt writes nothing. Returns a receipt with both parties'
    /// before/after balances.
    pub fn transfer(&self, spec: TransferSpec) -> LedgerResult<TransferOutcome> {
        if spec.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        if spec.sender_id == spec.receiver_id {
            return Err(LedgerError::SelfTransfer);
        }

        let write_txn = self.db.begin_write()?;
        let outcome = {
            let mut accounts = write_txn.open_table(ACCOUNTS)?;
            let mut txs = write_txn.open_table(TRANSACTIONS)?;
            let mut time_idx = write_txn.open_table(TX_TIME_INDEX)?;
            let mut acct_idx = write_txn.open_table(ACCOUNT_TX_INDEX)?;
            let mut meta = write_txn.open_table(META)?;

            let sender_bytes = accounts
                .get(&spec.sender_id)?
                .map(|v| v.value().to_vec())
                .ok_or(LedgerError::AccountNotFound(spec.sender_id))?;
            let mut sender: Account = serde_json::from_slice(&sender_bytes)?;

            if spec.amount > sender.balance {
                return Err(LedgerError::InsufficientFunds);
            }

            let receiver_bytes = accounts
                .get(&spec.receiver_id)?
                .map(|v| v.value().to_vec())
                .ok_or(LedgerError::ReceiverNotFound(spec.receiver_id))?;
            let mut receiver: Account = serde_json::from_slice(&receiver_bytes)?;

            let transaction_id = match spec.transaction_id {
                Some(id) => id,
                None => bump_counter(&mut meta, "next_transaction_id", 1)?,
            };
            if txs.get(&transaction_id)?.is_some() {
                return Err(LedgerError::DuplicateTransaction(transaction_id));
            }

            let initial_sender_balance = sender.balance;
            let initial_receiver_balance = receiver.balance;
            let now = Utc::now();

            sender.balance -= spec.amount;
            receiver.balance += spec.amount;
            sender.updated_at = now;
            receiver.updated_at = now;

            let transaction = Transaction {
                transaction_id,
                sender_id: spec.sender_id,
                receiver_id: spec.receiver_id,
                amount: spec.amount,
                currency: spec.currency,
                transaction_type: TxType::Transfer,
                status: TxStatus::Completed,
                initial_balance: initial_sender_balance,
                remaining_balance: sender.balance,
                payment_method: spec.payment_method,
                timestamp: now,
            };

            let sender_json = serde_json::to_vec(&sender)?;
            let receiver_json = serde_json::to_vec(&receiver)?;
            let tx_json = serde_json::to_vec(&transaction)?;
            accounts.insert(&spec.sender_id, sender_json.as_slice())?;
            accounts.insert(&spec.receiver_id, receiver_json.as_slice())?;
            txs.insert(&transaction_id, tx_json.as_slice())?;

            let ts = now.timestamp_millis();
            time_idx.insert(make_time_key(ts, transaction_id).as_slice(), transaction_id)?;
            acct_idx.insert(
                make_account_key(spec.sender_id, ts, transaction_id).as_slice(),
                "sent",
            )?;
            acct_idx.insert(
                make_account_key(spec.receiver_id, ts, transaction_id).as_slice(),
                "received",
            )?;

            TransferOutcome {
                sender: PartySnapshot {
                    account_id: sender.account_id,
                    name: sender.full_name.clone(),
                    initial_balance: initial_sender_balance,
                    remaining_balance: sender.balance,
                },
                receiver: PartySnapshot {
                    account_id: receiver.account_id,
                    name: receiver.full_name.clone(),
                    initial_balance: initial_receiver_balance,
                    remaining_balance: receiver.balance,
                },
                transaction,
            }
        };
        write_txn.commit()?;
        Ok(outcome)
    }

    // =========================================================================
    // Transaction Log
    // =========================================================================

    /// Look up a single transaction by id.
    pub fn get_transaction(&self, transaction_id: u64) -> LedgerResult<Transaction> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TRANSACTIONS)?;
        match table.get(&transaction_id)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Err(LedgerError::TransactionNotFound(transaction_id)),
        }
    }

    /// Paginated, newest-first listing of transactions.
    ///
    /// With an account filter, matches transactions where the account is
    /// sender or receiver (via the account index). Offset and limit are
    /// applied during the index scan.
    pub fn list_transactions(
        &self,
        account_id: Option<u64>,
        limit: usize,
        offset: usize,
    ) -> LedgerResult<Vec<Transaction>> {
        let read_txn = self.db.begin_read()?;
        let txs = read_txn.open_table(TRANSACTIONS)?;
        let mut results = Vec::with_capacity(limit);

        let mut push = |tx_id: u64, results: &mut Vec<Transaction>| -> LedgerResult<()> {
            if let Some(value) = txs.get(&tx_id)? {
                results.push(serde_json::from_slice(value.value())?);
            }
            Ok(())
        };

        match account_id {
            Some(id) => {
                let acct_idx = read_txn.open_table(ACCOUNT_TX_INDEX)?;
                let start = id.to_be_bytes();
                let end = id.checked_add(1).map(u64::to_be_bytes);
                let mut seen = 0usize;
                // Prefix scan: all 24-byte keys starting with the 8-byte id.
                let range = match end.as_ref() {
                    Some(end) => acct_idx.range(start.as_slice()..end.as_slice())?,
                    None => acct_idx.range(start.as_slice()..)?,
                };
                for entry in range {
                    let entry = entry?;
                    if seen < offset {
                        seen += 1;
                        continue;
                    }
                    if results.len() >= limit {
                        break;
                    }
                    if let Some(tx_id) = tx_id_from_account_key(entry.0.value()) {
                        push(tx_id, &mut results)?;
                    }
                }
            }
            None => {
                let time_idx = read_txn.open_table(TX_TIME_INDEX)?;
                for entry in time_idx.iter()?.skip(offset) {
                    if results.len() >= limit {
                        break;
                    }
                    let entry = entry?;
                    push(entry.1.value(), &mut results)?;
                }
            }
        }

        Ok(results)
    }
}

// =============================================================================
// Tests
// =============================================================================
