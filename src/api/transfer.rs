// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! P2P transfer endpoint.
//!
//! The debited account is always the acting (token) account; the request
//! cannot name a different sender. All ledger checks and mutations happen
//! inside one write transaction in `LedgerDb::transfer`.

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    auth::Auth,
    error::ApiError,
    ledger::{PartySnapshot, Transaction, TransferSpec},
    state::AppState,
};

const DEFAULT_PAYMENT_METHOD: &str = "wallet";

#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequest {
    pub receiver_id: u64,
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// Client-supplied idempotency id; allocated by the ledger when omitted.
    pub transaction_id: Option<u64>,
    /// Defaults to the sender's currency.
    pub currency: Option<String>,
    pub payment_method: Option<String>,
}

/// Committed-transfer receipt: the ledger entry plus both parties'
/// before/after balances.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransferReceipt {
    pub transaction: Transaction,
    pub sender: PartySnapshot,
    pub receiver: PartySnapshot,
}

#[utoipa::path(
    post,
    path = "/transfer",
    request_body = TransferRequest,
    tag = "Transfers",
    security(("bearer_token" = [])),
    responses(
        (status = 200, body = TransferReceipt),
        (status = 400, description = "Invalid amount, self-transfer, or insufficient balance"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Recipient not found"),
        (status = 409, description = "Transaction id already used")
    )
)]
pub async fn transfer(
    State(state): State<AppState>,
    Auth(sender): Auth,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferReceipt>, ApiError> {
    let currency = request
        .currency
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| sender.currency.clone());

    let outcome = state.ledger.transfer(TransferSpec {
        sender_id: sender.account_id,
        receiver_id: request.receiver_id,
        amount: request.amount,
        currency,
        transaction_id: request.transaction_id,
        payment_method: request
            .payment_method
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
    })?;

    tracing::info!(
        transaction_id = outcome.transaction.transaction_id,
        sender_id = sender.account_id,
        receiver_id = request.receiver_id,
        "transfer committed"
    );

    Ok(Json(TransferReceipt {
        transaction: outcome.transaction,
        sender: outcome.sender,
        receiver: outcome.receiver,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Account, NewAccount, TxStatus};
    use crate::state::testing::test_state;
    use axum::http::StatusCode;

    fn seed(state: &AppState, email: &str, phone: &str, name: &str, balance: &str) -> Account {
        state
            .ledger
            .create_account(NewAccount {
                email: email.into(),
                phone: phone.into(),
                full_name: name.into(),
                currency: "USD".into(),
                password_hash: "$argon2id$stub".into(),
                initial_deposit: balance.parse().unwrap(),
            })
            .unwrap()
    }

    #[tokio::test]
    async fn transfer_returns_receipt_with_both_parties() {
        let (state, _dir) = test_state();
        let alice = seed(&state, "alice@example.com", "+15550100", "Alice", "1000");
        let bob = seed(&state, "bob@example.com", "+15550101", "Bob", "200");

        let Json(receipt) = transfer(
            State(state.clone()),
            Auth(alice.clone()),
            Json(TransferRequest {
                receiver_id: bob.account_id,
                amount: "300".parse().unwrap(),
                transaction_id: None,
                currency: None,
                payment_method: None,
            }),
        )
        .await
        .expect("transfer succeeds");

        assert_eq!(receipt.transaction.status, TxStatus::Completed);
        assert_eq!(receipt.transaction.currency, "USD");
        assert_eq!(receipt.sender.remaining_balance, "700".parse().unwrap());
        assert_eq!(receipt.receiver.remaining_balance, "500".parse().unwrap());
        assert_eq!(receipt.transaction.payment_method, "wallet");
    }

    #[tokio::test]
    async fn overdraw_is_rejected_with_bad_request() {
        let (state, _dir) = test_state();
        let alice = seed(&state, "alice@example.com", "+15550100", "Alice", "100");
        let bob = seed(&state, "bob@example.com", "+15550101", "Bob", "0.01");

        let err = transfer(
            State(state.clone()),
            Auth(alice),
            Json(TransferRequest {
                receiver_id: bob.account_id,
                amount: "500".parse().unwrap(),
                transaction_id: None,
                currency: None,
                payment_method: None,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_recipient_is_not_found() {
        let (state, _dir) = test_state();
        let alice = seed(&state, "alice@example.com", "+15550100", "Alice", "100");

        let err = transfer(
            State(state.clone()),
            Auth(alice),
            Json(TransferRequest {
                receiver_id: 9999,
                amount: "10".parse().unwrap(),
                transaction_id: None,
                currency: None,
                payment_method: None,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn reused_transaction_id_conflicts() {
        let (state, _dir) = test_state();
        let alice = seed(&state, "alice@example.com", "+15550100", "Alice", "1000");
        let bob = seed(&state, "bob@example.com", "+15550101", "Bob", "0.01");

        let request = || TransferRequest {
            receiver_id: bob.account_id,
            amount: "10".parse().unwrap(),
            transaction_id: Some(42),
            currency: None,
            payment_method: None,
        };

        transfer(State(state.clone()), Auth(alice.clone()), Json(request()))
            .await
            .unwrap();

        let err = transfer(State(state.clone()), Auth(alice), Json(request()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }
}
