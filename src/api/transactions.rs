// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! Transaction history listing, newest first.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::ApiError, ledger::Transaction, state::AppState};

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Page size; capped at 100.
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Restrict to transactions where this account is sender or receiver.
    pub user_id: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionEntry {
    #[serde(flatten)]
    pub transaction: Transaction,
    /// "sent" or "received" relative to the filter account; absent without
    /// a `user_id` filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<&'static str>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionsResponse {
    pub limit: usize,
    pub offset: usize,
    pub user_id: Option<u64>,
    pub transactions: Vec<TransactionEntry>,
}

#[utoipa::path(
    get,
    path = "/transactions",
    params(ListQuery),
    tag = "Transfers",
    responses((status = 200, body = TransactionsResponse))
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let transactions = state
        .ledger
        .list_transactions(query.user_id, limit, offset)?
        .into_iter()
        .map(|transaction| {
            let direction = query.user_id.map(|id| {
                if transaction.sender_id == id {
                    "sent"
                } else {
                    "received"
                }
            });
            TransactionEntry {
                transaction,
                direction,
            }
        })
        .collect();

    Ok(Json(TransactionsResponse {
        limit,
        offset,
        user_id: query.user_id,
        transactions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Account, NewAccount, TransferSpec};
    use crate::state::testing::test_state;

    fn seed(state: &AppState, email: &str, phone: &str, balance: &str) -> Account {
        state
            .ledger
            .create_account(NewAccount {
                email: email.into(),
                phone: phone.into(),
                full_name: email.split('@').next().unwrap().into(),
                currency: "USD".into(),
                password_hash: "$argon2id$stub".into(),
                initial_deposit: balance.parse().unwrap(),
            })
            .unwrap()
    }

    fn send(state: &AppState, from: u64, to: u64, amount: &str) {
        state
            .ledger
            .transfer(TransferSpec {
                sender_id: from,
                receiver_id: to,
                amount: amount.parse().unwrap(),
                currency: "USD".into(),
                transaction_id: None,
                payment_method: "wallet".into(),
            })
            .unwrap();
    }

    #[tokio::test]
    async fn listing_defaults_apply_and_newest_comes_first() {
        let (state, _dir) = test_state();
        let alice = seed(&state, "alice@example.com", "+15550100", "1000");
        let bob = seed(&state, "bob@example.com", "+15550101", "1000");
        send(&state, alice.account_id, bob.account_id, "10");
        send(&state, bob.account_id, alice.account_id, "20");

        let Json(response) = list_transactions(
            State(state),
            Query(ListQuery {
                limit: None,
                offset: None,
                user_id: None,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.limit, 10);
        assert_eq!(response.offset, 0);
        assert_eq!(response.transactions.len(), 2);
        assert_eq!(
            response.transactions[0].transaction.amount,
            "20".parse().unwrap()
        );
        assert!(response.transactions[0].direction.is_none());
    }

    #[tokio::test]
    async fn limit_is_capped_at_one_hundred() {
        let (state, _dir) = test_state();

        let Json(response) = list_transactions(
            State(state),
            Query(ListQuery {
                limit: Some(5000),
                offset: None,
                user_id: None,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.limit, 100);
    }

    #[tokio::test]
    async fn account_filter_labels_direction() {
        let (state, _dir) = test_state();
        let alice = seed(&state, "alice@example.com", "+15550100", "1000");
        let bob = seed(&state, "bob@example.com", "+15550101", "1000");
        let carol = seed(&state, "carol@example.com", "+15550102", "1000");
        send(&state, alice.account_id, bob.account_id, "10");
        send(&state, bob.account_id, alice.account_id, "20");
        send(&state, bob.account_id, carol.account_id, "30");

        let Json(response) = list_transactions(
            State(state),
            Query(ListQuery {
                limit: None,
                offset: None,
                user_id: Some(alice.account_id),
            }),
        )
        .await
        .unwrap();

        // Carol's leg with Bob does not involve Alice.
        assert_eq!(response.transactions.len(), 2);
        assert_eq!(response.transactions[0].direction, Some("received"));
        assert_eq!(response.transactions[1].direction, Some("sent"));
    }

    #[tokio::test]
    async fn offset_skips_newest_entries() {
        let (state, _dir) = test_state();
        let alice = seed(&state, "alice@example.com", "+15550100", "1000");
        let bob = seed(&state, "bob@example.com", "+15550101", "1000");
        send(&state, alice.account_id, bob.account_id, "10");
        send(&state, alice.account_id, bob.account_id, "20");
        send(&state, alice.account_id, bob.account_id, "30");

        let Json(response) = list_transactions(
            State(state),
            Query(ListQuery {
                limit: Some(1),
                offset: Some(1),
                user_id: None,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.transactions.len(), 1);
        assert_eq!(
            response.transactions[0].transaction.amount,
            "20".parse().unwrap()
        );
    }
}
