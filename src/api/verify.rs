// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! Pre-payment verification facade.
//!
//! Aggregates a KYC existence check, a fraud screen, and an FX quote into
//! one advisory response. Nothing here mutates the ledger; the caller still
//! has to POST /transfer to move funds.
//!
//! The KYC guard runs first and fails fast. The remaining checks fan out
//! concurrently, each under its own timeout; if any of them fails or times
//! out the whole verification fails with 503 and no partial results.

use std::time::Duration;

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use utoipa::ToSchema;

use crate::{
    config::{env_or_default, DEFAULT_VERIFY_TIMEOUT_SECS, VERIFY_TIMEOUT_SECS_ENV},
    error::ApiError,
    providers::FraudStatus,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyRequest {
    pub sender_id: u64,
    pub receiver_id: u64,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub sender_currency: String,
    pub receiver_currency: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub verification: &'static str,
    pub kyc_status: &'static str,
    pub fraud_status: FraudStatus,
    #[schema(value_type = String)]
    pub exchange_rate: Decimal,
    #[schema(value_type = String)]
    pub converted_amount: Decimal,
    pub caution: String,
    #[schema(value_type = String)]
    pub sender_balance: Decimal,
    pub sender_currency: String,
}

/// Per-check budget for the verification fan-out.
fn per_check_timeout() -> Duration {
    let secs = env_or_default(
        VERIFY_TIMEOUT_SECS_ENV,
        &DEFAULT_VERIFY_TIMEOUT_SECS.to_string(),
    )
    .parse()
    .unwrap_or(DEFAULT_VERIFY_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

fn caution_line(converted_amount: Decimal, currency: &str, receiver_id: u64) -> String {
    format!("you'll be sending {converted_amount} {currency} to user {receiver_id}")
}

#[utoipa::path(
    post,
    path = "/verify_payment",
    request_body = VerifyRequest,
    tag = "Transfers",
    responses(
        (status = 200, body = VerifyResponse),
        (status = 400, description = "Invalid amount"),
        (status = 404, description = "Sender or receiver unknown"),
        (status = 503, description = "A verification check failed or timed out")
    )
)]
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    if request.amount <= Decimal::ZERO {
        return Err(ApiError::bad_request("amount must be greater than 0"));
    }

    // KYC guard: both parties must exist before any outbound call is made.
    if !state.ledger.account_exists(request.sender_id)? {
        return Err(ApiError::not_found(format!(
            "sender {} not found",
            request.sender_id
        )));
    }
    if !state.ledger.account_exists(request.receiver_id)? {
        return Err(ApiError::not_found(format!(
            "receiver {} not found",
            request.receiver_id
        )));
    }

    let budget = per_check_timeout();
    let to = request.receiver_currency.trim().to_ascii_uppercase();

    let (fraud, quote, sender) = tokio::join!(
        timeout(budget, state.fraud.screen()),
        timeout(
            budget,
            state
                .rates
                .convert(request.amount, &request.sender_currency, &to)
        ),
        timeout(budget, async { state.ledger.get_account(request.sender_id) }),
    );

    let unavailable = |check: &str| {
        tracing::warn!(check, "verification check failed or timed out");
        ApiError::service_unavailable("payment verification is temporarily unavailable")
    };

    let fraud_status = fraud
        .map_err(|_| unavailable("fraud"))?
        .map_err(|_| unavailable("fraud"))?;
    let (exchange_rate, converted_amount) = quote
        .map_err(|_| unavailable("rates"))?
        .map_err(|_| unavailable("rates"))?;
    let sender = sender
        .map_err(|_| unavailable("balance"))?
        .map_err(|_| unavailable("balance"))?;

    Ok(Json(VerifyResponse {
        verification: "complete",
        kyc_status: "success",
        fraud_status,
        exchange_rate,
        converted_amount,
        caution: caution_line(converted_amount, &to, request.receiver_id),
        sender_balance: sender.balance,
        sender_currency: sender.currency,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::NewAccount;
    use crate::state::testing::test_state;
    use axum::http::StatusCode;

    fn seed(state: &AppState, email: &str, phone: &str) -> u64 {
        state
            .ledger
            .create_account(NewAccount {
                email: email.into(),
                phone: phone.into(),
                full_name: "U".into(),
                currency: "USD".into(),
                password_hash: "$argon2id$stub".into(),
                initial_deposit: "100".parse().unwrap(),
            })
            .unwrap()
            .account_id
    }

    fn request(sender_id: u64, receiver_id: u64, amount: &str) -> VerifyRequest {
        VerifyRequest {
            sender_id,
            receiver_id,
            amount: amount.parse().unwrap(),
            sender_currency: "USD".into(),
            receiver_currency: "GHS".into(),
        }
    }

    #[tokio::test]
    async fn non_positive_amount_fails_before_any_check() {
        let (state, _dir) = test_state();
        let err = verify_payment(State(state), Json(request(1, 2, "0")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_sender_fails_the_kyc_guard() {
        let (state, _dir) = test_state();
        let bob = seed(&state, "bob@example.com", "+15550101");

        let err = verify_payment(State(state), Json(request(9999, bob, "10")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_receiver_fails_the_kyc_guard() {
        let (state, _dir) = test_state();
        let alice = seed(&state, "alice@example.com", "+15550100");

        let err = verify_payment(State(state), Json(request(alice, 9999, "10")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn caution_names_the_receiver_and_amount() {
        let line = caution_line("1537.50".parse().unwrap(), "GHS", 42);
        assert_eq!(line, "you'll be sending 1537.50 GHS to user 42");
    }

    #[test]
    fn timeout_defaults_when_env_unset() {
        assert_eq!(
            per_check_timeout(),
            Duration::from_secs(DEFAULT_VERIFY_TIMEOUT_SECS)
        );
    }
}
