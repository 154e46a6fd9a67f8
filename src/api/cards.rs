// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize, ToSchema)]
pub struct CardInfo {
    pub account_number: u64,
    pub card_type: &'static str,
    #[schema(value_type = String)]
    pub balance: Decimal,
    pub holder_name: String,
    pub currency: String,
}

#[utoipa::path(
    get,
    path = "/card/{user_id}",
    params(
        ("user_id" = u64, Path, description = "Account to look up")
    ),
    tag = "Accounts",
    responses(
        (status = 200, body = CardInfo),
        (status = 404, description = "Account unknown or no card assigned")
    )
)]
pub async fn get_card_info(
    Path(user_id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<CardInfo>, ApiError> {
    let account = state.ledger.get_account(user_id)?;
    let account_number = account
        .card_number
        .ok_or_else(|| ApiError::not_found(format!("account {user_id} has no card assigned")))?;

    Ok(Json(CardInfo {
        account_number,
        card_type: "Virtual Card",
        balance: account.balance,
        holder_name: account.full_name,
        currency: account.currency,
    }))
}
