// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::Auth;

#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    pub name: String,
    #[schema(value_type = String)]
    pub balance: Decimal,
    pub currency: String,
}

/// Balance of the acting account. Token-scoped: there is no way to read
/// another account's balance through this endpoint.
#[utoipa::path(
    get,
    path = "/balance",
    tag = "Accounts",
    security(("bearer_token" = [])),
    responses(
        (status = 200, body = BalanceResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_balance(Auth(account): Auth) -> Json<BalanceResponse> {
    Json(BalanceResponse {
        name: account.full_name,
        balance: account.balance,
        currency: account.currency,
    })
}
