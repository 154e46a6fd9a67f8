// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ConvertQuery {
    /// Source currency code; defaults to USD.
    pub from_currency: Option<String>,
    /// Target currency code; defaults to GHS.
    pub to_currency: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConvertResponse {
    #[schema(value_type = String)]
    pub original_amount: Decimal,
    pub from_currency: String,
    pub to_currency: String,
    #[schema(value_type = String)]
    pub exchange_rate: Decimal,
    #[schema(value_type = String)]
    pub converted_amount: Decimal,
}

#[utoipa::path(
    get,
    path = "/convert/{amount}",
    params(
        ("amount" = String, Path, description = "Amount to convert"),
        ConvertQuery
    ),
    tag = "Rates",
    responses(
        (status = 200, body = ConvertResponse),
        (status = 400, description = "Unknown currency code"),
        (status = 503, description = "Rate provider unavailable")
    )
)]
pub async fn convert(
    Path(amount): Path<Decimal>,
    Query(query): Query<ConvertQuery>,
    State(state): State<AppState>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let from = query
        .from_currency
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "USD".to_string());
    let to = query
        .to_currency
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "GHS".to_string());

    let (exchange_rate, converted_amount) = state.rates.convert(amount, &from, &to).await?;

    Ok(Json(ConvertResponse {
        original_amount: amount,
        from_currency: from,
        to_currency: to,
        exchange_rate,
        converted_amount,
    }))
}
