// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! FX-rate provider client.
//!
//! Talks to an exchangerate-api-style endpoint: `GET {base}/{FROM}` returns
//! a JSON body with a `rates` object keyed by currency code.

use std::{collections::HashMap, time::Duration};

use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::ProviderError;
use crate::config::{env_or_default, EXCHANGE_RATE_API_URL_ENV};

const DEFAULT_RATES_BASE_URL: &str = "https://api.exchangerate-api.com/v4/latest";

/// Outbound request budget; verification applies its own per-check timeout
/// on top of this.
const HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, Decimal>,
}

/// Client for the external FX-rate service.
#[derive(Debug, Clone)]
pub struct RatesClient {
    base_url: String,
    http: Client,
}

impl RatesClient {
    pub fn from_env() -> Result<Self, ProviderError> {
        let base_url = env_or_default(EXCHANGE_RATE_API_URL_ENV, DEFAULT_RATES_BASE_URL);
        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { base_url, http })
    }

    /// Fetch the rate from one currency into another.
    pub async fn get_rate(&self, from: &str, to: &str) -> Result<Decimal, ProviderError> {
        let from = from.trim().to_ascii_uppercase();
        let to = to.trim().to_ascii_uppercase();
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), from);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Request(format!(
                "rate provider returned {} for {from}",
                response.status()
            )));
        }

        let body: RatesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        body.rates
            .get(&to)
            .copied()
            .ok_or(ProviderError::UnknownCurrency(to))
    }

    /// Convert an amount, returning `(rate, converted_amount)`.
    pub async fn convert(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<(Decimal, Decimal), ProviderError> {
        let rate = self.get_rate(from, to).await?;
        Ok((rate, amount * rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_payload_parses_numeric_rates() {
        let body = r#"{"base":"USD","rates":{"GHS":15.37,"EUR":0.92,"USD":1}}"#;
        let parsed: RatesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.rates["GHS"], "15.37".parse::<Decimal>().unwrap());
        assert_eq!(parsed.rates["USD"], Decimal::ONE);
    }

    #[test]
    fn unknown_currency_error_names_the_code() {
        let err = ProviderError::UnknownCurrency("XXX".to_string());
        assert_eq!(
            err.to_string(),
            "no exchange rate published for currency XXX"
        );
    }
}
