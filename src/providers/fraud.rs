// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! Fraud-screen client.
//!
//! The screen is an opaque external read: any successful response from the
//! configured endpoint clears the payment. The endpoint is swappable via
//! `FRAUD_CHECK_URL` (the default points at a public placeholder service).

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use utoipa::ToSchema;

use super::ProviderError;
use crate::config::{env_or_default, FRAUD_CHECK_URL_ENV};

const DEFAULT_FRAUD_CHECK_URL: &str = "https://jsonplaceholder.typicode.com/posts/1";

const HTTP_TIMEOUT_SECS: u64 = 10;

/// Result of a fraud screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FraudStatus {
    Safe,
}

/// Client for the external fraud-screen service.
#[derive(Debug, Clone)]
pub struct FraudClient {
    url: String,
    http: Client,
}

impl FraudClient {
    pub fn from_env() -> Result<Self, ProviderError> {
        let url = env_or_default(FRAUD_CHECK_URL_ENV, DEFAULT_FRAUD_CHECK_URL);
        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { url, http })
    }

    /// Run the fraud screen for a prospective payment.
    pub async fn screen(&self) -> Result<FraudStatus, ProviderError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if response.status().is_success() {
            Ok(FraudStatus::Safe)
        } else {
            Err(ProviderError::Request(format!(
                "fraud screen returned {}",
                response.status()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraud_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&FraudStatus::Safe).unwrap(),
            r#""safe""#
        );
    }
}
