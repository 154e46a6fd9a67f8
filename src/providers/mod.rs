// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! External service clients: FX-rate lookup and fraud screening.
//!
//! Both clients share a bounded-timeout `reqwest::Client`; a hung provider
//! surfaces as a request error instead of blocking a handler indefinitely.

pub mod fraud;
pub mod rates;

pub use fraud::{FraudClient, FraudStatus};
pub use rates::RatesClient;

/// Errors from outbound provider calls.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(String),

    #[error("provider response was invalid: {0}")]
    InvalidResponse(String),

    #[error("no exchange rate published for currency {0}")]
    UnknownCurrency(String),
}
