// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

use std::sync::Arc;

use crate::{
    auth::TokenSigner,
    ledger::LedgerDb,
    providers::{FraudClient, RatesClient},
};

/// Shared application state handed to every handler.
///
/// The ledger is the only long-lived shared resource; its transactional
/// boundary owns all balance state. No other in-process mutable state exists.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<LedgerDb>,
    pub tokens: Arc<TokenSigner>,
    pub rates: RatesClient,
    pub fraud: FraudClient,
}

impl AppState {
    pub fn new(
        ledger: LedgerDb,
        tokens: TokenSigner,
        rates: RatesClient,
        fraud: FraudClient,
    ) -> Self {
        Self {
            ledger: Arc::new(ledger),
            tokens: Arc::new(tokens),
            rates,
            fraud,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tempfile::TempDir;

    /// Build an AppState over a throwaway database for tests.
    pub(crate) fn test_state() -> (AppState, TempDir) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let ledger = LedgerDb::open(&dir.path().join("test.redb")).expect("failed to open ledger");
        let state = AppState::new(
            ledger,
            TokenSigner::new("test-secret".as_bytes().to_vec()),
            RatesClient::from_env().expect("rates client"),
            FraudClient::from_env().expect("fraud client"),
        );
        (state, dir)
    }
}
