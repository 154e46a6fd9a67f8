// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! Axum extractor for the authenticated account.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(account): Auth) -> impl IntoResponse {
//!     // account is the acting ledger Account
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::error::AuthError;
use crate::{
    ledger::{Account, LedgerError},
    state::AppState,
};

/// Extractor resolving the bearer token to the acting account.
///
/// Verifies the token signature and expiry, then re-loads the account from
/// the ledger — a valid token whose account has vanished is rejected.
pub struct Auth(pub Account);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        // Extract Bearer token
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        let account_id = state.tokens.verify(token)?;

        let account = state.ledger.get_account(account_id).map_err(|e| match e {
            LedgerError::AccountNotFound(_) => AuthError::AccountGone,
            other => AuthError::InternalError(other.to_string()),
        })?;

        Ok(Auth(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::NewAccount;
    use crate::state::testing::test_state;
    use axum::http::Request;

    fn seed_account(state: &crate::state::AppState) -> Account {
        state
            .ledger
            .create_account(NewAccount {
                email: "alice@example.com".into(),
                phone: "+15550100".into(),
                full_name: "Alice".into(),
                currency: "USD".into(),
                password_hash: "$argon2id$stub".into(),
                initial_deposit: "100".parse().unwrap(),
            })
            .unwrap()
    }

    fn parts_with_header(value: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn extractor_requires_auth_header() {
        let (state, _dir) = test_state();
        let mut parts = parts_with_header(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn extractor_rejects_non_bearer_header() {
        let (state, _dir) = test_state();
        let mut parts = parts_with_header(Some("Basic abc123".to_string()));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }

    #[tokio::test]
    async fn extractor_resolves_acting_account() {
        let (state, _dir) = test_state();
        let account = seed_account(&state);
        let (token, _) = state.tokens.issue(account.account_id).unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(result.0.account_id, account.account_id);
        assert_eq!(result.0.email, "alice@example.com");
    }

    #[tokio::test]
    async fn valid_token_for_missing_account_is_rejected() {
        let (state, _dir) = test_state();
        let (token, _) = state.tokens.issue(9999).unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::AccountGone)));
    }
}
