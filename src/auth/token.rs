// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! Signed access tokens (HS256 JWT).
//!
//! Tokens are stateless: the account id travels in the `sub` claim and the
//! acting account is re-loaded by id on every request. Expiry is a fixed
//! window from issuance; there is no refresh mechanism.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use crate::config::JWT_SECRET_ENV;

/// Fixed token lifetime in minutes.
pub const TOKEN_TTL_MINUTES: i64 = 30;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Fallback secret for local development only.
const DEV_SECRET: &str = "quantevo-dev-secret-do-not-use-in-production";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the account id as a decimal string.
    sub: String,
    /// Issued at (Unix seconds).
    iat: i64,
    /// Expiration (Unix seconds).
    exp: i64,
}

/// Issues and verifies HS256 access tokens.
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl_minutes: i64,
}

impl TokenSigner {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            ttl_minutes: TOKEN_TTL_MINUTES,
        }
    }

    /// Build from `JWT_SECRET`, warning loudly on the dev fallback.
    pub fn from_env() -> Self {
        match std::env::var(JWT_SECRET_ENV) {
            Ok(secret) if !secret.is_empty() => Self::new(secret.into_bytes()),
            _ => {
                tracing::warn!(
                    "{JWT_SECRET_ENV} is not set; using the development fallback secret"
                );
                Self::new(DEV_SECRET.as_bytes().to_vec())
            }
        }
    }

    #[cfg(test)]
    fn with_ttl(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl_minutes,
        }
    }

    /// Issue a token for an account. Returns the token and its expiry
    /// (Unix seconds).
    pub fn issue(&self, account_id: u64) -> Result<(String, i64), AuthError> {
        let now = Utc::now();
        let expires_at = (now + Duration::minutes(self.ttl_minutes)).timestamp();
        let claims = Claims {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|e| AuthError::InternalError(format!("token signing failed: {e}")))?;

        Ok((token, expires_at))
    }

    /// Verify signature and expiry; return the subject account id.
    pub fn verify(&self, token: &str) -> Result<u64, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_aud = false;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::MalformedToken,
        })?;

        token_data
            .claims
            .sub
            .parse::<u64>()
            .map_err(|_| AuthError::MalformedToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_then_verify_round_trips() {
        let signer = TokenSigner::new("test-secret".as_bytes().to_vec());
        let (token, expires_at) = signer.issue(42).unwrap();
        assert!(expires_at > Utc::now().timestamp());
        assert_eq!(signer.verify(&token).unwrap(), 42);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let signer = TokenSigner::new("secret-a".as_bytes().to_vec());
        let other = TokenSigner::new("secret-b".as_bytes().to_vec());
        let (token, _) = signer.issue(42).unwrap();

        let err = other.verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn garbage_token_is_malformed() {
        let signer = TokenSigner::new("test-secret".as_bytes().to_vec());
        let err = signer.verify("not.a.jwt").unwrap_err();
        assert!(matches!(err, AuthError::MalformedToken));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Negative TTL puts exp well past the 60s leeway
        let signer = TokenSigner::with_ttl("test-secret", -10);
        let (token, _) = signer.issue(42).unwrap();

        let err = signer.verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }
}
