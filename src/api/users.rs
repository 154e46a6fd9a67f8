// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! Registration and login.
//!
//! Passwords are argon2-hashed before they reach the store; login failures
//! return the same message whether the email is unknown or the password is
//! wrong.

use axum::{extract::State, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    auth::{hash_password, verify_password, AuthError},
    error::ApiError,
    ledger::{Account, NewAccount},
    state::AppState,
};

const MIN_PASSWORD_LEN: usize = 8;

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized(AuthError::InvalidCredentials.to_string())
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub phone: String,
    pub full_name: String,
    #[schema(value_type = String)]
    pub initial_deposit: Decimal,
    pub password: String,
    /// Defaults to USD when omitted.
    pub currency: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub account_id: u64,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    #[schema(value_type = String)]
    pub balance: Decimal,
    pub currency: String,
    pub card_number: Option<u64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of an account; never carries the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserSummary {
    pub account_id: u64,
    pub email: String,
    pub full_name: String,
    pub currency: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: i64,
    pub user: UserSummary,
}

impl From<Account> for UserSummary {
    fn from(account: Account) -> Self {
        Self {
            account_id: account.account_id,
            email: account.email,
            full_name: account.full_name,
            currency: account.currency,
        }
    }
}

fn validate_registration(request: &RegisterRequest) -> Result<(), ApiError> {
    if request.initial_deposit <= Decimal::ZERO {
        return Err(ApiError::bad_request(
            "initial deposit must be greater than 0",
        ));
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(
            "password must be at least 8 characters",
        ));
    }
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::bad_request("email address is not valid"));
    }
    if request.phone.trim().is_empty() {
        return Err(ApiError::bad_request("phone number is required"));
    }
    if request.full_name.trim().is_empty() {
        return Err(ApiError::bad_request("full name is required"));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, body = RegisterResponse),
        (status = 400, description = "Invalid registration data"),
        (status = 409, description = "Email or phone already in use")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    validate_registration(&request)?;

    let password_hash = hash_password(&request.password)
        .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))?;

    let account = state.ledger.create_account(NewAccount {
        email: request.email.trim().to_string(),
        phone: request.phone.trim().to_string(),
        full_name: request.full_name.trim().to_string(),
        currency: request
            .currency
            .map(|c| c.trim().to_ascii_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "USD".to_string()),
        password_hash,
        initial_deposit: request.initial_deposit,
    })?;

    tracing::info!(account_id = account.account_id, "account created");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "user created successfully",
            account_id: account.account_id,
            email: account.email,
            full_name: account.full_name,
            phone: account.phone,
            balance: account.balance,
            currency: account.currency,
            card_number: account.card_number,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, body = LoginResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // Unknown email and wrong password are indistinguishable to the caller.
    let account = state
        .ledger
        .find_by_email(request.email.trim())?
        .ok_or_else(invalid_credentials)?;

    let password_ok = verify_password(&request.password, &account.password_hash)
        .map_err(|e| ApiError::internal(format!("password verification failed: {e}")))?;
    if !password_ok {
        return Err(invalid_credentials());
    }

    let (access_token, expires_at) = state
        .tokens
        .issue(account.account_id)
        .map_err(|e| ApiError::internal(format!("token issuance failed: {e}")))?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer",
        expires_at,
        user: account.into(),
    }))
}
