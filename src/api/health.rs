// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Platform identity and liveness summary served at the root path.
#[derive(Serialize, ToSchema)]
pub struct ServiceStatus {
    pub name: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: &'static str,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Status",
    responses((status = 200, body = ServiceStatus))
)]
pub async fn service_status() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        name: "Quantevo Ledgers",
        status: "operational",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Status",
    responses((status = 200, body = HealthStatus))
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}
