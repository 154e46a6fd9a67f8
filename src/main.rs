// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

use std::{env, net::SocketAddr, path::PathBuf};

use tracing_subscriber::EnvFilter;

use quantevo_ledger::{
    api::router,
    auth::TokenSigner,
    config::{env_or_default, DATA_DIR_ENV, DEFAULT_DATA_DIR, LEDGER_DB_FILE},
    ledger::LedgerDb,
    providers::{FraudClient, RatesClient},
    state::AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    match env_or_default("LOG_FORMAT", "pretty").as_str() {
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let data_dir = PathBuf::from(env_or_default(DATA_DIR_ENV, DEFAULT_DATA_DIR));
    let db_path = data_dir.join(LEDGER_DB_FILE);
    let ledger = LedgerDb::open(&db_path)
        .unwrap_or_else(|e| panic!("failed to open ledger database at {}: {e}", db_path.display()));

    let tokens = TokenSigner::from_env();
    let rates = RatesClient::from_env().expect("failed to build FX-rate client");
    let fraud = FraudClient::from_env().expect("failed to build fraud-screen client");

    let state = AppState::new(ledger, tokens, rates, fraud);
    let app = router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!(%addr, db = %db_path.display(), "Quantevo Ledgers listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    tracing::info!("shutdown signal received");
}
