// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Quantevo

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Directory holding the ledger database file | `./data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | HS256 signing secret for access tokens | Dev fallback (warns) |
//! | `EXCHANGE_RATE_API_URL` | Base URL of the FX-rate provider | exchangerate-api.com |
//! | `FRAUD_CHECK_URL` | URL of the fraud-screen endpoint | jsonplaceholder |
//! | `VERIFY_TIMEOUT_SECS` | Per-check timeout for payment verification | `10` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Environment variable name for the ledger data directory path.
///
/// The redb database file (`ledger.redb`) lives inside this directory. It is
/// created on first start if missing.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Default data directory when `DATA_DIR` is unset.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// File name of the ledger database inside the data directory.
pub const LEDGER_DB_FILE: &str = "ledger.redb";

/// Environment variable name for the token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the FX-rate provider base URL.
///
/// The provider is expected to answer `GET {base}/{CUR}` with a JSON body
/// containing a `rates` object keyed by currency code.
pub const EXCHANGE_RATE_API_URL_ENV: &str = "EXCHANGE_RATE_API_URL";

/// Environment variable name for the fraud-screen endpoint URL.
pub const FRAUD_CHECK_URL_ENV: &str = "FRAUD_CHECK_URL";

/// Environment variable name for the per-check verification timeout (seconds).
pub const VERIFY_TIMEOUT_SECS_ENV: &str = "VERIFY_TIMEOUT_SECS";

/// Default per-check timeout for the verification fan-out, in seconds.
pub const DEFAULT_VERIFY_TIMEOUT_SECS: u64 = 10;

/// Read an environment variable, falling back to a default.
pub fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
