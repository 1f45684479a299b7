//! # CHAMP Telemetry
//!
//! Structured logging for the CHAMP ledger, built on `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use champ_telemetry::{init_tracing, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_tracing(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RUST_LOG` | unset | Full filter directive, wins over `CHAMP_LOG_LEVEL` |
//! | `CHAMP_LOG_LEVEL` | `info` | Log level filter |
//! | `CHAMP_JSON_LOGS` | `false` | Emit JSON lines |
//! | `CHAMP_LOG_SOURCE` | `false` | Include file and line |
//! | `CHAMP_SERVICE_NAME` | `champ-ledger` | Service name in the startup event |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{init_test_tracing, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber was already installed.
    #[error("Tracing already initialized: {0}")]
    AlreadyInitialized(String),
}
