//! # Mirror Telemetry
//!
//! Logging bootstrap for the mirror ingest workspace.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mirror_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging(&TelemetryConfig::from_env())?;
//!     // Ingestion runs here; handlers log through `tracing`.
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `mirror-ingest` | Service name in logs |
//! | `MN_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter directive |
//! | `MN_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `MN_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

