//! Tracing subscriber setup.
//!
//! Filter precedence: `RUST_LOG`, then `TURF_LOG_LEVEL`, then `info`.
//! Command-line runs log to stderr; the TUI logs to a file because stderr
//! shares the alternate screen.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::AppError;

const DEFAULT_LEVEL: &str = "info";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(target: LogTarget) -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let filter = env_filter();

    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
            .try_init(),
        LogTarget::File(path) => {
            let file = File::create(&path).map_err(|e| {
                AppError::io(format!("Failed to create log file '{}': {e}", path.display()))
            })?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .try_init()
        }
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("TURF_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LEVEL.to_string());
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    })
}
