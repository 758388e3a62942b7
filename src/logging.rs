//! Tracing setup.
//!
//! The filter comes from `STOREFRONT_LOG` (same syntax as `RUST_LOG`) and
//! defaults to warnings. The TUI owns the terminal, so it logs to a file.

use std::fs::{self, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::Result;

pub const ENV_LOG: &str = "STOREFRONT_LOG";

const DEFAULT_DIRECTIVE: &str = "storefront=warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Log to stderr, for one-shot commands
pub fn init_stderr() {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time();

    // A subscriber may already be installed (tests)
    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(layer)
        .try_init();
}

/// Append logs to `path`, for the TUI
pub fn init_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let layer = fmt::layer()
        .with_writer(Arc::new(file))
        .with_ansi(false);

    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(layer)
        .try_init();
    Ok(())
}
