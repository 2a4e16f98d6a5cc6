//! CLI definitions and logging setup.
//!
//! All plugin settings arrive through the environment; the command line
//! only answers `--help` and `--version`.

pub mod args;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use drone_helm::constants::DEFAULT_LOG_FILTER;

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
