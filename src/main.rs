//! drone-helm — Drone plugin for helm deployments.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use drone_helm::config::Config;
use drone_helm::output::Output;
use drone_helm::run::Config as RunConfig;

fn main() {
    let _cli = cli::args::Cli::parse();
    cli::init_logging();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::new(Some(Output::stdout()), Some(Output::stderr()))
        .context("failed to load plugin configuration")?;

    let run_config = RunConfig::from(&config);

    tracing::info!(
        command = %config.command,
        event = %config.drone_event,
        chart = %config.chart,
        release = %config.release,
        namespace = %run_config.namespace,
        values_files = run_config.values_files.len(),
        timeout = %config.timeout,
        "plugin configuration loaded"
    );

    Ok(())
}
