//! Clap argument types.

use clap::Parser;

/// Drone plugin for helm deployments.
///
/// Settings are read from `PLUGIN_*`, unprefixed, and `$PLUGIN_PREFIX`-prefixed
/// environment variables, in increasing order of precedence.
#[derive(Parser, Debug)]
#[command(
    name = drone_helm::constants::APP_NAME,
    version = drone_helm::constants::VERSION,
)]
pub struct Cli {}
