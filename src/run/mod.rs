//! Configuration shared by every helm command the plugin runs.

use crate::output::Output;

/// Settings applicable to all helm commands.
///
/// Derived from the plugin [`Config`](crate::config::Config); the output
/// sinks are shared with it rather than copied.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub debug: bool,
    pub values: String,
    pub string_values: String,
    pub values_files: Vec<String>,
    pub namespace: String,
    pub stdout: Option<Output>,
    pub stderr: Option<Output>,
}

impl From<&crate::config::Config> for Config {
    fn from(cfg: &crate::config::Config) -> Self {
        Self {
            debug: cfg.debug,
            values: cfg.values.clone(),
            string_values: cfg.string_values.clone(),
            values_files: cfg.values_files.clone(),
            namespace: cfg.namespace.clone(),
            stdout: cfg.stdout.clone(),
            stderr: cfg.stderr.clone(),
        }
    }
}
