//! Config struct and loading logic.
//!
//! Drone hands plugin configuration over as environment variables coming
//! from three namespaces. Priority (highest to lowest):
//! 1. `<PREFIX>_<KEY>`, where the prefix comes from `PLUGIN_PREFIX`
//! 2. `<KEY>`, from the step's `environment` block
//! 3. `PLUGIN_<KEY>`, from the step's `settings` block
//! 4. Zero values

use std::env::VarError;
use std::fmt::{self, Write as _};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::fields::{CoerceError, FIELDS, Value};
use crate::constants::{
    DEBUG_HEADER, PLUGIN_PREFIX, PREFIX_SEPARATOR, REDACTED, SINK_ABSENT, SINK_PRESENT,
};
use crate::env::Env;
use crate::output::Output;

static JUST_NUMBERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));

/// Errors during config loading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("assigning {var} to {field}: {reason}")]
    Coerce {
        var: String,
        field: &'static str,
        reason: CoerceError,
    },
}

/// Plugin configuration captured from Drone's `settings` and `environment` blocks.
#[derive(Clone, Default)]
pub struct Config {
    /// Helm command to run.
    pub command: String,
    /// Drone event that invoked this plugin.
    pub drone_event: String,
    /// Call `helm dependency update` before the main command.
    pub update_dependencies: bool,
    /// Repositories to `helm repo add` before the main command.
    pub add_repos: Vec<String>,
    /// Prefix to use when looking up secret env vars.
    pub prefix: String,
    /// Generate debug output and pass `--debug` to all helm commands.
    pub debug: bool,
    /// Argument to `--set`.
    pub values: String,
    /// Argument to `--set-string`.
    pub string_values: String,
    /// Arguments to `--values`.
    pub values_files: Vec<String>,
    /// Kubernetes namespace for all helm commands.
    pub namespace: String,
    /// Kubernetes authentication token to put in `.kube/config`.
    pub kube_token: String,
    /// Put `insecure-skip-tls-verify` in `.kube/config`.
    pub skip_tls_verify: bool,
    /// The cluster CA's self-signed certificate, base64-encoded.
    pub certificate: String,
    /// The Kubernetes cluster's API endpoint.
    pub api_server: String,
    /// Account to use for connecting to the cluster.
    pub service_account: String,
    /// Specific chart version to use in `helm upgrade`.
    pub chart_version: String,
    pub dry_run: bool,
    pub wait: bool,
    pub reuse_values: bool,
    /// Argument to `--timeout`, as a duration string such as `5m0s`.
    pub timeout: String,
    pub chart: String,
    pub release: String,
    pub force: bool,

    pub stdout: Option<Output>,
    pub stderr: Option<Output>,
}

/// One of the three namespaces configuration is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass<'p> {
    /// `PLUGIN_<KEY>`
    Plugin,
    /// `<KEY>`
    Bare,
    /// `<PREFIX>_<KEY>`
    Custom(&'p str),
}

impl Pass<'_> {
    fn var_name(self, suffix: &str) -> String {
        match self {
            Pass::Plugin => format!("{PLUGIN_PREFIX}{PREFIX_SEPARATOR}{suffix}"),
            Pass::Bare => suffix.to_string(),
            Pass::Custom(prefix) => format!("{prefix}{PREFIX_SEPARATOR}{suffix}").to_uppercase(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Pass::Plugin => "plugin",
            Pass::Bare => "bare",
            Pass::Custom(_) => "prefixed",
        }
    }
}

impl Config {
    /// Build a config from the process environment.
    pub fn new(stdout: Option<Output>, stderr: Option<Output>) -> Result<Self, ConfigError> {
        Self::from_env(&Env::real(), stdout, stderr)
    }

    /// Build a config from `env`, accounting for all three naming formats.
    ///
    /// When `debug` ends up enabled, a redacted one-line dump is written to
    /// `stderr`. Nothing is ever written to `stdout`.
    pub fn from_env(
        env: &Env,
        stdout: Option<Output>,
        stderr: Option<Output>,
    ) -> Result<Self, ConfigError> {
        let mut config = Config {
            stdout,
            stderr,
            ..Config::default()
        };

        config.apply_pass(env, Pass::Plugin)?;

        // Captured before the bare pass so that a bare `PREFIX` cannot
        // redirect the prefixed lookup.
        let prefix = config.prefix.clone();

        config.apply_pass(env, Pass::Bare)?;

        if !prefix.is_empty() {
            config.apply_pass(env, Pass::Custom(&prefix))?;
        }

        config.normalize_timeout();

        if config.debug && config.stderr.is_some() {
            config.log_debug();
        }

        Ok(config)
    }

    /// Overwrite every field whose variable is present in this pass's namespace.
    fn apply_pass(&mut self, env: &Env, pass: Pass<'_>) -> Result<(), ConfigError> {
        let mut applied = 0usize;
        for spec in FIELDS {
            let var = pass.var_name(spec.suffix);
            let raw = match env.var(&var) {
                Ok(raw) => raw,
                Err(VarError::NotPresent) => continue,
                Err(VarError::NotUnicode(_)) => {
                    return Err(ConfigError::Coerce {
                        var,
                        field: spec.label,
                        reason: CoerceError::NotUnicode,
                    });
                }
            };
            (spec.slot)(self)
                .assign(raw)
                .map_err(|reason| ConfigError::Coerce {
                    var,
                    field: spec.label,
                    reason,
                })?;
            applied += 1;
        }
        tracing::debug!(pass = pass.name(), applied, "applied environment pass");
        Ok(())
    }

    /// A bare number of seconds gets an explicit unit.
    fn normalize_timeout(&mut self) {
        if JUST_NUMBERS.is_match(&self.timeout) {
            self.timeout.push('s');
            tracing::debug!(timeout = %self.timeout, "inferred seconds for numeric timeout");
        }
    }

    fn log_debug(&self) {
        let Some(stderr) = &self.stderr else {
            return;
        };
        let line = format!("{DEBUG_HEADER} {}", self.redacted());
        if let Err(e) = stderr.write_line(&line) {
            tracing::warn!(error = %e, "failed to write debug config");
        }
    }

    /// Display adapter rendering every field with sensitive values hidden.
    pub fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }
}

/// Renders a [`Config`] as `{Label:value, ...}` in declaration order.
///
/// Non-empty sensitive values are shown as `(redacted)`; the config itself
/// is never modified.
pub struct Redacted<'a>(&'a Config);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, spec) in FIELDS.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}:", spec.label)?;
            match (spec.get)(self.0) {
                Value::Text(s) if spec.sensitive && !s.is_empty() => f.write_str(REDACTED)?,
                Value::Text(s) => write_escaped(f, s)?,
                Value::Flag(b) => write!(f, "{b}")?,
                Value::List(items) => {
                    f.write_str("[")?;
                    for (j, item) in items.iter().enumerate() {
                        if j > 0 {
                            f.write_str(" ")?;
                        }
                        write_escaped(f, item)?;
                    }
                    f.write_str("]")?;
                }
            }
        }
        write!(
            f,
            ", Stdout:{}, Stderr:{}}}",
            sink_label(self.0.stdout.as_ref()),
            sink_label(self.0.stderr.as_ref()),
        )
    }
}

/// Control characters are written as escapes so a value cannot end the line.
fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    for c in s.chars() {
        if c.is_control() {
            write!(f, "{}", c.escape_default())?;
        } else {
            f.write_char(c)?;
        }
    }
    Ok(())
}

fn sink_label(sink: Option<&Output>) -> &'static str {
    if sink.is_some() { SINK_PRESENT } else { SINK_ABSENT }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Config {}", self.redacted())
    }
}
