//! Environment variable abstraction for testability.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env::var`].
//! Most tests use [`Env::mock()`] backed by a `HashMap` and never touch the
//! process environment. The few tests that exercise [`Env::real()`] set
//! variables through `unsafe` [`std::env::set_var`] / [`std::env::remove_var`]
//! and run under `#[serial]` with a guard that restores them.

use std::collections::HashMap;
use std::env::VarError;
use std::ffi::OsString;

/// Environment variable reader.
///
/// Wraps lookups so that production code hits `std::env` while tests
/// can supply a controlled set of values.
#[derive(Clone, Debug)]
pub struct Env {
    overrides: Option<HashMap<String, OsString>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    ///
    /// Values are OS strings so that tests can also supply non-Unicode data.
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<OsString>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up an environment variable by name.
    ///
    /// A variable that is set to an empty string is present; only an
    /// unset variable yields [`VarError::NotPresent`].
    pub fn var(&self, name: &str) -> Result<String, VarError> {
        match &self.overrides {
            Some(map) => map
                .get(name)
                .cloned()
                .ok_or(VarError::NotPresent)?
                .into_string()
                .map_err(VarError::NotUnicode),
            None => std::env::var(name),
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::real()
    }
}
