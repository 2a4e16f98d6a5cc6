//! Configuration loading and layering.
//!
//! Reads the plugin's settings from three overlapping environment variable
//! namespaces and resolves conflicts between them with a fixed priority.

pub mod fields;
pub mod loader;

pub use fields::CoerceError;
pub use loader::{Config, ConfigError, Redacted};
