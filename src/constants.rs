//! App-wide constants.
//!
//! Centralises the tool name, environment namespace prefixes, and the
//! fixed strings of the debug dump so a rename only requires changing
//! this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "drone-helm";

/// Crate version, embedded at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Environment namespaces ──────────────────────────────────────────

/// Prefix Drone puts in front of every key from a step's `settings` block.
pub const PLUGIN_PREFIX: &str = "PLUGIN";

/// Separator between a namespace prefix and a field suffix.
pub const PREFIX_SEPARATOR: &str = "_";

// ── Debug dump ──────────────────────────────────────────────────────

/// Leading text of the one-line configuration dump written in debug mode.
pub const DEBUG_HEADER: &str = "Generated config:";

/// Replacement shown instead of a sensitive value.
pub const REDACTED: &str = "(redacted)";

/// Shown for an output sink in the debug dump.
pub const SINK_PRESENT: &str = "<output>";

/// Shown for a missing output sink in the debug dump.
pub const SINK_ABSENT: &str = "<nil>";

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";
