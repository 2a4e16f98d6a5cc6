//! drone-helm — Drone plugin configuration for helm deployments (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod constants;
pub mod env;
pub mod output;
pub mod run;
