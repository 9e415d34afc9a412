//! Tooling & Integration Layer
//!
//! Command-line host for the publish gate: loads a content directory, runs the
//! filter with the configured alert strategy, and reports the outcome.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
