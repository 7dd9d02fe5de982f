//! Library exports for linkvault-cli.
//!
//! This module exports the CLI structure for use by tests and by tooling
//! that generates man pages and other documentation.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

// Re-export CLI for documentation tooling
pub use cli::Cli;
