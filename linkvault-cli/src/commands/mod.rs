//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `link`: Relocate a file or directory into the storage root
//! - `unlink`: Restore linked data to its original location
//! - `repair`: Recreate missing or broken artifacts
//! - `status`: Show the live state of a link
//! - `list`: List managed links
//! - `config`: Inspect or change the configuration
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod config;
pub mod link;
pub mod list;
pub mod repair;
pub mod status;
pub mod unlink;

pub use completions::CompletionsCommand;
pub use config::ConfigCommand;
pub use link::LinkCommand;
pub use list::ListCommand;
pub use repair::RepairCommand;
pub use status::StatusCommand;
pub use unlink::UnlinkCommand;
