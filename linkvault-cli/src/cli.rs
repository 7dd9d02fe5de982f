//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, ConfigCommand, LinkCommand, ListCommand, RepairCommand, StatusCommand,
    UnlinkCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for relocating files into a synced storage root.
#[derive(Parser)]
#[command(name = "linkvault")]
#[command(
    version,
    about = "Relocate files into a synced storage root behind symlinks",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the configuration file location
    #[arg(long, value_name = "PATH", global = true, env = "LINKVAULT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the storage root for this invocation
    #[arg(long, value_name = "PATH", global = true, env = "LINKVAULT_SYNC_PATH")]
    pub sync_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Relocate a file or directory into the storage root
    Link(LinkCommand),

    /// Restore linked data to its original location
    Unlink(UnlinkCommand),

    /// Recreate missing or broken artifacts
    Repair(RepairCommand),

    /// Show the live state of a link
    Status(StatusCommand),

    /// List managed links
    List(ListCommand),

    /// Inspect or change the configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["linkvault", "list", "--quiet", "--format", "json"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Command::List(_)));
    }

    #[test]
    fn test_link_arguments() {
        let cli = Cli::try_parse_from([
            "linkvault",
            "link",
            "/tmp/notes",
            "--name",
            "work",
            "--shortcut",
        ])
        .unwrap();
        match cli.command {
            Command::Link(cmd) => {
                assert_eq!(cmd.path, PathBuf::from("/tmp/notes"));
                assert_eq!(cmd.name.as_deref(), Some("work"));
                assert!(cmd.shortcut);
            }
            _ => panic!("expected link command"),
        }
    }
}
