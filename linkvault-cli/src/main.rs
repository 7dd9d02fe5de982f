//! Main entry point for the linkvault CLI.
//!
//! This is the command-line interface for the linkvault link manager.
//! It provides commands for managing links:
//! - `link`: Relocate a file or directory behind an artifact
//! - `unlink`: Restore the data and forget the link
//! - `repair`: Recreate missing or broken artifacts
//! - `status` / `list`: Inspect links

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _level = linkvault::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
        sync_path: cli.sync_path,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Link(cmd) => cmd.execute(&global),
        cli::Command::Unlink(cmd) => cmd.execute(&global),
        cli::Command::Repair(cmd) => cmd.execute(&global),
        cli::Command::Status(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Config(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
