//! Link command implementation.
//!
//! This module implements the `link` command, which moves a file or
//! directory into the storage root and leaves an artifact in its place.

use crate::error::CliError;
use crate::utils::{open_store, shorten_path, GlobalOptions};
use clap::Args;
use linkvault::{CreateOptions, LinkEngine};
use std::path::PathBuf;

/// Relocate a file or directory into the storage root.
#[derive(Args)]
pub struct LinkCommand {
    /// File or directory to relocate
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Link name (default: the file name of PATH)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Leave a shortcut file instead of a symbolic link
    #[arg(long)]
    pub shortcut: bool,
}

impl LinkCommand {
    /// Execute the link command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Open the store
        let store = open_store(global)?;
        let engine = LinkEngine::new(&store);

        // 2. Build options and create the link
        let options = CreateOptions::new(self.path)
            .with_name(self.name)
            .with_shortcut(self.shortcut);
        let result = engine.create(options)?;

        // 3. Report
        if global.verbose {
            for action in &result.actions_taken {
                global.progress(format!("  - {action}"));
            }
        }
        global.progress(format!(
            "Linked '{}': {} -> {}",
            result.record.name(),
            shorten_path(&result.artifact_path),
            shorten_path(result.record.synced_path())
        ));

        Ok(())
    }
}
