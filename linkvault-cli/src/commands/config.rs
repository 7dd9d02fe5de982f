//! Config command implementation.
//!
//! This module implements the `config` command, which shows the resolved
//! configuration and changes the persisted storage root.

use crate::error::CliError;
use crate::utils::{normalize_path, open_store, GlobalOptions};
use clap::{Args, Subcommand};
use linkvault::store::CURRENT_VERSION;
use std::io::Write;
use std::path::PathBuf;

/// Inspect or change the configuration.
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the configuration file, storage root and schema version
    Show,

    /// Persist a new storage root
    SetSyncPath {
        /// New storage root
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

impl ConfigCommand {
    /// Execute the config command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let store = open_store(global)?;

        match self.action {
            ConfigAction::Show => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                writeln!(handle, "config:     {}", store.path().display())?;
                writeln!(handle, "sync_path:  {}", store.sync_root().display())?;
                if global.sync_path.is_some() {
                    writeln!(
                        handle,
                        "configured: {}",
                        store.configured_sync_root().display()
                    )?;
                }
                writeln!(handle, "version:    {CURRENT_VERSION}")?;
                writeln!(handle, "links:      {}", store.len())?;
            }
            ConfigAction::SetSyncPath { path } => {
                let root = normalize_path(&path)?;
                store.set_sync_root(root.clone());
                store.save()?;
                if !store.is_empty() {
                    eprintln!("Warning: existing links keep their current synced paths");
                }
                global.progress(format!("Storage root set to {}", root.display()));
            }
        }

        Ok(())
    }
}
