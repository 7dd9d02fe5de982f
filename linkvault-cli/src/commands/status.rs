//! Status command implementation.
//!
//! This module implements the `status` command, which reports the live state
//! of a single link.

use crate::error::CliError;
use crate::utils::{format_timestamp, open_store, GlobalOptions};
use clap::Args;
use linkvault::{LinkEngine, LinkState};
use std::io::Write;

/// Show the live state of a link.
#[derive(Args)]
pub struct StatusCommand {
    /// Link name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Exit with code 1 unless the link is healthy
    #[arg(long)]
    pub check: bool,
}

impl StatusCommand {
    /// Execute the status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let store = open_store(global)?;
        let status = LinkEngine::new(&store).status(&self.name);

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "name:      {}", status.name)?;
        writeln!(handle, "state:     {}", status.state)?;
        if let Some(ref record) = status.record {
            writeln!(handle, "kind:      {}", record.artifact_kind())?;
            writeln!(handle, "original:  {}", record.original_path().display())?;
            writeln!(handle, "synced:    {}", record.synced_path().display())?;
            writeln!(
                handle,
                "type:      {}",
                if record.is_directory() { "directory" } else { "file" }
            )?;
            writeln!(handle, "created:   {}", format_timestamp(record.created_at()))?;
        }

        if self.check && status.state != LinkState::Linked {
            return Err(CliError::SemanticFailure(format!(
                "link '{}' is {}",
                status.name, status.state
            )));
        }
        Ok(())
    }
}
