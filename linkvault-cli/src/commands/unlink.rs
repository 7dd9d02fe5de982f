//! Unlink command implementation.
//!
//! This module implements the `unlink` command, which moves a link's data
//! back to its original location and forgets the link.

use crate::error::CliError;
use crate::utils::{finish_batch, is_all_wildcard, open_store, shorten_path, GlobalOptions};
use clap::Args;
use linkvault::{LinkEngine, RemoveResult};

/// Restore linked data to its original location.
#[derive(Args)]
pub struct UnlinkCommand {
    /// Link name ("*" for every link)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Unlink every link
    #[arg(long)]
    pub all: bool,
}

impl UnlinkCommand {
    /// Execute the unlink command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let all = is_all_wildcard(self.name.as_deref(), self.all)?;
        let store = open_store(global)?;
        let engine = LinkEngine::new(&store);

        if all {
            let report = engine.remove_all();
            for (_, result) in report.succeeded() {
                report_removed(global, result);
            }
            global.progress(format!(
                "Unlinked {} of {} link(s)",
                report.succeeded().count(),
                report.len()
            ));
            return finish_batch(&report, "unlinked");
        }

        let name = self.name.unwrap_or_default();
        let result = engine.remove(&name)?;
        report_removed(global, &result);
        Ok(())
    }
}

fn report_removed(global: &GlobalOptions, result: &RemoveResult) {
    for warning in &result.warnings {
        eprintln!("Warning: {warning}");
    }
    match result.restored_to {
        Some(ref path) => global.progress(format!(
            "Unlinked '{}': restored {}",
            result.record.name(),
            shorten_path(path)
        )),
        None => global.progress(format!("Unlinked '{}'", result.record.name())),
    }
}
