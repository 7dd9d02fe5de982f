//! Repair command implementation.
//!
//! This module implements the `repair` command, which recreates missing or
//! broken artifacts.

use crate::error::CliError;
use crate::utils::{finish_batch, is_all_wildcard, open_store, GlobalOptions};
use clap::Args;
use linkvault::{LinkEngine, RepairOutcome};

/// Recreate missing or broken artifacts.
#[derive(Args)]
pub struct RepairCommand {
    /// Link name ("*" for every link)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Repair every link
    #[arg(long)]
    pub all: bool,
}

impl RepairCommand {
    /// Execute the repair command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let all = is_all_wildcard(self.name.as_deref(), self.all)?;
        let store = open_store(global)?;
        let engine = LinkEngine::new(&store);

        if all {
            let report = engine.repair_all();
            let repaired = report
                .succeeded()
                .filter(|(_, outcome)| matches!(outcome, RepairOutcome::Repaired { .. }))
                .count();
            for (name, outcome) in report.succeeded() {
                if global.verbose || matches!(outcome, RepairOutcome::Repaired { .. }) {
                    global.progress(format!("{name}: {outcome}"));
                }
            }
            global.progress(format!(
                "Repaired {repaired} of {} link(s)",
                report.len()
            ));
            return finish_batch(&report, "repaired");
        }

        let name = self.name.unwrap_or_default();
        let outcome = engine.repair(&name)?;
        global.progress(format!("{name}: {outcome}"));
        Ok(())
    }
}
