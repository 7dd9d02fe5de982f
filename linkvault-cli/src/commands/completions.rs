//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "linkvault";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        global.progress(format!("# Generating {} completion script", self.shell));
        match self.shell {
            Shell::Bash => global.progress(
                "#   linkvault completions bash > ~/.local/share/bash-completion/completions/linkvault",
            ),
            Shell::Zsh => {
                global.progress("#   linkvault completions zsh > ~/.zsh/completions/_linkvault");
                global.progress("# Make sure ~/.zsh/completions is in your $fpath");
            }
            Shell::Fish => global.progress(
                "#   linkvault completions fish > ~/.config/fish/completions/linkvault.fish",
            ),
            Shell::PowerShell => {
                global.progress("#   linkvault completions powershell | Out-String | Invoke-Expression");
            }
            _ => {}
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}
