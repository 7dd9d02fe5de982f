//! Build script for linkvault-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("linkvault")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Relocate files into a synced storage root behind symlinks")
        .long_about(
            "Move files and directories into a central storage root and leave a symlink or \
             shortcut at their original location",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Override the configuration file location")
                .value_name("PATH")
                .global(true)
                .env("LINKVAULT_CONFIG"),
        )
        .arg(
            Arg::new("sync-path")
                .long("sync-path")
                .help("Override the storage root for this invocation")
                .value_name("PATH")
                .global(true)
                .env("LINKVAULT_SYNC_PATH"),
        )
        .subcommands(vec![
            Command::new("link")
                .about("Relocate a file or directory into the storage root")
                .long_about("Move PATH into the storage root and leave a symlink in its place"),
            Command::new("unlink")
                .about("Restore linked data to its original location")
                .long_about("Move a link's data back, remove the artifact and forget the link"),
            Command::new("repair")
                .about("Recreate missing or broken artifacts")
                .long_about("Recreate the artifact of one link, or of every link with --all"),
            Command::new("status")
                .about("Show the live state of a link")
                .long_about("Report whether a link is linked, broken or unmanaged"),
            Command::new("list")
                .about("List managed links")
                .long_about("Display every link with its live state in various formats"),
            Command::new("config")
                .about("Inspect or change the configuration")
                .long_about("Show the configuration or persist a new storage root"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("linkvault.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
