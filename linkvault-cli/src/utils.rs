//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including path resolution, store loading, and output formatting.

use crate::error::CliError;
use chrono::{DateTime, Utc};
use linkvault::{BatchReport, LinkStore};
use std::path::{Path, PathBuf};

/// Name argument that selects every link.
pub const ALL_WILDCARD: &str = "*";

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the configuration file location.
    pub config: Option<PathBuf>,

    /// Override the storage root for this invocation.
    pub sync_path: Option<PathBuf>,
}

impl GlobalOptions {
    /// Print a progress line to stderr unless `--quiet` is set.
    pub fn progress(&self, message: impl AsRef<str>) {
        if !self.quiet {
            eprintln!("{}", message.as_ref());
        }
    }
}

/// Normalize a path (make absolute, expand ~, etc.) without following symlinks.
pub fn normalize_path(path: &Path) -> Result<PathBuf, CliError> {
    linkvault::path::abs_path(path).map_err(CliError::from)
}

/// Open the link store, applying the storage root override if one was given.
pub fn open_store(global: &GlobalOptions) -> Result<LinkStore, CliError> {
    let root_override = global
        .sync_path
        .as_deref()
        .map(normalize_path)
        .transpose()?;

    // Priority: global option (flag or LINKVAULT_CONFIG) > next to the executable
    let store = match global.config {
        Some(ref path) => LinkStore::open(normalize_path(path)?)?,
        None => LinkStore::open_default()?,
    };
    Ok(store.with_root_override(root_override))
}

/// Whether a name argument means "every link".
pub fn is_all_wildcard(name: Option<&str>, all: bool) -> Result<bool, CliError> {
    match (name, all) {
        (Some(_), true) => Err(CliError::InvalidArguments(
            "Cannot specify both a link name and --all".to_string(),
        )),
        (None, false) => Err(CliError::InvalidArguments(
            "Specify a link name or --all".to_string(),
        )),
        (Some(name), false) => Ok(name == ALL_WILDCARD),
        (None, true) => Ok(true),
    }
}

/// Print each failure of a batch to stderr and turn any failure into an
/// exit code 1 error.
pub fn finish_batch<T>(report: &BatchReport<T>, verb: &str) -> Result<(), CliError> {
    for (name, err) in report.failed() {
        eprintln!("Error: {name}: {err}");
    }
    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::SemanticFailure(format!(
            "{} of {} link(s) could not be {verb}",
            report.failed().count(),
            report.len()
        )))
    }
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_resolution() {
        assert!(is_all_wildcard(Some("*"), false).unwrap());
        assert!(is_all_wildcard(None, true).unwrap());
        assert!(!is_all_wildcard(Some("notes"), false).unwrap());
        assert!(is_all_wildcard(Some("notes"), true).is_err());
        assert!(is_all_wildcard(None, false).is_err());
    }

    #[test]
    fn test_shorten_path_outside_home() {
        assert_eq!(shorten_path(Path::new("/opt/data")), "/opt/data");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamp(ts), "2026-01-02 03:04:05");
    }
}
