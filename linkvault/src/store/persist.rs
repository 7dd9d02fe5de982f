//! On-disk format of the configuration file.
//!
//! The file is a JSON document:
//!
//! ```json
//! {
//!   "settings": { "default_sync_path": "/home/user/LinkVault" },
//!   "links": {
//!     "notes": {
//!       "original_path": "/home/user/notes",
//!       "synced_path": "/home/user/LinkVault/notes",
//!       "shortcut": false,
//!       "is_directory": true,
//!       "created_at": "2026-01-02T03:04:05Z"
//!     }
//!   },
//!   "version": "1.0"
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::record::{Configuration, LinkRecord};
use crate::artifact::ArtifactKind;
use crate::error::{Error, Result};

/// Schema version written by, and the only one accepted by, this build.
pub const CURRENT_VERSION: &str = "1.0";

#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    settings: Settings,
    #[serde(default)]
    links: BTreeMap<String, StoredLink>,
    version: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Settings {
    default_sync_path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredLink {
    original_path: PathBuf,
    synced_path: PathBuf,
    #[serde(default)]
    shortcut: bool,
    #[serde(default)]
    is_directory: bool,
    created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: Option<String>,
}

/// Read the configuration at `path`, or defaults if no file exists.
///
/// # Errors
///
/// - [`Error::UnsupportedVersion`] if the file declares another schema version
/// - [`Error::Serialization`] if the document is malformed
/// - [`Error::Io`] if the file exists but cannot be read
pub fn load(path: &Path) -> Result<Configuration> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no configuration at {}, using defaults", path.display());
            return Ok(Configuration::default());
        }
        Err(e) => return Err(Error::io(path, e)),
    };
    parse(&contents)
}

/// Parse a configuration document.
///
/// The version is checked before the rest of the document so that a file
/// from a newer schema reports [`Error::UnsupportedVersion`] rather than a
/// parse error.
///
/// # Errors
///
/// See [`load`].
pub fn parse(contents: &str) -> Result<Configuration> {
    let probe: VersionProbe = serde_json::from_str(contents)?;
    let found = probe.version.unwrap_or_else(|| "none".to_string());
    if found != CURRENT_VERSION {
        return Err(Error::UnsupportedVersion {
            expected: CURRENT_VERSION.to_string(),
            found,
        });
    }

    let file: ConfigFile = serde_json::from_str(contents)?;
    let links = file
        .links
        .into_iter()
        .map(|(name, stored)| {
            let kind = if stored.shortcut {
                ArtifactKind::Shortcut
            } else {
                ArtifactKind::Symlink
            };
            let record = LinkRecord::restore(
                name.clone(),
                stored.original_path,
                stored.synced_path,
                kind,
                stored.is_directory,
                stored.created_at,
            );
            (name, record)
        })
        .collect();

    Ok(Configuration {
        sync_root: file.settings.default_sync_path,
        links,
    })
}

/// Render a configuration as a JSON document.
///
/// # Errors
///
/// Returns [`Error::Serialization`] if rendering fails.
pub fn render(config: &Configuration) -> Result<String> {
    let file = ConfigFile {
        settings: Settings {
            default_sync_path: config.sync_root.clone(),
        },
        links: config
            .links
            .iter()
            .map(|(name, record)| {
                let stored = StoredLink {
                    original_path: record.original_path().to_path_buf(),
                    synced_path: record.synced_path().to_path_buf(),
                    shortcut: record.artifact_kind() == ArtifactKind::Shortcut,
                    is_directory: record.is_directory(),
                    created_at: record.created_at(),
                };
                (name.clone(), stored)
            })
            .collect(),
        version: CURRENT_VERSION.to_string(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Write `config` to `path` through a temporary file in the same directory,
/// so the canonical file is either the old or the new document, never a
/// partial one.
///
/// # Errors
///
/// Returns [`Error::Persistence`] for any I/O failure.
pub fn write(path: &Path, config: &Configuration) -> Result<()> {
    let rendered = render(config)?;
    let persistence = |source: io::Error| Error::Persistence {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(persistence)?;

    let mut temp = NamedTempFile::new_in(dir).map_err(persistence)?;
    temp.write_all(rendered.as_bytes()).map_err(persistence)?;
    temp.write_all(b"\n").map_err(persistence)?;
    temp.as_file().sync_all().map_err(persistence)?;
    temp.persist(path).map_err(|e| persistence(e.error))?;

    log::debug!("saved configuration to {}", path.display());
    Ok(())
}
