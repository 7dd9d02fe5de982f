//! Remove: restore a link's data to its original location and forget it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::{classify, EntryKind};
use crate::store::LinkRecord;

use super::engine::{ArtifactSlot, LinkEngine};
use super::transaction::{Step, Transaction};

/// Outcome of a successful remove.
#[derive(Debug, Clone)]
pub struct RemoveResult {
    /// The record that was deleted.
    pub record: LinkRecord,

    /// Where the data was restored to, or `None` if there was nothing to
    /// restore.
    pub restored_to: Option<PathBuf>,

    /// Conditions worth reporting that did not stop the operation.
    pub warnings: Vec<String>,

    /// Descriptions of the filesystem steps performed.
    pub actions_taken: Vec<String>,
}

impl LinkEngine<'_> {
    /// Undo a link: put the data back at its original path, remove the
    /// artifact and delete the record.
    ///
    /// The data is first moved to a staging entry beside the original path,
    /// then the artifact is removed, then the staging entry is renamed into
    /// place. Any failure undoes the completed steps.
    ///
    /// If the synced data has already disappeared only the artifact is
    /// removed, and the result carries a warning.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if there is no link named `name`
    /// - [`Error::ConflictDetected`] if the artifact location holds something
    ///   that is not this link's artifact, or a shortcut link's original path
    ///   is occupied
    /// - [`Error::RolledBack`] / [`Error::PartialFailure`] if a step failed
    /// - [`Error::Persistence`] if the configuration could not be saved
    pub fn remove(&self, name: &str) -> Result<RemoveResult> {
        let record = self.record(name)?;
        let kind = record.artifact_kind();
        let artifact = self.artifacts.get(kind)?;
        let artifact_path = artifact.location(record.original_path());
        let original = record.original_path().to_path_buf();
        let synced = record.synced_path().to_path_buf();

        let slot = self.inspect_slot(&record, artifact)?;
        if artifact_path != original {
            let occupant = classify(&original).map_err(|e| Error::io(&original, e))?;
            if occupant != EntryKind::Missing {
                return Err(Error::ConflictDetected {
                    path: original,
                    details: format!("cannot restore over {occupant}"),
                });
            }
        }

        let data_present =
            classify(&synced).map_err(|e| Error::io(&synced, e))? != EntryKind::Missing;
        let mut warnings = Vec::new();
        let mut tx = Transaction::new(name, &self.artifacts, &synced);

        if data_present {
            let staging = staging_path(&original)?;
            tx.apply(Step::MoveData {
                from: synced.clone(),
                to: staging.clone(),
            })?;
            if slot != ArtifactSlot::Empty {
                tx.apply(Step::RemoveArtifact {
                    kind,
                    artifact_path: artifact_path.clone(),
                    data_path: synced.clone(),
                })?;
            }
            tx.apply(Step::MoveData {
                from: staging,
                to: original.clone(),
            })?;
        } else {
            let warning = format!(
                "data for '{name}' is missing from {}; only the artifact was removed",
                synced.display()
            );
            log::warn!("{warning}");
            warnings.push(warning);
            if slot != ArtifactSlot::Empty {
                tx.apply(Step::RemoveArtifact {
                    kind,
                    artifact_path: artifact_path.clone(),
                    data_path: synced.clone(),
                })?;
            }
        }
        let actions_taken = tx.commit();

        let record = self.store.delete(name)?;
        self.store.save()?;
        log::info!("unlinked '{name}'");

        Ok(RemoveResult {
            record,
            restored_to: data_present.then_some(original),
            warnings,
            actions_taken,
        })
    }
}

const STAGING_ATTEMPTS: u32 = 64;

/// A free sibling of `original` to hold data while the artifact is replaced.
fn staging_path(original: &Path) -> Result<PathBuf> {
    let (Some(parent), Some(file_name)) = (original.parent(), original.file_name()) else {
        return Err(Error::InvalidPath {
            path: original.to_path_buf(),
            reason: "has no parent directory".to_string(),
        });
    };

    let pid = std::process::id();
    for attempt in 0..STAGING_ATTEMPTS {
        let mut staged = OsString::from(".");
        staged.push(file_name);
        staged.push(format!(".linkvault-{pid}-{attempt}"));
        let candidate = parent.join(staged);
        if classify(&candidate).map_err(|e| Error::io(&candidate, e))? == EntryKind::Missing {
            return Ok(candidate);
        }
    }
    Err(Error::ConflictDetected {
        path: original.to_path_buf(),
        details: format!("no free staging entry after {STAGING_ATTEMPTS} attempts"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LinkStore;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_staging_path_is_hidden_sibling() {
        let dir = tempdir().unwrap();
        let original = dir.path().join("notes");

        let staging = staging_path(&original).unwrap();
        assert_eq!(staging.parent(), Some(dir.path()));
        let file_name = staging.file_name().unwrap().to_str().unwrap();
        assert!(file_name.starts_with(".notes.linkvault-"));
    }

    #[test]
    fn test_staging_path_skips_occupied_candidates() {
        let dir = tempdir().unwrap();
        let original = dir.path().join("notes");
        let first = staging_path(&original).unwrap();
        fs::write(&first, "taken").unwrap();

        assert_ne!(staging_path(&original).unwrap(), first);
    }

    #[test]
    fn test_remove_unknown_link() {
        let dir = tempdir().unwrap();
        let store = LinkStore::open(dir.path().join("c.json")).unwrap();
        let err = LinkEngine::new(&store).remove("ghost").unwrap_err();
        assert!(err.is_not_found());
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_restores_directory() {
        use crate::operations::CreateOptions;

        let dir = tempdir().unwrap();
        let store = LinkStore::open(dir.path().join("c.json"))
            .unwrap()
            .with_root_override(Some(dir.path().join("vault")));
        let engine = LinkEngine::new(&store);
        let target = dir.path().join("project");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("main.rs"), "fn main() {}").unwrap();
        engine.create(CreateOptions::new(&target)).unwrap();

        let result = engine.remove("project").unwrap();

        assert_eq!(result.restored_to.as_deref(), Some(target.as_path()));
        assert!(result.warnings.is_empty());
        assert_eq!(classify(&target).unwrap(), EntryKind::Directory);
        assert_eq!(fs::read_to_string(target.join("main.rs")).unwrap(), "fn main() {}");
        assert!(!dir.path().join("vault/project").exists());
        assert!(store.is_empty());
        // no staging leftovers
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".linkvault-"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
