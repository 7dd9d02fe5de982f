//! Repair: recreate a missing or broken artifact for an existing link.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::path::{classify, EntryKind};

use super::engine::{ArtifactSlot, LinkEngine};
use super::status::LinkState;

/// Outcome of a successful repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    /// The link was healthy; nothing was touched.
    AlreadyLinked,

    /// The artifact was recreated.
    Repaired {
        /// Where the new artifact lives.
        artifact_path: PathBuf,
    },
}

impl fmt::Display for RepairOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyLinked => write!(f, "already linked"),
            Self::Repaired { artifact_path } => {
                write!(f, "recreated artifact at {}", artifact_path.display())
            }
        }
    }
}

impl LinkEngine<'_> {
    /// Make a link healthy again by recreating its artifact.
    ///
    /// A healthy link is left alone. Repair never writes the configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if there is no link named `name`
    /// - [`Error::DataLost`] if the synced data is gone
    /// - [`Error::ConflictDetected`] if the artifact location holds something
    ///   other than this link's artifact
    pub fn repair(&self, name: &str) -> Result<RepairOutcome> {
        let record = self.record(name)?;
        if self.probe(&record) == LinkState::Linked {
            log::debug!("'{name}' is already linked");
            return Ok(RepairOutcome::AlreadyLinked);
        }

        let synced = record.synced_path();
        if classify(synced).map_err(|e| Error::io(synced, e))? == EntryKind::Missing {
            return Err(Error::DataLost {
                name: name.to_string(),
                synced_path: synced.to_path_buf(),
            });
        }

        let artifact = self.artifacts.get(record.artifact_kind())?;
        let artifact_path = artifact.location(record.original_path());
        if self.inspect_slot(&record, artifact)? != ArtifactSlot::Empty {
            artifact.remove(&artifact_path)?;
        }
        artifact.create(synced, &artifact_path)?;

        log::info!("repaired '{name}' at {}", artifact_path.display());
        Ok(RepairOutcome::Repaired { artifact_path })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::operations::CreateOptions;
    use crate::store::LinkStore;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_repair_outcome_display() {
        assert_eq!(RepairOutcome::AlreadyLinked.to_string(), "already linked");
    }

    #[test]
    fn test_repair_recreates_deleted_symlink() {
        let dir = tempdir().unwrap();
        let store = LinkStore::open(dir.path().join("c.json"))
            .unwrap()
            .with_root_override(Some(dir.path().join("vault")));
        let engine = LinkEngine::new(&store);
        let target = dir.path().join("notes.txt");
        fs::write(&target, "body").unwrap();
        engine.create(CreateOptions::new(&target)).unwrap();

        assert_eq!(engine.repair("notes.txt").unwrap(), RepairOutcome::AlreadyLinked);

        fs::remove_file(&target).unwrap();
        let outcome = engine.repair("notes.txt").unwrap();
        assert_eq!(
            outcome,
            RepairOutcome::Repaired {
                artifact_path: target.clone()
            }
        );
        assert_eq!(fs::read_to_string(&target).unwrap(), "body");
    }

    #[test]
    fn test_repair_refuses_to_overwrite_user_file() {
        let dir = tempdir().unwrap();
        let store = LinkStore::open(dir.path().join("c.json"))
            .unwrap()
            .with_root_override(Some(dir.path().join("vault")));
        let engine = LinkEngine::new(&store);
        let target = dir.path().join("notes.txt");
        fs::write(&target, "body").unwrap();
        engine.create(CreateOptions::new(&target)).unwrap();

        fs::remove_file(&target).unwrap();
        fs::write(&target, "user content").unwrap();

        let err = engine.repair("notes.txt").unwrap_err();
        assert!(matches!(err, Error::ConflictDetected { .. }));
        assert_eq!(fs::read_to_string(&target).unwrap(), "user content");
    }
}
