//! Create: relocate a path into the storage root and leave an artifact.

use std::fs;
use std::path::{Path, PathBuf};

use crate::artifact::ArtifactKind;
use crate::error::{Error, Result};
use crate::path::{abs_path, classify, EntryKind};
use crate::store::{synced_path_for, validate_name, LinkRecord, FILES_DIR};

use super::engine::{points_to, LinkEngine};
use super::transaction::{Step, Transaction};

/// Options for a create operation.
#[derive(Debug, Clone)]
pub struct CreateOptions {
    /// The file or directory to relocate.
    pub target: PathBuf,

    /// Link name. Defaults to the target's file name.
    pub name: Option<String>,

    /// Leave a shortcut file instead of a symbolic link.
    pub shortcut: bool,
}

impl CreateOptions {
    /// Creates options for relocating `target` behind a symbolic link named
    /// after it.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkvault::operations::CreateOptions;
    ///
    /// let options = CreateOptions::new("/home/user/notes")
    ///     .with_name(Some("work-notes".to_string()));
    /// assert_eq!(options.name.as_deref(), Some("work-notes"));
    /// assert!(!options.shortcut);
    /// ```
    #[must_use]
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            name: None,
            shortcut: false,
        }
    }

    /// Sets the link name.
    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Sets whether a shortcut file is used instead of a symbolic link.
    #[must_use]
    pub const fn with_shortcut(mut self, shortcut: bool) -> Self {
        self.shortcut = shortcut;
        self
    }

    const fn artifact_kind(&self) -> ArtifactKind {
        if self.shortcut {
            ArtifactKind::Shortcut
        } else {
            ArtifactKind::Symlink
        }
    }
}

/// Outcome of a successful create.
#[derive(Debug, Clone)]
pub struct CreateResult {
    /// The stored record.
    pub record: LinkRecord,

    /// Where the artifact was written.
    pub artifact_path: PathBuf,

    /// Descriptions of the filesystem steps performed.
    pub actions_taken: Vec<String>,
}

impl LinkEngine<'_> {
    /// Relocate `options.target` into the storage root and leave an artifact
    /// at its original location.
    ///
    /// All checks run before the filesystem is touched. If the artifact
    /// cannot be created the data is moved back. If the record cannot be
    /// stored, both filesystem steps are undone.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the target does not exist
    /// - [`Error::AlreadyManaged`] if the target is already linked, or is an
    ///   artifact pointing into the storage root
    /// - [`Error::DuplicateName`] if the link name is taken
    /// - [`Error::ConflictDetected`] if the synced path or the artifact
    ///   location is occupied
    /// - [`Error::UnsupportedPlatform`] if a shortcut is requested but no
    ///   shortcut writer is registered
    /// - [`Error::RolledBack`] / [`Error::PartialFailure`] if a step failed
    ///   after the data was moved
    /// - [`Error::Persistence`] if the configuration could not be saved; the
    ///   link itself is in place
    pub fn create(&self, options: CreateOptions) -> Result<CreateResult> {
        let kind = options.artifact_kind();
        let artifact = self.artifacts.get(kind)?;

        let target = abs_path(&options.target)?;
        let entry = classify(&target).map_err(|e| Error::io(&target, e))?;
        if entry == EntryKind::Missing {
            return Err(Error::NotFound {
                resource: target.display().to_string(),
            });
        }

        if let Some(existing) = self.store.find_by_original(&target) {
            return Err(Error::AlreadyManaged {
                path: target,
                name: existing.name().to_string(),
            });
        }

        let root = abs_path(&self.store.sync_root())?;
        self.check_not_managed_artifact(&target, entry, &root)?;
        if target.starts_with(&root) || root.starts_with(&target) {
            return Err(Error::InvalidPath {
                path: target,
                reason: format!("overlaps the storage root {}", root.display()),
            });
        }

        let name = match options.name {
            Some(name) => name,
            None => default_name(&target)?,
        };
        validate_name(&name)?;
        if self.store.get(&name).is_some() {
            return Err(Error::DuplicateName { name });
        }

        let is_directory = entry == EntryKind::Directory;
        if is_directory && name == FILES_DIR {
            return Err(Error::Validation {
                field: "name".to_string(),
                message: format!("'{FILES_DIR}' is reserved for file links"),
            });
        }
        let synced = synced_path_for(&root, &name, is_directory);
        let occupant = classify(&synced).map_err(|e| Error::io(&synced, e))?;
        if occupant != EntryKind::Missing {
            return Err(Error::ConflictDetected {
                path: synced,
                details: format!("storage location already holds {occupant}"),
            });
        }

        let artifact_path = artifact.location(&target);
        if artifact_path != target {
            let occupant =
                classify(&artifact_path).map_err(|e| Error::io(&artifact_path, e))?;
            if occupant != EntryKind::Missing {
                return Err(Error::ConflictDetected {
                    path: artifact_path,
                    details: format!("artifact location already holds {occupant}"),
                });
            }
        }

        let record = LinkRecord::new(&name, target.clone(), synced.clone(), kind, is_directory)?;

        let mut tx = Transaction::new(&name, &self.artifacts, &target);
        tx.apply(Step::MoveData {
            from: target.clone(),
            to: synced.clone(),
        })?;
        tx.apply(Step::CreateArtifact {
            kind,
            artifact_path: artifact_path.clone(),
            data_path: synced,
        })?;

        if let Err(e) = self.store.put(record.clone()) {
            return Err(tx.rollback(e));
        }
        let actions_taken = tx.commit();

        log::info!(
            "linked '{name}': {} -> {}",
            artifact_path.display(),
            record.synced_path().display()
        );
        self.store.save()?;

        Ok(CreateResult {
            record,
            artifact_path,
            actions_taken,
        })
    }

    /// Fails if `target` is an artifact redirecting into the storage root.
    fn check_not_managed_artifact(
        &self,
        target: &Path,
        entry: EntryKind,
        root: &Path,
    ) -> Result<()> {
        if !entry.is_artifact() {
            return Ok(());
        }
        let resolved = match entry {
            EntryKind::Symlink => fs::read_link(target).ok(),
            EntryKind::Shortcut => self
                .artifacts
                .get(ArtifactKind::Shortcut)
                .ok()
                .and_then(|artifact| artifact.resolve(target).ok()),
            _ => None,
        };
        let Some(resolved) = resolved else {
            return Ok(());
        };

        let owner = self
            .store
            .get_all()
            .into_iter()
            .find(|record| points_to(target, &resolved, record.synced_path()));
        let anchored = match target.parent() {
            Some(parent) if resolved.is_relative() => parent.join(&resolved),
            _ => resolved.clone(),
        };
        let inside_root = abs_path(&anchored).is_ok_and(|p| p.starts_with(root));

        match owner {
            Some(record) => Err(Error::AlreadyManaged {
                path: target.to_path_buf(),
                name: record.name().to_string(),
            }),
            None if inside_root => Err(Error::AlreadyManaged {
                path: target.to_path_buf(),
                name: resolved
                    .file_name()
                    .map_or_else(String::new, |n| n.to_string_lossy().into_owned()),
            }),
            None => Ok(()),
        }
    }
}

fn default_name(target: &Path) -> Result<String> {
    target
        .file_name()
        .and_then(|n| n.to_str())
        .map(ToString::to_string)
        .ok_or_else(|| Error::InvalidPath {
            path: target.to_path_buf(),
            reason: "cannot derive a link name; pass one explicitly".to_string(),
        })
}
