//! The lifecycle engine shared by every operation.

use std::path::{Path, PathBuf};

use crate::artifact::{Artifact, ArtifactKind, ArtifactRegistry};
use crate::error::{Error, Result};
use crate::path::{abs_path, classify, EntryKind};
use crate::store::{LinkRecord, LinkStore};

/// Runs link lifecycle operations against a [`LinkStore`].
///
/// The engine borrows the store and owns the [`ArtifactRegistry`] used to
/// create and inspect redirection artifacts. Operations live in the sibling
/// modules: [`create`](LinkEngine::create), [`remove`](LinkEngine::remove),
/// [`repair`](LinkEngine::repair), [`status`](LinkEngine::status),
/// [`list`](LinkEngine::list) and the batch variants.
///
/// # Examples
///
/// ```
/// use linkvault::{LinkEngine, LinkStore};
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = LinkStore::open(dir.path().join("linkvault.json")).unwrap();
/// let engine = LinkEngine::new(&store);
/// assert!(engine.list().is_empty());
/// ```
#[derive(Debug)]
pub struct LinkEngine<'a> {
    pub(crate) store: &'a LinkStore,
    pub(crate) artifacts: ArtifactRegistry,
}

impl<'a> LinkEngine<'a> {
    /// Creates an engine with the platform's native artifacts.
    #[must_use]
    pub fn new(store: &'a LinkStore) -> Self {
        Self {
            store,
            artifacts: ArtifactRegistry::native(),
        }
    }

    /// Replace the artifact registry.
    #[must_use]
    pub fn with_artifacts(mut self, artifacts: ArtifactRegistry) -> Self {
        self.artifacts = artifacts;
        self
    }

    pub(crate) fn record(&self, name: &str) -> Result<LinkRecord> {
        self.store.get(name).ok_or_else(|| Error::NotFound {
            resource: format!("link '{name}'"),
        })
    }

    /// Inspect what occupies a record's artifact location.
    ///
    /// An artifact of the recorded kind that redirects to an existing path
    /// other than the record's synced path belongs to someone else, as does
    /// anything that is not an artifact of that kind. A dangling or
    /// unreadable artifact of the recorded kind is stale.
    pub(crate) fn inspect_slot(
        &self,
        record: &LinkRecord,
        artifact: &dyn Artifact,
    ) -> Result<ArtifactSlot> {
        let location = artifact.location(record.original_path());
        let entry = classify(&location).map_err(|e| Error::io(&location, e))?;

        if entry == EntryKind::Missing {
            return Ok(ArtifactSlot::Empty);
        }

        let expected = match record.artifact_kind() {
            ArtifactKind::Symlink => EntryKind::Symlink,
            ArtifactKind::Shortcut => EntryKind::Shortcut,
        };
        if entry != expected {
            return Err(Error::ConflictDetected {
                path: location,
                details: format!(
                    "expected a {} for link '{}', found {entry}",
                    record.artifact_kind(),
                    record.name()
                ),
            });
        }

        match artifact.resolve(&location) {
            Ok(target) if points_to(&location, &target, record.synced_path()) => {
                Ok(ArtifactSlot::Ours)
            }
            Ok(target) if !artifact.is_valid(&location) => {
                log::debug!(
                    "dangling artifact at {} points to {}",
                    location.display(),
                    target.display()
                );
                Ok(ArtifactSlot::Stale)
            }
            Ok(target) => Err(Error::ConflictDetected {
                path: location,
                details: format!(
                    "points to {} instead of {}",
                    target.display(),
                    record.synced_path().display()
                ),
            }),
            Err(e) => {
                log::debug!("unreadable artifact at {}: {e}", location.display());
                Ok(ArtifactSlot::Stale)
            }
        }
    }
}

/// What occupies a record's artifact location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArtifactSlot {
    /// Nothing.
    Empty,
    /// An artifact of the recorded kind redirecting to the synced path.
    Ours,
    /// An artifact of the recorded kind that cannot be read or whose target
    /// is gone.
    Stale,
}

/// Whether `target`, read from the artifact at `artifact_path`, designates
/// `expected`. Relative targets are resolved against the artifact's parent.
pub(crate) fn points_to(artifact_path: &Path, target: &Path, expected: &Path) -> bool {
    let joined: PathBuf = if target.is_absolute() {
        target.to_path_buf()
    } else {
        artifact_path
            .parent()
            .map_or_else(|| target.to_path_buf(), |parent| parent.join(target))
    };
    match (abs_path(&joined), abs_path(expected)) {
        (Ok(a), Ok(b)) => a == b,
        _ => joined == expected,
    }
}
