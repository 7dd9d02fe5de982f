//! Multi-step filesystem transactions with reverse-order rollback.

use std::path::{Path, PathBuf};

use crate::artifact::{ArtifactKind, ArtifactRegistry};
use crate::error::{Error, Result};
use crate::path::atomic_move;

/// A single reversible filesystem step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Move the managed data from one location to another.
    MoveData {
        /// Current location.
        from: PathBuf,
        /// New location.
        to: PathBuf,
    },

    /// Place an artifact redirecting to `data_path`.
    CreateArtifact {
        /// Artifact variant.
        kind: ArtifactKind,
        /// Where the artifact is written.
        artifact_path: PathBuf,
        /// What it redirects to.
        data_path: PathBuf,
    },

    /// Remove an artifact that redirects to `data_path`.
    RemoveArtifact {
        /// Artifact variant.
        kind: ArtifactKind,
        /// The artifact to remove.
        artifact_path: PathBuf,
        /// What it redirects to, needed to recreate it on rollback.
        data_path: PathBuf,
    },
}

impl Step {
    /// Returns a human-readable description of this step.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::MoveData { from, to } => {
                format!("Move {} to {}", from.display(), to.display())
            }
            Self::CreateArtifact {
                kind,
                artifact_path,
                data_path,
            } => format!(
                "Create {kind} {} -> {}",
                artifact_path.display(),
                data_path.display()
            ),
            Self::RemoveArtifact {
                kind,
                artifact_path,
                ..
            } => format!("Remove {kind} {}", artifact_path.display()),
        }
    }
}

/// Applies [`Step`]s in order and undoes the committed ones on failure.
pub(crate) struct Transaction<'a> {
    name: String,
    artifacts: &'a ArtifactRegistry,
    committed: Vec<Step>,
    data_location: PathBuf,
}

impl<'a> Transaction<'a> {
    /// Start a transaction for link `name` whose data currently lives at
    /// `data_location`.
    pub(crate) fn new(
        name: impl Into<String>,
        artifacts: &'a ArtifactRegistry,
        data_location: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            artifacts,
            committed: Vec::new(),
            data_location: data_location.into(),
        }
    }

    /// Run `step`. On failure every previously committed step is undone and
    /// the resulting error returned (see [`Transaction::rollback`]).
    pub(crate) fn apply(&mut self, step: Step) -> Result<()> {
        log::debug!("[{}] {}", self.name, step.description());
        match self.forward(&step) {
            Ok(()) => {
                self.committed.push(step);
                Ok(())
            }
            Err(e) => Err(self.rollback(e)),
        }
    }

    /// Undo all committed steps, newest first.
    ///
    /// With nothing committed, `cause` is returned unchanged. Otherwise a
    /// complete rollback yields [`Error::RolledBack`] and a failed one yields
    /// [`Error::PartialFailure`] naming where the data currently is.
    pub(crate) fn rollback(&mut self, cause: Error) -> Error {
        if self.committed.is_empty() {
            return cause;
        }

        log::warn!("[{}] {cause}; rolling back", self.name);
        while let Some(step) = self.committed.pop() {
            if let Err(rollback) = self.backward(&step) {
                log::error!(
                    "[{}] rollback of '{}' failed: {rollback}",
                    self.name,
                    step.description()
                );
                return Error::PartialFailure {
                    name: self.name.clone(),
                    surviving_copy: self.data_location.clone(),
                    source: Box::new(cause),
                    rollback: Box::new(rollback),
                };
            }
        }

        log::info!("[{}] rolled back", self.name);
        Error::RolledBack {
            source: Box::new(cause),
        }
    }

    /// Finish the transaction, returning descriptions of the applied steps.
    pub(crate) fn commit(self) -> Vec<String> {
        self.committed.iter().map(Step::description).collect()
    }

    fn forward(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::MoveData { from, to } => self.move_data(from, to),
            Step::CreateArtifact {
                kind,
                artifact_path,
                data_path,
            } => self.artifacts.get(*kind)?.create(data_path, artifact_path),
            Step::RemoveArtifact {
                kind,
                artifact_path,
                ..
            } => self.artifacts.get(*kind)?.remove(artifact_path),
        }
    }

    fn backward(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::MoveData { from, to } => self.move_data(to, from),
            Step::CreateArtifact {
                kind,
                artifact_path,
                ..
            } => self.artifacts.get(*kind)?.remove(artifact_path),
            Step::RemoveArtifact {
                kind,
                artifact_path,
                data_path,
            } => self.artifacts.get(*kind)?.create(data_path, artifact_path),
        }
    }

    fn move_data(&mut self, from: &Path, to: &Path) -> Result<()> {
        atomic_move(from, to)?;
        self.data_location = to.to_path_buf();
        Ok(())
    }
}
