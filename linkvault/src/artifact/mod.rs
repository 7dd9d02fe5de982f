//! Redirection artifacts.
//!
//! A redirection artifact is what sits at a managed item's original location
//! once its data has been relocated: a symbolic link, or a native shortcut
//! file where symlinks are unavailable. Both variants implement [`Artifact`];
//! the lifecycle engine never branches on the variant itself but asks an
//! [`ArtifactRegistry`] for the implementation matching a record's
//! [`ArtifactKind`].
//!
//! # Examples
//!
//! ```
//! use linkvault::artifact::{ArtifactKind, ArtifactRegistry};
//!
//! let registry = ArtifactRegistry::native();
//! assert!(registry.get(ArtifactKind::Symlink).is_ok());
//! // No native shortcut writer is registered by default.
//! assert!(registry.get(ArtifactKind::Shortcut).is_err());
//! ```

pub mod shortcut;
pub mod symlink;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use shortcut::{ShortcutArtifact, ShortcutProvider};
pub use symlink::SymlinkArtifact;

/// The two redirection artifact variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// A filesystem-level symbolic link.
    Symlink,
    /// A native shortcut file.
    Shortcut,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symlink => write!(f, "symlink"),
            Self::Shortcut => write!(f, "shortcut"),
        }
    }
}

/// Capability set shared by both artifact variants.
#[cfg_attr(test, mockall::automock)]
pub trait Artifact: Send + Sync {
    /// The variant this implementation handles.
    fn kind(&self) -> ArtifactKind;

    /// Where the artifact for a managed item at `original` lives on disk.
    fn location(&self, original: &Path) -> PathBuf;

    /// Create an artifact at `artifact_path` redirecting to `data_path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PermissionDenied`] when the environment forbids
    /// creating this artifact kind, or another error if creation fails.
    fn create(&self, data_path: &Path, artifact_path: &Path) -> Result<()>;

    /// Read the target recorded in the artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact is absent or unreadable.
    fn resolve(&self, artifact_path: &Path) -> Result<PathBuf>;

    /// Whether the artifact exists and its target is reachable.
    fn is_valid(&self, artifact_path: &Path) -> bool;

    /// Remove the artifact, refusing to touch anything that is not one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConflictDetected`] if the path holds something other
    /// than this artifact kind, or an I/O error if removal fails.
    fn remove(&self, artifact_path: &Path) -> Result<()>;
}

/// Selects the [`Artifact`] implementation for an [`ArtifactKind`].
pub struct ArtifactRegistry {
    symlink: Box<dyn Artifact>,
    shortcut: Option<Box<dyn Artifact>>,
}

impl ArtifactRegistry {
    /// A registry with the platform symlink implementation and no shortcut
    /// writer.
    #[must_use]
    pub fn native() -> Self {
        Self {
            symlink: Box::new(SymlinkArtifact),
            shortcut: None,
        }
    }

    /// Replace the symlink implementation.
    #[must_use]
    pub fn with_symlink(mut self, artifact: Box<dyn Artifact>) -> Self {
        debug_assert_eq!(artifact.kind(), ArtifactKind::Symlink);
        self.symlink = artifact;
        self
    }

    /// Register a shortcut implementation.
    #[must_use]
    pub fn with_shortcut(mut self, artifact: Box<dyn Artifact>) -> Self {
        debug_assert_eq!(artifact.kind(), ArtifactKind::Shortcut);
        self.shortcut = Some(artifact);
        self
    }

    /// Register a native shortcut writer.
    #[must_use]
    pub fn with_shortcut_provider<P>(self, provider: P) -> Self
    where
        P: ShortcutProvider + 'static,
    {
        self.with_shortcut(Box::new(ShortcutArtifact::new(provider)))
    }

    /// The implementation for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] when `kind` is
    /// [`ArtifactKind::Shortcut`] and no shortcut writer is registered.
    pub fn get(&self, kind: ArtifactKind) -> Result<&dyn Artifact> {
        match kind {
            ArtifactKind::Symlink => Ok(self.symlink.as_ref()),
            ArtifactKind::Shortcut => {
                self.shortcut
                    .as_deref()
                    .ok_or_else(|| Error::UnsupportedPlatform {
                        feature: "shortcut files".to_string(),
                    })
            }
        }
    }
}

impl Default for ArtifactRegistry {
    fn default() -> Self {
        Self::native()
    }
}

impl fmt::Debug for ArtifactRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactRegistry")
            .field("shortcut", &self.shortcut.is_some())
            .finish_non_exhaustive()
    }
}
