//! Shortcut file artifacts.
//!
//! Writing and reading native shortcut files is platform plumbing supplied by
//! the host application through [`ShortcutProvider`]. This module only adds
//! the lifecycle rules around it: where the file lives, when it counts as
//! valid, and what may be removed.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use super::{Artifact, ArtifactKind};
use crate::error::{Error, Result};
use crate::path::{classify, remove_entry, EntryKind, SHORTCUT_EXTENSION};

/// Native shortcut file writer.
#[cfg_attr(test, mockall::automock)]
pub trait ShortcutProvider: Send + Sync {
    /// Write a shortcut file at `shortcut` that opens `target`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the file cannot be written.
    fn create_shortcut(&self, target: &Path, shortcut: &Path) -> io::Result<()>;

    /// Read the target stored in the shortcut file at `shortcut`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the file is missing or malformed.
    fn resolve_shortcut(&self, shortcut: &Path) -> io::Result<PathBuf>;
}

/// Redirects through a shortcut file written next to the original path, with
/// the shortcut extension appended to its name.
#[derive(Debug)]
pub struct ShortcutArtifact<P> {
    provider: P,
}

impl<P: ShortcutProvider> ShortcutArtifact<P> {
    /// Wrap a native shortcut writer.
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: ShortcutProvider> Artifact for ShortcutArtifact<P> {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Shortcut
    }

    fn location(&self, original: &Path) -> PathBuf {
        let mut name = OsString::from(original.as_os_str());
        name.push(".");
        name.push(SHORTCUT_EXTENSION);
        PathBuf::from(name)
    }

    fn create(&self, data_path: &Path, artifact_path: &Path) -> Result<()> {
        self.provider
            .create_shortcut(data_path, artifact_path)
            .map_err(|e| Error::io(artifact_path, e))?;
        log::debug!(
            "created shortcut {} -> {}",
            artifact_path.display(),
            data_path.display()
        );
        Ok(())
    }

    fn resolve(&self, artifact_path: &Path) -> Result<PathBuf> {
        self.provider
            .resolve_shortcut(artifact_path)
            .map_err(|e| Error::io(artifact_path, e))
    }

    fn is_valid(&self, artifact_path: &Path) -> bool {
        if !matches!(classify(artifact_path), Ok(EntryKind::Shortcut)) {
            return false;
        }
        self.provider
            .resolve_shortcut(artifact_path)
            .is_ok_and(|target| target.exists())
    }

    fn remove(&self, artifact_path: &Path) -> Result<()> {
        match classify(artifact_path).map_err(|e| Error::io(artifact_path, e))? {
            EntryKind::Missing | EntryKind::Shortcut => remove_entry(artifact_path),
            other => Err(Error::ConflictDetected {
                path: artifact_path.to_path_buf(),
                details: format!("expected a shortcut file, found {other}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_location_appends_extension() {
        let artifact = ShortcutArtifact::new(MockShortcutProvider::new());
        assert_eq!(
            artifact.location(Path::new("/home/user/notes")),
            PathBuf::from("/home/user/notes.lnk")
        );
    }

    #[test]
    fn test_create_delegates_to_provider() {
        let mut provider = MockShortcutProvider::new();
        provider
            .expect_create_shortcut()
            .withf(|target, shortcut| {
                target.to_str() == Some("/sync/notes")
                    && shortcut.to_str() == Some("/home/notes.lnk")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let artifact = ShortcutArtifact::new(provider);
        artifact
            .create(Path::new("/sync/notes"), Path::new("/home/notes.lnk"))
            .unwrap();
    }

    #[test]
    fn test_create_maps_permission_errors() {
        let mut provider = MockShortcutProvider::new();
        provider
            .expect_create_shortcut()
            .returning(|_, _| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));

        let artifact = ShortcutArtifact::new(provider);
        let err = artifact
            .create(Path::new("/sync/notes"), Path::new("/home/notes.lnk"))
            .unwrap_err();
        assert!(err.is_permission_denied());
    }

    #[test]
    fn test_is_valid_requires_reachable_target() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir(&data).unwrap();
        let shortcut = dir.path().join("notes.lnk");
        fs::write(&shortcut, "opaque").unwrap();

        let target = data.clone();
        let mut provider = MockShortcutProvider::new();
        provider
            .expect_resolve_shortcut()
            .returning(move |_| Ok(target.clone()));
        let artifact = ShortcutArtifact::new(provider);

        assert!(artifact.is_valid(&shortcut));
        fs::remove_dir(&data).unwrap();
        assert!(!artifact.is_valid(&shortcut));
    }

    #[test]
    fn test_remove_refuses_directories() {
        let dir = tempdir().unwrap();
        let occupied = dir.path().join("notes.lnk");
        fs::create_dir(&occupied).unwrap();

        let artifact = ShortcutArtifact::new(MockShortcutProvider::new());
        let err = artifact.remove(&occupied).unwrap_err();
        assert!(matches!(err, Error::ConflictDetected { .. }));
        assert!(occupied.exists());
    }
}
