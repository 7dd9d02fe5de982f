//! Symbolic link artifacts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Artifact, ArtifactKind};
use crate::error::{Error, Result};
use crate::path::{classify, remove_entry, EntryKind};

/// Redirects through a filesystem-level symbolic link placed at the original
/// path itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymlinkArtifact;

impl Artifact for SymlinkArtifact {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Symlink
    }

    fn location(&self, original: &Path) -> PathBuf {
        original.to_path_buf()
    }

    fn create(&self, data_path: &Path, artifact_path: &Path) -> Result<()> {
        let is_dir = fs::metadata(data_path).is_ok_and(|m| m.is_dir());
        create_symlink(data_path, artifact_path, is_dir)
            .map_err(|e| Error::io(artifact_path, privilege_error(e)))?;
        log::debug!(
            "created symlink {} -> {}",
            artifact_path.display(),
            data_path.display()
        );
        Ok(())
    }

    fn resolve(&self, artifact_path: &Path) -> Result<PathBuf> {
        fs::read_link(artifact_path).map_err(|e| Error::io(artifact_path, e))
    }

    fn is_valid(&self, artifact_path: &Path) -> bool {
        let is_link =
            fs::symlink_metadata(artifact_path).is_ok_and(|m| m.file_type().is_symlink());
        is_link && fs::metadata(artifact_path).is_ok()
    }

    fn remove(&self, artifact_path: &Path) -> Result<()> {
        match classify(artifact_path).map_err(|e| Error::io(artifact_path, e))? {
            EntryKind::Missing | EntryKind::Symlink => remove_entry(artifact_path),
            other => Err(Error::ConflictDetected {
                path: artifact_path.to_path_buf(),
                details: format!("expected a symbolic link, found {other}"),
            }),
        }
    }
}

/// Create a symbolic link at `link` pointing to `target`.
///
/// `is_dir` selects the directory flavour on platforms that distinguish them.
#[cfg(unix)]
pub(crate) fn create_symlink(target: &Path, link: &Path, _is_dir: bool) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Create a symbolic link at `link` pointing to `target`.
///
/// `is_dir` selects the directory flavour on platforms that distinguish them.
#[cfg(windows)]
pub(crate) fn create_symlink(target: &Path, link: &Path, is_dir: bool) -> io::Result<()> {
    if is_dir {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

#[cfg(windows)]
fn privilege_error(e: io::Error) -> io::Error {
    // ERROR_PRIVILEGE_NOT_HELD: symlinks need Developer Mode or elevation.
    if e.raw_os_error() == Some(1314) {
        io::Error::new(io::ErrorKind::PermissionDenied, e)
    } else {
        e
    }
}

#[cfg(not(windows))]
fn privilege_error(e: io::Error) -> io::Error {
    e
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_resolve_and_validate() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir(&data).unwrap();
        let link = dir.path().join("link");

        let artifact = SymlinkArtifact;
        artifact.create(&data, &link).unwrap();

        assert_eq!(artifact.resolve(&link).unwrap(), data);
        assert!(artifact.is_valid(&link));
        assert_eq!(artifact.location(&link), link);
    }

    #[test]
    fn test_dangling_link_is_invalid() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data.txt");
        fs::write(&data, "x").unwrap();
        let link = dir.path().join("link.txt");

        let artifact = SymlinkArtifact;
        artifact.create(&data, &link).unwrap();
        fs::remove_file(&data).unwrap();

        assert!(!artifact.is_valid(&link));
        // still resolvable, only the target is gone
        assert_eq!(artifact.resolve(&link).unwrap(), data);
    }

    #[test]
    fn test_regular_file_is_not_valid() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, "x").unwrap();
        assert!(!SymlinkArtifact.is_valid(&file));
    }

    #[test]
    fn test_remove_refuses_regular_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, "x").unwrap();

        let err = SymlinkArtifact.remove(&file).unwrap_err();
        assert!(matches!(err, Error::ConflictDetected { .. }));
        assert!(file.exists());
    }

    #[test]
    fn test_remove_link_keeps_target() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("inner.txt"), "keep").unwrap();
        let link = dir.path().join("link");

        SymlinkArtifact.create(&data, &link).unwrap();
        SymlinkArtifact.remove(&link).unwrap();

        assert_eq!(classify(&link).unwrap(), EntryKind::Missing);
        assert_eq!(fs::read_to_string(data.join("inner.txt")).unwrap(), "keep");
    }
}
