//! Common test utilities for integration tests.
//!
//! This module provides a temporary store fixture plus artifact
//! implementations that stand in for platform plumbing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use linkvault::artifact::{Artifact, ArtifactKind, ArtifactRegistry};
use linkvault::{Error, LinkEngine, LinkStore, Result, ShortcutProvider};
use tempfile::TempDir;

/// A store backed by a temporary directory, with the storage root at
/// `<tmp>/vault`.
pub struct Fixture {
    /// Temporary directory (kept alive for the duration of the test)
    pub dir: TempDir,
    /// The store under test
    pub store: LinkStore,
}

#[allow(dead_code)]
impl Fixture {
    /// Creates a fresh, empty fixture.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = open_store(dir.path());
        Self { dir, store }
    }

    /// The storage root.
    pub fn root(&self) -> PathBuf {
        self.dir.path().join("vault")
    }

    /// The configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("linkvault.json")
    }

    /// An engine with the native artifact registry.
    pub fn engine(&self) -> LinkEngine<'_> {
        LinkEngine::new(&self.store)
    }

    /// An engine that writes text-file shortcuts.
    pub fn shortcut_engine(&self) -> LinkEngine<'_> {
        LinkEngine::new(&self.store)
            .with_artifacts(ArtifactRegistry::native().with_shortcut_provider(FileShortcutProvider))
    }

    /// A second store reading the same configuration file.
    pub fn reopen(&self) -> LinkStore {
        open_store(self.dir.path())
    }

    /// Creates a directory holding one file named after it.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join("home").join(name);
        fs::create_dir_all(&path).expect("Failed to create test directory");
        fs::write(path.join("content.txt"), name).expect("Failed to write test file");
        path
    }

    /// Creates a regular file.
    pub fn create_file(&self, name: &str, contents: &str) -> PathBuf {
        let home = self.dir.path().join("home");
        fs::create_dir_all(&home).expect("Failed to create home directory");
        let path = home.join(name);
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

fn open_store(dir: &Path) -> LinkStore {
    LinkStore::open(dir.join("linkvault.json"))
        .expect("Failed to open store")
        .with_root_override(Some(dir.join("vault")))
}

/// Writes shortcut files as plain text holding the target path.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub struct FileShortcutProvider;

impl ShortcutProvider for FileShortcutProvider {
    fn create_shortcut(&self, target: &Path, shortcut: &Path) -> io::Result<()> {
        fs::write(shortcut, target.display().to_string())
    }

    fn resolve_shortcut(&self, shortcut: &Path) -> io::Result<PathBuf> {
        fs::read_to_string(shortcut).map(PathBuf::from)
    }
}

/// A symlink artifact the environment never allows to be created.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub struct DeniedSymlink;

impl Artifact for DeniedSymlink {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Symlink
    }

    fn location(&self, original: &Path) -> PathBuf {
        original.to_path_buf()
    }

    fn create(&self, _data_path: &Path, artifact_path: &Path) -> Result<()> {
        Err(Error::PermissionDenied {
            path: artifact_path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "symlinks disabled"),
        })
    }

    fn resolve(&self, artifact_path: &Path) -> Result<PathBuf> {
        Err(Error::NotFound {
            resource: artifact_path.display().to_string(),
        })
    }

    fn is_valid(&self, _artifact_path: &Path) -> bool {
        false
    }

    fn remove(&self, _artifact_path: &Path) -> Result<()> {
        Ok(())
    }
}
