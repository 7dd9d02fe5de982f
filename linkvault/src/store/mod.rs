//! Link record store.
//!
//! [`LinkStore`] holds the in-memory [`Configuration`] behind a
//! reader-writer lock and writes it back to its JSON file on [`LinkStore::save`].
//! It is passed explicitly to the lifecycle engine; there is no global store.
//!
//! # Examples
//!
//! ```
//! use linkvault::{ArtifactKind, LinkRecord, LinkStore};
//! use std::path::PathBuf;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = LinkStore::open(dir.path().join("linkvault.json")).unwrap();
//!
//! let record = LinkRecord::new(
//!     "notes",
//!     PathBuf::from("/home/user/notes"),
//!     PathBuf::from("/sync/notes"),
//!     ArtifactKind::Symlink,
//!     true,
//! )
//! .unwrap();
//! store.put(record).unwrap();
//! store.save().unwrap();
//!
//! let reopened = LinkStore::open(store.path()).unwrap();
//! assert!(reopened.get("notes").is_some());
//! ```

pub mod persist;
pub mod record;

use std::env;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::{Error, Result};

pub use persist::CURRENT_VERSION;
pub use record::{
    default_sync_root, synced_path_for, validate_name, Configuration, LinkRecord, FILES_DIR,
};

/// Default configuration file name, placed next to the executable.
pub const CONFIG_FILE_NAME: &str = "linkvault.json";

/// Returns the default configuration file path.
///
/// # Errors
///
/// Returns an error if the executable's location cannot be determined.
pub fn default_config_path() -> Result<PathBuf> {
    let exe = env::current_exe().map_err(|e| Error::io("<current executable>", e))?;
    let dir = exe.parent().ok_or_else(|| Error::InvalidPath {
        path: exe.clone(),
        reason: "executable has no parent directory".to_string(),
    })?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// The persistent mapping from link names to [`LinkRecord`]s.
#[derive(Debug)]
pub struct LinkStore {
    path: PathBuf,
    root_override: Option<PathBuf>,
    state: RwLock<Configuration>,
}

impl LinkStore {
    /// Load the store from `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// declares an unsupported version.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config = persist::load(&path)?;
        log::debug!(
            "opened store {} with {} link(s)",
            path.display(),
            config.links.len()
        );
        Ok(Self {
            path,
            root_override: None,
            state: RwLock::new(config),
        })
    }

    /// Load the store from [`default_config_path`].
    ///
    /// # Errors
    ///
    /// See [`LinkStore::open`] and [`default_config_path`].
    pub fn open_default() -> Result<Self> {
        Self::open(default_config_path()?)
    }

    /// Use `root` as the storage root for this process without persisting it.
    #[must_use]
    pub fn with_root_override(mut self, root: Option<PathBuf>) -> Self {
        self.root_override = root;
        self
    }

    /// The configuration file backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The effective storage root.
    #[must_use]
    pub fn sync_root(&self) -> PathBuf {
        self.root_override
            .clone()
            .unwrap_or_else(|| self.state.read().sync_root.clone())
    }

    /// The storage root as stored in the configuration, ignoring any override.
    #[must_use]
    pub fn configured_sync_root(&self) -> PathBuf {
        self.state.read().sync_root.clone()
    }

    /// Change the persisted storage root. Takes effect on the next [`save`].
    ///
    /// Existing records keep their synced paths.
    ///
    /// [`save`]: LinkStore::save
    pub fn set_sync_root(&self, root: PathBuf) {
        self.state.write().sync_root = root;
    }

    /// The record named `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<LinkRecord> {
        self.state.read().links.get(name).cloned()
    }

    /// Every record, sorted by name.
    #[must_use]
    pub fn get_all(&self) -> Vec<LinkRecord> {
        self.state.read().links.values().cloned().collect()
    }

    /// The record whose original path is `original`, if any.
    #[must_use]
    pub fn find_by_original(&self, original: &Path) -> Option<LinkRecord> {
        self.state
            .read()
            .links
            .values()
            .find(|record| record.original_path() == original)
            .cloned()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().links.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().links.is_empty()
    }

    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if a record with the same name exists.
    pub fn put(&self, record: LinkRecord) -> Result<()> {
        let mut state = self.state.write();
        if state.links.contains_key(record.name()) {
            return Err(Error::DuplicateName {
                name: record.name().to_string(),
            });
        }
        state.links.insert(record.name().to_string(), record);
        Ok(())
    }

    /// Remove and return the record named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no such record.
    pub fn delete(&self, name: &str) -> Result<LinkRecord> {
        self.state
            .write()
            .links
            .remove(name)
            .ok_or_else(|| Error::NotFound {
                resource: format!("link '{name}'"),
            })
    }

    /// Write the current state to the configuration file.
    ///
    /// The write lock is held for the duration so no mutation interleaves
    /// with the snapshot being written. On failure the in-memory state is
    /// kept as is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let state = self.state.write();
        persist::write(&self.path, &state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactKind;
    use std::sync::Arc;
    use std::thread;
    use tempfile::tempdir;

    fn record(name: &str, original: &str) -> LinkRecord {
        LinkRecord::new(
            name,
            PathBuf::from(original),
            PathBuf::from("/sync").join(name),
            ArtifactKind::Symlink,
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_put_rejects_duplicate_names() {
        let dir = tempdir().unwrap();
        let store = LinkStore::open(dir.path().join("c.json")).unwrap();

        store.put(record("notes", "/a")).unwrap();
        let err = store.put(record("notes", "/b")).unwrap_err();

        assert!(matches!(err, Error::DuplicateName { .. }));
        assert_eq!(store.get("notes").unwrap().original_path(), Path::new("/a"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let store = LinkStore::open(dir.path().join("c.json")).unwrap();
        assert!(store.delete("ghost").unwrap_err().is_not_found());
    }

    #[test]
    fn test_get_all_sorted_by_name() {
        let dir = tempdir().unwrap();
        let store = LinkStore::open(dir.path().join("c.json")).unwrap();
        for name in ["zeta", "alpha", "mid"] {
            store.put(record(name, &format!("/{name}"))).unwrap();
        }

        let names: Vec<_> = store
            .get_all()
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_find_by_original() {
        let dir = tempdir().unwrap();
        let store = LinkStore::open(dir.path().join("c.json")).unwrap();
        store.put(record("notes", "/home/notes")).unwrap();

        assert_eq!(
            store.find_by_original(Path::new("/home/notes")).unwrap().name(),
            "notes"
        );
        assert!(store.find_by_original(Path::new("/home/other")).is_none());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/c.json");
        let store = LinkStore::open(&path).unwrap();
        store.set_sync_root(PathBuf::from("/vault"));
        store.put(record("notes", "/home/notes")).unwrap();
        store.save().unwrap();

        let reopened = LinkStore::open(&path).unwrap();
        assert_eq!(reopened.sync_root(), PathBuf::from("/vault"));
        assert_eq!(reopened.get("notes"), store.get("notes"));
    }

    #[test]
    fn test_root_override_is_not_persisted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("c.json");
        let store = LinkStore::open(&path)
            .unwrap()
            .with_root_override(Some(PathBuf::from("/elsewhere")));
        store.set_sync_root(PathBuf::from("/vault"));

        assert_eq!(store.sync_root(), PathBuf::from("/elsewhere"));
        assert_eq!(store.configured_sync_root(), PathBuf::from("/vault"));
        store.save().unwrap();

        assert_eq!(LinkStore::open(&path).unwrap().sync_root(), PathBuf::from("/vault"));
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = LinkStore::open(blocker.join("c.json")).unwrap();
        store.put(record("notes", "/home/notes")).unwrap();

        assert!(matches!(store.save().unwrap_err(), Error::Persistence { .. }));
        assert!(store.get("notes").is_some());
    }

    #[test]
    fn test_concurrent_puts_allow_one_winner() {
        let dir = tempdir().unwrap();
        let store = Arc::new(LinkStore::open(dir.path().join("c.json")).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.put(record("shared", &format!("/p{i}"))).is_ok())
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(store.len(), 1);
    }
}
