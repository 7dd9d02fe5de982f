//! Link records and the configuration they live in.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::artifact::ArtifactKind;
use crate::error::{Error, Result};

/// Sub-directory of the storage root that holds file-kind links.
pub const FILES_DIR: &str = "files";

/// A managed item: where its artifact lives and where its data now lives.
///
/// # Examples
///
/// ```
/// use linkvault::{ArtifactKind, LinkRecord};
/// use std::path::PathBuf;
///
/// let record = LinkRecord::new(
///     "notes",
///     PathBuf::from("/home/user/notes"),
///     PathBuf::from("/sync/notes"),
///     ArtifactKind::Symlink,
///     true,
/// )
/// .unwrap();
/// assert_eq!(record.name(), "notes");
/// assert!(record.is_directory());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    name: String,
    original_path: PathBuf,
    synced_path: PathBuf,
    artifact_kind: ArtifactKind,
    is_directory: bool,
    created_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Creates a record stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `name` is not a usable link name.
    pub fn new(
        name: impl Into<String>,
        original_path: PathBuf,
        synced_path: PathBuf,
        artifact_kind: ArtifactKind,
        is_directory: bool,
    ) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            original_path,
            synced_path,
            artifact_kind,
            is_directory,
            created_at: Utc::now(),
        })
    }

    pub(crate) fn restore(
        name: String,
        original_path: PathBuf,
        synced_path: PathBuf,
        artifact_kind: ArtifactKind,
        is_directory: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            original_path,
            synced_path,
            artifact_kind,
            is_directory,
            created_at,
        }
    }

    /// The unique link name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the artifact lives (and the data used to live).
    #[must_use]
    pub fn original_path(&self) -> &Path {
        &self.original_path
    }

    /// Where the data lives inside the storage root.
    #[must_use]
    pub fn synced_path(&self) -> &Path {
        &self.synced_path
    }

    /// Which artifact variant governs this record.
    #[must_use]
    pub const fn artifact_kind(&self) -> ArtifactKind {
        self.artifact_kind
    }

    /// Whether the managed item is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// When the link was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Check that `name` can serve as a link name and a path component.
///
/// # Errors
///
/// Returns [`Error::Validation`] for empty names, `.`/`..`, names with path
/// separators or NUL bytes, and names with surrounding whitespace.
///
/// # Examples
///
/// ```
/// use linkvault::store::validate_name;
///
/// assert!(validate_name("notes").is_ok());
/// assert!(validate_name("..").is_err());
/// assert!(validate_name("a/b").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<()> {
    let problem = if name.is_empty() {
        Some("must be non-empty")
    } else if name == "." || name == ".." {
        Some("must not be '.' or '..'")
    } else if name.contains(['/', '\\', '\0']) {
        Some("must not contain path separators or NUL bytes")
    } else if name.trim() != name {
        Some("must not start or end with whitespace")
    } else {
        None
    };

    match problem {
        Some(message) => Err(Error::Validation {
            field: "name".to_string(),
            message: format!("{message} (got {name:?})"),
        }),
        None => Ok(()),
    }
}

/// Where a link's data is stored under `root`.
///
/// Directories sit directly under the root; files sit under
/// `root/files/` so a file and a directory may share a name.
///
/// # Examples
///
/// ```
/// use linkvault::store::synced_path_for;
/// use std::path::{Path, PathBuf};
///
/// let root = Path::new("/sync");
/// assert_eq!(synced_path_for(root, "notes", true), PathBuf::from("/sync/notes"));
/// assert_eq!(synced_path_for(root, "notes", false), PathBuf::from("/sync/files/notes"));
/// ```
#[must_use]
pub fn synced_path_for(root: &Path, name: &str, is_directory: bool) -> PathBuf {
    if is_directory {
        root.join(name)
    } else {
        root.join(FILES_DIR).join(name)
    }
}

/// The in-memory configuration: storage root plus every link record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// The central storage root.
    pub sync_root: PathBuf,
    /// All records keyed by name.
    pub links: BTreeMap<String, LinkRecord>,
}

impl Configuration {
    /// An empty configuration rooted at `sync_root`.
    #[must_use]
    pub const fn new(sync_root: PathBuf) -> Self {
        Self {
            sync_root,
            links: BTreeMap::new(),
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(default_sync_root())
    }
}

/// The default storage root: `~/LinkVault`.
#[must_use]
pub fn default_sync_root() -> PathBuf {
    home::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("LinkVault")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_stamps_creation_time() {
        let before = Utc::now();
        let record = LinkRecord::new(
            "notes",
            PathBuf::from("/a"),
            PathBuf::from("/b"),
            ArtifactKind::Symlink,
            false,
        )
        .unwrap();
        assert!(record.created_at() >= before);
        assert_eq!(record.artifact_kind(), ArtifactKind::Symlink);
    }

    #[test]
    fn test_new_record_rejects_bad_name() {
        let err = LinkRecord::new(
            "a/b",
            PathBuf::from("/a"),
            PathBuf::from("/b"),
            ArtifactKind::Symlink,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_validate_name_cases() {
        assert!(validate_name("My Documents").is_ok());
        assert!(validate_name(".config").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(".").is_err());
        assert!(validate_name("a\\b").is_err());
        assert!(validate_name(" padded ").is_err());
    }

    #[test]
    fn test_file_and_directory_do_not_collide() {
        let root = Path::new("/sync");
        assert_ne!(
            synced_path_for(root, "same", true),
            synced_path_for(root, "same", false)
        );
    }

    #[cfg(feature = "property-tests")]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Valid names always land exactly one level below their parent
            #[test]
            fn valid_names_stay_under_root(
                name in "[a-zA-Z0-9_.-]{1,20}",
                is_dir in any::<bool>()
            ) {
                prop_assume!(validate_name(&name).is_ok());
                let root = Path::new("/sync");
                let synced = synced_path_for(root, &name, is_dir);
                prop_assert!(synced.starts_with(root));
                prop_assert_eq!(synced.file_name().and_then(|n| n.to_str()), Some(name.as_str()));
            }

            /// Names containing a separator are always rejected
            #[test]
            fn separators_rejected(prefix in "[a-z]{0,5}", suffix in "[a-z]{0,5}") {
                let name = format!("{prefix}/{suffix}");
                prop_assert!(validate_name(&name).is_err());
            }
        }
    }
}
