//! Filesystem entry classification.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// File extension that marks a native shortcut file.
pub const SHORTCUT_EXTENSION: &str = "lnk";

/// What currently occupies a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Nothing exists at the path.
    Missing,
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// A symbolic link, whether or not its target exists.
    Symlink,
    /// A regular file carrying the shortcut extension.
    Shortcut,
}

impl EntryKind {
    /// Whether this entry is a redirection artifact of either variant.
    #[must_use]
    pub const fn is_artifact(self) -> bool {
        matches!(self, Self::Symlink | Self::Shortcut)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Missing => "nothing",
            Self::File => "a regular file",
            Self::Directory => "a directory",
            Self::Symlink => "a symbolic link",
            Self::Shortcut => "a shortcut file",
        };
        f.write_str(label)
    }
}

/// Probe what occupies `path` without following a final symlink.
///
/// A path the OS reports as absent is [`EntryKind::Missing`]; any other probe
/// failure (for example a permission error on a parent directory) is returned.
///
/// # Errors
///
/// Returns the underlying I/O error when the entry cannot be inspected.
///
/// # Examples
///
/// ```
/// use linkvault::path::{classify, EntryKind};
/// use std::path::Path;
///
/// let kind = classify(Path::new("/definitely/not/here")).unwrap();
/// assert_eq!(kind, EntryKind::Missing);
/// ```
pub fn classify(path: &Path) -> io::Result<EntryKind> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(EntryKind::Missing),
        Err(e) => return Err(e),
    };

    let file_type = metadata.file_type();
    let kind = if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if has_shortcut_extension(path) {
        EntryKind::Shortcut
    } else {
        EntryKind::File
    };
    Ok(kind)
}

fn has_shortcut_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SHORTCUT_EXTENSION))
}
