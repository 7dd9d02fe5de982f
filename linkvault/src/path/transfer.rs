//! Moving data between locations.
//!
//! A move within one volume is a single `rename` and therefore atomic. Across
//! volumes the data is copied, then the source is deleted. If the copy fails
//! the partial destination is removed, so a failed move always leaves the
//! source untouched.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use super::classify::{classify, EntryKind};
use crate::artifact::symlink::create_symlink;
use crate::error::{Error, Result};

/// Move `src` to `dst`, falling back to copy-then-delete across volumes.
///
/// Parent directories of `dst` are created as needed. `dst` itself must not
/// exist.
///
/// If the source cannot be deleted after a successful cross-volume copy, the
/// destination is kept as the authoritative copy and the call succeeds; the
/// leftover source is reported through `log::warn!`.
///
/// # Errors
///
/// - [`Error::NotFound`] if `src` does not exist
/// - [`Error::ConflictDetected`] if `dst` is already occupied
/// - [`Error::PermissionDenied`] / [`Error::Io`] for filesystem failures
///
/// # Examples
///
/// ```
/// use linkvault::path::atomic_move;
///
/// let dir = tempfile::tempdir().unwrap();
/// let src = dir.path().join("a.txt");
/// let dst = dir.path().join("nested/b.txt");
/// std::fs::write(&src, "data").unwrap();
///
/// atomic_move(&src, &dst).unwrap();
/// assert!(!src.exists());
/// assert_eq!(std::fs::read_to_string(&dst).unwrap(), "data");
/// ```
pub fn atomic_move(src: &Path, dst: &Path) -> Result<()> {
    if classify(src).map_err(|e| Error::io(src, e))? == EntryKind::Missing {
        return Err(Error::NotFound {
            resource: src.display().to_string(),
        });
    }

    let occupant = classify(dst).map_err(|e| Error::io(dst, e))?;
    if occupant != EntryKind::Missing {
        return Err(Error::ConflictDetected {
            path: dst.to_path_buf(),
            details: format!("destination already holds {occupant}"),
        });
    }

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    match fs::rename(src, dst) {
        Ok(()) => {
            log::debug!("renamed {} -> {}", src.display(), dst.display());
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            log::debug!(
                "{} and {} are on different volumes, copying",
                src.display(),
                dst.display()
            );
            copy_then_delete(src, dst)
        }
        Err(e) => Err(Error::io(src, e)),
    }
}

/// Remove whatever occupies `path` without following a final symlink.
///
/// A missing path is not an error.
///
/// # Errors
///
/// Returns an error if the entry exists but cannot be removed.
pub fn remove_entry(path: &Path) -> Result<()> {
    let kind = classify(path).map_err(|e| Error::io(path, e))?;
    let result = match kind {
        EntryKind::Missing => return Ok(()),
        EntryKind::Directory => fs::remove_dir_all(path),
        EntryKind::Symlink => remove_symlink(path),
        EntryKind::File | EntryKind::Shortcut => fs::remove_file(path),
    };
    result.map_err(|e| Error::io(path, e))
}

fn copy_then_delete(src: &Path, dst: &Path) -> Result<()> {
    if let Err(copy_err) = copy_entry(src, dst) {
        if let Err(cleanup_err) = remove_entry(dst) {
            log::warn!(
                "could not remove partial copy at {}: {cleanup_err}",
                dst.display()
            );
        }
        return Err(copy_err);
    }

    if let Err(e) = remove_entry(src) {
        log::warn!(
            "copied {} to {} but could not delete the source: {e}",
            src.display(),
            dst.display()
        );
    }
    Ok(())
}

fn copy_entry(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            Error::io(path, io::Error::from(e))
        })?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| Error::InvalidPath {
                path: entry.path().to_path_buf(),
                reason: format!("not inside {}", src.display()),
            })?;
        let target = if relative.as_os_str().is_empty() {
            dst.to_path_buf()
        } else {
            dst.join(relative)
        };

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            let link_target =
                fs::read_link(entry.path()).map_err(|e| Error::io(entry.path(), e))?;
            let points_to_dir = fs::metadata(entry.path()).is_ok_and(|m| m.is_dir());
            create_symlink(&link_target, &target, points_to_dir)
                .map_err(|e| Error::io(&target, e))?;
        } else if file_type.is_dir() {
            fs::create_dir(&target).map_err(|e| Error::io(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| Error::io(&target, e))?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn remove_symlink(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

#[cfg(windows)]
fn remove_symlink(path: &Path) -> io::Result<()> {
    // Directory symlinks on Windows are removed like directories.
    fs::remove_file(path).or_else(|_| fs::remove_dir(path))
}

#[cfg(unix)]
fn is_cross_device(e: &io::Error) -> bool {
    // EXDEV on Linux, macOS and the BSDs.
    e.raw_os_error() == Some(18)
}

#[cfg(windows)]
fn is_cross_device(e: &io::Error) -> bool {
    // ERROR_NOT_SAME_DEVICE
    e.raw_os_error() == Some(17)
}
