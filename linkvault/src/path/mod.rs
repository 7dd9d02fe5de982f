//! Path utilities for the link lifecycle.
//!
//! This module covers the three filesystem primitives every lifecycle
//! operation is built from:
//!
//! - **Normalization** ([`abs_path`]): turns user input into an absolute,
//!   lexically clean path. Symlinks are never followed, so a managed path is
//!   addressed as itself.
//! - **Classification** ([`classify`]): reports whether a path is missing, a
//!   file, a directory, a symlink, or a shortcut file, looking at most one
//!   level deep.
//! - **Transfer** ([`atomic_move`]): moves data with a same-volume `rename`,
//!   falling back to copy-then-delete across volumes.
//!
//! # Examples
//!
//! ```
//! use linkvault::path::{abs_path, atomic_move, classify, EntryKind};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let src = dir.path().join("notes");
//! std::fs::create_dir(&src).unwrap();
//!
//! let dst = abs_path(&dir.path().join("storage/./notes")).unwrap();
//! atomic_move(&src, &dst).unwrap();
//!
//! assert_eq!(classify(&src).unwrap(), EntryKind::Missing);
//! assert_eq!(classify(&dst).unwrap(), EntryKind::Directory);
//! ```

mod classify;
pub mod normalize;
mod transfer;

pub use classify::{classify, EntryKind, SHORTCUT_EXTENSION};
pub use normalize::abs_path;
pub use transfer::{atomic_move, remove_entry};
