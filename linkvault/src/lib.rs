#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # linkvault
//!
//! A library for relocating files and directories into a central storage
//! root while leaving a redirection artifact at their original location.
//!
//! Applications keep addressing the original path; the data lives under the
//! storage root, where it can be synchronized or backed up as one tree.
//!
//! ## Core Types
//!
//! - [`LinkEngine`]: create, remove, repair and inspect links
//! - [`LinkStore`] and [`LinkRecord`]: the persistent record of managed links
//! - [`ArtifactRegistry`] and [`ShortcutProvider`]: symlink and shortcut
//!   artifacts
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use linkvault::{CreateOptions, LinkEngine, LinkState, LinkStore};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = LinkStore::open(dir.path().join("linkvault.json"))
//!     .unwrap()
//!     .with_root_override(Some(dir.path().join("vault")));
//! let engine = LinkEngine::new(&store);
//!
//! let notes = dir.path().join("notes");
//! std::fs::create_dir(&notes).unwrap();
//!
//! # #[cfg(unix)]
//! # {
//! engine.create(CreateOptions::new(&notes)).unwrap();
//! assert_eq!(engine.status("notes").state, LinkState::Linked);
//!
//! engine.remove("notes").unwrap();
//! assert!(notes.is_dir());
//! # }
//! ```

pub mod artifact;
pub mod error;
pub mod logging;
pub mod operations;
pub mod path;
pub mod store;

// Re-export key types at crate root for convenience
pub use artifact::{ArtifactKind, ArtifactRegistry, ShortcutProvider};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    BatchReport, CreateOptions, CreateResult, LinkEngine, LinkState, LinkStatus, RemoveResult,
    RepairOutcome,
};
pub use store::{LinkRecord, LinkStore};
