//! Error types for the linkvault library.
//!
//! Every lifecycle operation resolves to success or exactly one of these
//! variants, carrying enough context (link name, path, underlying OS error)
//! to diagnose and retry.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a linkvault error.
///
/// # Examples
///
/// ```
/// use linkvault::{Error, Result};
///
/// fn example_operation() -> Result<&'static str> {
///     Ok("notes")
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the linkvault library.
#[derive(Debug, Error)]
pub enum Error {
    /// A path could not be resolved to an absolute form.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
        /// Why resolution failed.
        reason: String,
    },

    /// The requested link or path does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The link name or path that was not found.
        resource: String,
    },

    /// The path is already managed by an existing link.
    #[error("{} is already managed by link '{name}'", path.display())]
    AlreadyManaged {
        /// The path the caller tried to link.
        path: PathBuf,
        /// The link that already manages it.
        name: String,
    },

    /// A link with this name already exists.
    #[error("a link named '{name}' already exists")]
    DuplicateName {
        /// The duplicated name.
        name: String,
    },

    /// The process lacks the privilege to perform a filesystem step.
    #[error("permission denied: {}: {source}", path.display())]
    PermissionDenied {
        /// The path that could not be modified.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The requested artifact kind has no implementation on this platform.
    #[error("{feature} is not supported on this platform")]
    UnsupportedPlatform {
        /// The unavailable capability.
        feature: String,
    },

    /// Something unrelated occupies a path the operation needs.
    #[error("conflict at {}: {details}", path.display())]
    ConflictDetected {
        /// The contested path.
        path: PathBuf,
        /// What was found there.
        details: String,
    },

    /// The synced copy of a link's data is gone.
    #[error("data for link '{name}' is missing from {}", synced_path.display())]
    DataLost {
        /// The affected link.
        name: String,
        /// Where the data should have been.
        synced_path: PathBuf,
    },

    /// The configuration file could not be written.
    #[error("failed to persist configuration to {}: {source}", path.display())]
    Persistence {
        /// The configuration file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A step failed and its rollback failed as well.
    #[error(
        "link '{name}' left partially applied: {source}; rollback failed: {rollback}; data remains at {}",
        surviving_copy.display()
    )]
    PartialFailure {
        /// The affected link.
        name: String,
        /// Where the data currently lives.
        surviving_copy: PathBuf,
        /// The error that triggered the rollback.
        #[source]
        source: Box<Error>,
        /// Why the rollback itself failed.
        rollback: Box<Error>,
    },

    /// A step failed and every committed step was undone.
    #[error("{source} (changes rolled back)")]
    RolledBack {
        /// The error that triggered the rollback.
        #[source]
        source: Box<Error>,
    },

    /// The configuration file carries an unknown schema version.
    #[error("unsupported configuration version: expected {expected}, found {found}")]
    UnsupportedVersion {
        /// The version this build understands.
        expected: String,
        /// The version found on disk.
        found: String,
    },

    /// A field failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the failure.
        message: String,
    },

    /// The configuration file could not be parsed or rendered.
    #[error("configuration error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// The path being operated on.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wraps an I/O error, promoting permission failures to
    /// [`Error::PermissionDenied`].
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { path, source }
        } else {
            Self::Io { path, source }
        }
    }

    /// Returns the error that started a rollback, looking through
    /// [`Error::RolledBack`] wrappers.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkvault::Error;
    ///
    /// let err = Error::RolledBack {
    ///     source: Box::new(Error::DuplicateName { name: "notes".into() }),
    /// };
    /// assert!(matches!(err.root_cause(), Error::DuplicateName { .. }));
    /// ```
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::RolledBack { source } => source.root_cause(),
            other => other,
        }
    }

    /// Check if error indicates a missing link or path.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkvault::Error;
    ///
    /// let err = Error::NotFound { resource: "link 'notes'".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.root_cause(), Self::NotFound { .. })
    }

    /// Check if error is permission-related.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self.root_cause(), Self::PermissionDenied { .. })
    }

    /// Check if error needs manual operator intervention and must never be
    /// retried automatically.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::DataLost { .. } | Self::PartialFailure { .. })
    }
}
