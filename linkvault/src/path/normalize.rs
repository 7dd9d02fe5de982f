//! Path normalization functions.
//!
//! Normalization is purely lexical: it expands `~`, anchors relative paths at
//! the current directory and folds `.`/`..` components. It never follows
//! symlinks, because a managed path is usually a symlink and must be addressed
//! as itself rather than as its target.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand tilde (~) to the home directory.
///
/// This function handles `~` and `~/path` but does not support `~user` syntax.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if:
/// - The path contains invalid UTF-8 and starts with `~`
/// - The home directory cannot be determined
/// - The path uses `~user` syntax
///
/// # Examples
///
/// ```
/// use linkvault::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/notes")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("notes"));
///
/// let expanded = expand_tilde(Path::new("/absolute")).unwrap();
/// assert_eq!(expanded, Path::new("/absolute"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        // Non-UTF-8 paths cannot start with a literal "~" we would expand.
        return Ok(path.to_path_buf());
    };

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if let Some(rest) = path_str
        .strip_prefix("~/")
        .or_else(|| path_str.strip_prefix("~\\"))
    {
        Ok(home.join(rest))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Resolve `.` and `..` components in an absolute path.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if `..` components would escape the root.
///
/// # Examples
///
/// ```
/// use linkvault::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/a/c"));
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::RootDir => result.push(component),
            Component::CurDir => {}
            Component::Normal(c) => {
                result.push(c);
                depth += 1;
            }
            Component::ParentDir => {
                if depth == 0 {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "too many '..' components (escapes root)".to_string(),
                    });
                }
                result.pop();
                depth -= 1;
            }
        }
    }

    Ok(result)
}

/// Resolve user input to a canonical absolute path.
///
/// 1. Rejects empty input
/// 2. Expands tilde (~) if present
/// 3. Converts relative paths to absolute (using the current directory)
/// 4. Resolves `.` and `..` components
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] when any of the steps above is impossible.
///
/// # Examples
///
/// ```
/// use linkvault::path::abs_path;
/// use std::path::Path;
///
/// assert!(abs_path(Path::new("./notes")).unwrap().is_absolute());
/// assert!(abs_path(Path::new("")).is_err());
/// ```
pub fn abs_path(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "path is empty".to_string(),
        });
    }

    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("cannot get current directory: {e}"),
        })?;
        cwd.join(expanded)
    };

    resolve_components(&absolute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_home() {
        let home = home::home_dir().unwrap();
        assert_eq!(expand_tilde(Path::new("~")).unwrap(), home);
        assert_eq!(expand_tilde(Path::new("~/docs")).unwrap(), home.join("docs"));
    }

    #[test]
    fn test_expand_tilde_user_syntax_not_supported() {
        assert!(expand_tilde(Path::new("~user/path")).is_err());
    }

    #[test]
    fn test_resolve_components_multiple_parent() {
        let resolved = resolve_components(Path::new("/a/b/../../c")).unwrap();
        assert_eq!(resolved, PathBuf::from("/c"));
    }

    #[test]
    fn test_resolve_components_root_only() {
        let resolved = resolve_components(Path::new("/")).unwrap();
        assert_eq!(resolved, PathBuf::from("/"));
    }

    #[test]
    fn test_resolve_components_escaping_root() {
        assert!(resolve_components(Path::new("/a/../..")).is_err());
    }

    #[test]
    fn test_abs_path_relative() {
        let cwd = env::current_dir().unwrap();
        let normalized = abs_path(Path::new("relative/./path")).unwrap();
        assert!(normalized.starts_with(&cwd));
        assert!(normalized.ends_with("relative/path"));
    }

    #[test]
    fn test_abs_path_empty() {
        let err = abs_path(Path::new("")).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_abs_path_current_dir() {
        let cwd = env::current_dir().unwrap();
        assert_eq!(abs_path(Path::new(".")).unwrap(), cwd);
    }

    #[cfg(all(unix, feature = "property-tests"))]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn path_with_dots_strategy() -> impl Strategy<Value = String> {
            prop::collection::vec(
                prop_oneof![
                    Just(".".to_string()),
                    Just("..".to_string()),
                    "[a-zA-Z0-9_-]{1,10}",
                ],
                1..=8,
            )
            .prop_map(|parts| format!("/{}", parts.join("/")))
        }

        proptest! {
            /// Normalized paths are absolute and free of `.`/`..`
            #[test]
            fn abs_path_is_clean(s in path_with_dots_strategy()) {
                if let Ok(normalized) = abs_path(Path::new(&s)) {
                    prop_assert!(normalized.is_absolute());
                    for component in normalized.components() {
                        prop_assert_ne!(component, Component::CurDir);
                        prop_assert_ne!(component, Component::ParentDir);
                    }
                }
            }

            /// Normalizing twice gives the same result
            #[test]
            fn abs_path_idempotent(s in path_with_dots_strategy()) {
                if let Ok(first) = abs_path(Path::new(&s)) {
                    prop_assert_eq!(abs_path(&first).unwrap(), first);
                }
            }
        }
    }
}
