// src/filesystem/path.rs

//! Relative path handling for base directories and scanned entries
//!
//! Descriptor base directories and every scanned entry are tracked as
//! `/`-separated strings relative to their root. These helpers build those
//! strings and keep them from escaping the root they are joined onto.

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Normalize a root-relative path written by a descriptor author
///
/// This function:
/// 1. Rejects absolute paths (the descriptor only ever names subtrees)
/// 2. Rejects `..` (parent directory) components
/// 3. Drops `.` components and duplicate separators
/// 4. Returns an error for empty paths
///
/// # Examples
///
/// ```
/// use stagesplit::filesystem::path::normalize_relpath;
///
/// assert_eq!(normalize_relpath("a/stage").unwrap(), "a/stage");
/// assert_eq!(normalize_relpath("./a//stage/").unwrap(), "a/stage");
///
/// assert!(normalize_relpath("/a/stage").is_err());
/// assert!(normalize_relpath("a/../../stage").is_err());
/// assert!(normalize_relpath(".").is_err());
/// ```
pub fn normalize_relpath(path: &str) -> Result<String> {
    if path.starts_with('/') || path.starts_with('\\') {
        return Err(Error::InvalidPath(format!("Absolute path not allowed: {}", path)));
    }

    let mut parts: Vec<&str> = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(c) => {
                let part = c
                    .to_str()
                    .ok_or_else(|| Error::InvalidPath(format!("Non UTF-8 path: {}", path)))?;
                parts.push(part);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(Error::PathTraversal(path.to_string()));
            }
            Component::Prefix(_) | Component::RootDir => {
                return Err(Error::InvalidPath(format!("Absolute path not allowed: {}", path)));
            }
        }
    }

    if parts.is_empty() {
        return Err(Error::InvalidPath("Empty path after normalization".to_string()));
    }

    Ok(parts.join("/"))
}

/// Express `path` relative to `root` as a `/`-separated string
///
/// Fails if `path` is not under `root` or is not valid UTF-8, since scanned
/// relpaths have to round-trip through glob matching and back to disk.
pub fn relpath_under(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        Error::InvalidPath(format!(
            "{} is not under {}",
            path.display(),
            root.display()
        ))
    })?;

    let mut parts: Vec<&str> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(c) => {
                let part = c.to_str().ok_or_else(|| {
                    Error::InvalidPath(format!("Non UTF-8 path: {}", path.display()))
                })?;
                parts.push(part);
            }
            Component::CurDir => {}
            _ => return Err(Error::PathTraversal(path.display().to_string())),
        }
    }

    Ok(parts.join("/"))
}

/// Safely join a root path with a relative path
///
/// # Examples
///
/// ```
/// use stagesplit::filesystem::path::safe_join;
/// use std::path::{Path, PathBuf};
///
/// let root = Path::new("/tmp/out");
///
/// assert_eq!(
///     safe_join(root, "a/stage/lib/libfoo.so").unwrap(),
///     PathBuf::from("/tmp/out/a/stage/lib/libfoo.so")
/// );
/// assert!(safe_join(root, "../etc/passwd").is_err());
/// ```
pub fn safe_join(root: impl AsRef<Path>, relpath: &str) -> Result<PathBuf> {
    let normalized = normalize_relpath(relpath)?;
    Ok(root.as_ref().join(normalized))
}

/// Validate a single path component (no separators, no `.`/`..`)
pub fn sanitize_filename(name: &str) -> Result<String> {
    if name.contains('/') || name.contains('\\') {
        return Err(Error::PathTraversal(format!(
            "Filename contains path separator: {}",
            name
        )));
    }

    if name == ".." || name == "." {
        return Err(Error::PathTraversal(format!("Invalid filename: {}", name)));
    }

    if name.is_empty() {
        return Err(Error::InvalidPath("Empty filename".to_string()));
    }

    Ok(name.to_string())
}
