// src/filesystem/scan.rs

//! Base directory scanning
//!
//! A base directory is walked once into a sorted list of entries. The list
//! is kept in memory and handed to every component that references the same
//! directory, so fan-out in the extends graph never causes a second walk.

use super::path::relpath_under;
use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Kind of a scanned entry (symlinks are never followed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

impl EntryKind {
    fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Directory
        } else {
            Self::File
        }
    }
}

/// One path discovered under a base directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedEntry {
    /// Path relative to the base directory, `/`-separated
    pub relpath: String,
    pub kind: EntryKind,
    /// Size in bytes (0 for directories)
    pub size: u64,
}

impl ScannedEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// The memoized contents of one base directory
#[derive(Debug, Clone)]
pub struct BasedirScan {
    entries: Vec<ScannedEntry>,
}

impl BasedirScan {
    /// Walk `root` and record every entry beneath it, sorted by relpath
    pub fn walk(root: &Path) -> Result<Self> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
            let entry = entry?;
            let relpath = relpath_under(root, entry.path())?;
            let kind = EntryKind::from_file_type(entry.file_type());
            let size = if kind == EntryKind::Directory {
                0
            } else {
                entry.metadata()?.len()
            };
            entries.push(ScannedEntry {
                relpath,
                kind,
                size,
            });
        }

        entries.sort_by(|a, b| a.relpath.cmp(&b.relpath));
        debug!("Scanned {} entries under {}", entries.len(), root.display());

        Ok(Self { entries })
    }

    /// Iterate the scanned entries; can be restarted any number of times
    pub fn entries(&self) -> impl Iterator<Item = &ScannedEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relpath: &str) {
        let path = root.join(relpath);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, relpath.as_bytes()).unwrap();
    }

    #[test]
    fn test_walk_records_files_and_dirs_sorted() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "lib/libfoo.so.1");
        touch(temp_dir.path(), "bin/foo");
        touch(temp_dir.path(), "include/foo.h");

        let scan = BasedirScan::walk(temp_dir.path()).unwrap();
        let relpaths: Vec<&str> = scan.entries().map(|e| e.relpath.as_str()).collect();
        assert_eq!(
            relpaths,
            vec!["bin", "bin/foo", "include", "include/foo.h", "lib", "lib/libfoo.so.1"]
        );

        let lib = scan.entries().find(|e| e.relpath == "lib").unwrap();
        assert!(lib.is_dir());
        let so = scan.entries().find(|e| e.relpath == "lib/libfoo.so.1").unwrap();
        assert_eq!(so.kind, EntryKind::File);
        assert_eq!(so.size, "lib/libfoo.so.1".len() as u64);
    }

    #[test]
    fn test_walk_is_restartable() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a/b/c.txt");

        let scan = BasedirScan::walk(temp_dir.path()).unwrap();
        let first: Vec<_> = scan.entries().cloned().collect();
        let second: Vec<_> = scan.entries().cloned().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_does_not_follow_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "lib/libfoo.so.1");
        std::os::unix::fs::symlink("libfoo.so.1", temp_dir.path().join("lib/libfoo.so")).unwrap();
        std::os::unix::fs::symlink("lib", temp_dir.path().join("lib64")).unwrap();

        let scan = BasedirScan::walk(temp_dir.path()).unwrap();
        let link = scan.entries().find(|e| e.relpath == "lib/libfoo.so").unwrap();
        assert_eq!(link.kind, EntryKind::Symlink);
        let dir_link = scan.entries().find(|e| e.relpath == "lib64").unwrap();
        assert_eq!(dir_link.kind, EntryKind::Symlink);
        assert!(!scan.entries().any(|e| e.relpath.starts_with("lib64/")));
    }

    #[test]
    fn test_walk_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        let scan = BasedirScan::walk(temp_dir.path()).unwrap();
        assert_eq!(scan.entries().count(), 0);
    }
}
