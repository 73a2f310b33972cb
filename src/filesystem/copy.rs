// src/filesystem/copy.rs

//! Copying scanned entries into a destination tree
//!
//! Entries keep their relative layout under the destination. Existing files
//! at the same path are replaced; anything else already in the destination
//! is left alone. Regular files can optionally be hardlinked, which falls
//! back to copying when the link fails (cross-device, etc).

use super::path::safe_join;
use super::scan::{EntryKind, ScannedEntry};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How a copied file was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    Hardlink,
    Copy,
    Symlink,
    Directory,
}

/// Copies entries from one source root into one destination root
pub struct TreeCopier {
    source_root: PathBuf,
    dest_root: PathBuf,
    hardlink: bool,
}

impl TreeCopier {
    pub fn new(source_root: &Path, dest_root: &Path) -> Self {
        Self {
            source_root: source_root.to_path_buf(),
            dest_root: dest_root.to_path_buf(),
            hardlink: false,
        }
    }

    /// Hardlink regular files instead of copying them
    pub fn with_hardlinks(mut self, hardlink: bool) -> Self {
        self.hardlink = hardlink;
        self
    }

    /// Copy a single entry, creating parent directories as needed
    pub fn copy_entry(&self, entry: &ScannedEntry) -> Result<CopyMethod> {
        let source = safe_join(&self.source_root, &entry.relpath)?;
        let target = safe_join(&self.dest_root, &entry.relpath)?;

        if entry.kind == EntryKind::Directory {
            fs::create_dir_all(&target)?;
            return Ok(CopyMethod::Directory);
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        remove_existing(&target)?;

        let method = match entry.kind {
            EntryKind::Symlink => {
                let link_target = fs::read_link(&source)?;
                create_symlink(&link_target, &target)?;
                CopyMethod::Symlink
            }
            _ if self.hardlink && fs::hard_link(&source, &target).is_ok() => CopyMethod::Hardlink,
            _ => {
                if self.hardlink {
                    debug!("Hardlink failed for {}, falling back to copy", entry.relpath);
                }
                fs::copy(&source, &target)?;
                CopyMethod::Copy
            }
        };

        Ok(method)
    }
}

/// Remove a file or symlink occupying `target`; directories are an error
fn remove_existing(target: &Path) -> Result<()> {
    match fs::symlink_metadata(target) {
        Ok(meta) if meta.is_dir() => Err(Error::InvalidPath(format!(
            "Refusing to replace directory with file: {}",
            target.display()
        ))),
        Ok(_) => {
            fs::remove_file(target)?;
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(unix)]
fn create_symlink(link_target: &Path, at: &Path) -> Result<()> {
    std::os::unix::fs::symlink(link_target, at)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_symlink(_link_target: &Path, at: &Path) -> Result<()> {
    Err(Error::Io(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        format!("Symlinks not supported on this platform: {}", at.display()),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_entry(relpath: &str) -> ScannedEntry {
        ScannedEntry {
            relpath: relpath.to_string(),
            kind: EntryKind::File,
            size: 0,
        }
    }

    #[test]
    fn test_copy_file_preserves_structure() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        let dst = temp_dir.path().join("dst");
        fs::create_dir_all(src.join("lib")).unwrap();
        fs::write(src.join("lib/libfoo.so"), b"elf").unwrap();

        let copier = TreeCopier::new(&src, &dst);
        let method = copier.copy_entry(&file_entry("lib/libfoo.so")).unwrap();

        assert_eq!(method, CopyMethod::Copy);
        assert_eq!(fs::read(dst.join("lib/libfoo.so")).unwrap(), b"elf");
    }

    #[test]
    fn test_copy_replaces_existing_and_keeps_unrelated() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        let dst = temp_dir.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("README"), b"new").unwrap();
        fs::write(dst.join("README"), b"old").unwrap();
        fs::write(dst.join("KEEP"), b"keep").unwrap();

        TreeCopier::new(&src, &dst)
            .copy_entry(&file_entry("README"))
            .unwrap();

        assert_eq!(fs::read(dst.join("README")).unwrap(), b"new");
        assert_eq!(fs::read(dst.join("KEEP")).unwrap(), b"keep");
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_uses_hardlinks() {
        use std::os::unix::fs::MetadataExt;

        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        let dst = temp_dir.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("libfoo.a"), b"archive").unwrap();

        let method = TreeCopier::new(&src, &dst)
            .with_hardlinks(true)
            .copy_entry(&file_entry("libfoo.a"))
            .unwrap();

        assert_eq!(method, CopyMethod::Hardlink);
        let src_ino = fs::metadata(src.join("libfoo.a")).unwrap().ino();
        let dst_ino = fs::metadata(dst.join("libfoo.a")).unwrap().ino();
        assert_eq!(src_ino, dst_ino);
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_recreates_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        let dst = temp_dir.path().join("dst");
        fs::create_dir_all(src.join("lib")).unwrap();
        std::os::unix::fs::symlink("libfoo.so.1", src.join("lib/libfoo.so")).unwrap();

        let entry = ScannedEntry {
            relpath: "lib/libfoo.so".to_string(),
            kind: EntryKind::Symlink,
            size: 0,
        };
        let method = TreeCopier::new(&src, &dst).copy_entry(&entry).unwrap();

        assert_eq!(method, CopyMethod::Symlink);
        assert_eq!(
            fs::read_link(dst.join("lib/libfoo.so")).unwrap(),
            PathBuf::from("libfoo.so.1")
        );
    }

    #[test]
    fn test_copy_directory_entry() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        let dst = temp_dir.path().join("dst");
        fs::create_dir_all(src.join("share/empty")).unwrap();

        let entry = ScannedEntry {
            relpath: "share/empty".to_string(),
            kind: EntryKind::Directory,
            size: 0,
        };
        let method = TreeCopier::new(&src, &dst).copy_entry(&entry).unwrap();
        assert_eq!(method, CopyMethod::Directory);
        assert!(dst.join("share/empty").is_dir());
    }
}
