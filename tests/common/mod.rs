// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use stagesplit::{ArtifactDescriptor, ComponentRegistry};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding a staged tree under `src/` and a descriptor.
///
/// Keep the value alive for the duration of the test to prevent cleanup.
pub struct TestTree {
    temp_dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Root of the staged tree
    pub fn src(&self) -> PathBuf {
        self.path().join("src")
    }

    /// Create an empty file at `relpath` under the staged tree
    pub fn touch(&self, relpath: &str) -> PathBuf {
        self.write(relpath, relpath.as_bytes())
    }

    /// Create a file with content at `relpath` under the staged tree
    pub fn write(&self, relpath: &str, content: &[u8]) -> PathBuf {
        let path = self.src().join(relpath);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// Write `descriptor.toml`, stripping common leading indentation
    pub fn write_descriptor(&self, content: &str) -> PathBuf {
        let path = self.path().join("descriptor.toml");
        fs::write(&path, dedent(content)).unwrap();
        path
    }

    /// Write and load a descriptor against the built-in registry
    pub fn load_descriptor(&self, content: &str) -> ArtifactDescriptor {
        let path = self.write_descriptor(content);
        ArtifactDescriptor::from_file(&path, &ComponentRegistry::builtin()).unwrap()
    }
}

fn dedent(content: &str) -> String {
    let indent = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    content
        .lines()
        .map(|line| line.get(indent..).unwrap_or("").to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
