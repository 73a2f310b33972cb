// src/artifact/mod.rs

//! Materializing classified components on disk
//!
//! Each component is written to its own destination directory with one
//! subtree per contributing base directory, plus an `artifact_manifest.txt`
//! listing those base directories. The manifest is what downstream
//! packaging reads to find the physical subtrees of a component.
//!
//! ```text
//! out/blas_lib_generic/
//! ├── artifact_manifest.txt      # "math-libs/BLAS/stage\n"
//! └── math-libs/BLAS/stage/
//!     └── lib/libblas.so
//! ```

mod name;

pub use name::ArtifactName;

use crate::components::{Classification, ComponentContents};
use crate::error::{Error, Result};
use crate::filesystem::path::safe_join;
use crate::filesystem::{CopyMethod, TreeCopier};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the per-component manifest file
pub const MANIFEST_FILENAME: &str = "artifact_manifest.txt";

/// Counts from writing one component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactStats {
    pub files_copied: usize,
    pub files_linked: usize,
    pub symlinks: usize,
    pub directories: usize,
    pub bytes: u64,
}

impl ArtifactStats {
    fn record(&mut self, method: CopyMethod, size: u64) {
        match method {
            CopyMethod::Copy => self.files_copied += 1,
            CopyMethod::Hardlink => self.files_linked += 1,
            CopyMethod::Symlink => self.symlinks += 1,
            CopyMethod::Directory => self.directories += 1,
        }
        if matches!(method, CopyMethod::Copy | CopyMethod::Hardlink) {
            self.bytes += size;
        }
    }

    /// Total entries written
    pub fn total(&self) -> usize {
        self.files_copied + self.files_linked + self.symlinks + self.directories
    }
}

/// A component written to disk
#[derive(Debug, Clone)]
pub struct WrittenArtifact {
    pub name: ArtifactName,
    pub path: PathBuf,
    pub stats: ArtifactStats,
}

/// Writes classified components into destination directories
#[derive(Debug, Clone, Default)]
pub struct ArtifactWriter {
    hardlink: bool,
}

impl ArtifactWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hardlink files from the build tree instead of copying
    pub fn with_hardlinks(mut self, hardlink: bool) -> Self {
        self.hardlink = hardlink;
        self
    }

    /// Write one component into `destdir`
    ///
    /// Existing files at the same relative paths are replaced; anything
    /// else already in `destdir` is kept.
    pub fn write_component(
        &self,
        classification: &Classification,
        component: &str,
        destdir: &Path,
    ) -> Result<ArtifactStats> {
        let contents = classification
            .component(component)
            .ok_or_else(|| Error::UnknownComponent(component.to_string()))?;

        fs::create_dir_all(destdir)?;
        let mut stats = ArtifactStats::default();

        for basedir in contents.basedirs() {
            let source_root = safe_join(classification.root(), basedir)?;
            let dest_root = safe_join(destdir, basedir)?;
            let copier = TreeCopier::new(&source_root, &dest_root).with_hardlinks(self.hardlink);

            for entry in contents.basedir_entries(basedir) {
                let method = copier.copy_entry(entry)?;
                stats.record(method, entry.size);
            }
        }

        write_manifest(contents, destdir)?;
        debug!(
            "Wrote component {} to {} ({} entries)",
            component,
            destdir.display(),
            stats.total()
        );
        Ok(stats)
    }

    /// Write components under `output_dir`, each in its own named directory
    ///
    /// An empty `components` slice writes every component in population
    /// order. Every component and artifact name is checked before the
    /// first one is written, so a bad selection leaves `output_dir` alone.
    pub fn write_all(
        &self,
        classification: &Classification,
        output_dir: &Path,
        name: &str,
        target_family: &str,
        components: &[String],
    ) -> Result<Vec<WrittenArtifact>> {
        let selected: Vec<&str> = if components.is_empty() {
            classification.order().iter().map(String::as_str).collect()
        } else {
            components.iter().map(String::as_str).collect()
        };

        let mut planned = Vec::with_capacity(selected.len());
        for component in selected {
            if classification.component(component).is_none() {
                return Err(Error::UnknownComponent(component.to_string()));
            }
            planned.push((component, ArtifactName::new(name, component, target_family)?));
        }

        let mut written = Vec::with_capacity(planned.len());
        for (component, artifact_name) in planned {
            let path = output_dir.join(artifact_name.dir_name());
            let stats = self.write_component(classification, component, &path)?;
            info!(
                "Wrote {} ({} files, {} bytes)",
                artifact_name,
                stats.files_copied + stats.files_linked,
                stats.bytes
            );
            written.push(WrittenArtifact {
                name: artifact_name,
                path,
                stats,
            });
        }
        Ok(written)
    }
}

/// Write the manifest for a component: one base directory per line, in
/// declaration order
///
/// A component without base directories still gets a manifest holding a
/// single newline.
fn write_manifest(contents: &ComponentContents, destdir: &Path) -> Result<()> {
    let mut manifest = contents.basedirs().collect::<Vec<_>>().join("\n");
    manifest.push('\n');
    fs::write(destdir.join(MANIFEST_FILENAME), manifest)?;
    Ok(())
}

/// Read the base directories listed in a materialized component's manifest
pub fn read_manifest(artifact_dir: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(artifact_dir.join(MANIFEST_FILENAME))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
