// src/artifact/name.rs

//! Artifact naming: `{name}_{component}_{target_family}`
//!
//! The same triple names a materialized component directory and any archive
//! later made from it. None of the three parts may contain `_`, otherwise a
//! name like `a_b_dev_generic` would parse with every part shifted by one.

use crate::error::{Error, Result};
use crate::filesystem::path::sanitize_filename;
use std::fmt;
use std::path::Path;

/// Archive suffixes recognized when parsing filenames
const ARCHIVE_SUFFIXES: &[&str] = &[".tar.xz", ".tar.zst", ".tar.gz", ".zip"];

/// Identity of one component of one artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactName {
    pub name: String,
    pub component: String,
    pub target_family: String,
}

impl ArtifactName {
    /// Build a name, validating every part
    pub fn new(name: &str, component: &str, target_family: &str) -> Result<Self> {
        for part in [name, component, target_family] {
            validate_part(part)?;
        }
        Ok(Self {
            name: name.to_string(),
            component: component.to_string(),
            target_family: target_family.to_string(),
        })
    }

    /// Parse a directory name or archive filename
    ///
    /// Returns `None` if the stem is not exactly three non-empty parts.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let stem = ARCHIVE_SUFFIXES
            .iter()
            .find_map(|suffix| filename.strip_suffix(suffix))
            .unwrap_or(filename);

        let parts: Vec<&str> = stem.split('_').collect();
        let [name, component, target_family] = parts.as_slice() else {
            return None;
        };
        Self::new(name, component, target_family).ok()
    }

    /// Parse the final component of a path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(Self::from_filename)
    }

    /// Directory name used when the component is materialized
    pub fn dir_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.name, self.component, self.target_family)
    }
}

fn validate_part(part: &str) -> Result<()> {
    sanitize_filename(part)
        .map_err(|e| Error::InvalidArtifactName(format!("'{}': {}", part, e)))?;
    if part.contains('_') {
        return Err(Error::InvalidArtifactName(format!(
            "'{}' must not contain '_'",
            part
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_filename() {
        let an = ArtifactName::from_filename("name_component_generic.tar.xz").unwrap();
        assert_eq!(an.name, "name");
        assert_eq!(an.component, "component");
        assert_eq!(an.target_family, "generic");
    }

    #[test]
    fn test_from_filename_invalid() {
        assert!(ArtifactName::from_filename("invalid_name.zip").is_none());
        // Four parts would shift every field by one
        assert!(ArtifactName::from_filename("underscore_name_component_generic.tar.xz").is_none());
        assert!(ArtifactName::from_filename("name__generic").is_none());
    }

    #[test]
    fn test_from_path_dir_and_archive_equal() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("dir/name_component_generic");
        std::fs::create_dir_all(&dir).unwrap();
        let archive = temp_dir.path().join("other/name_component_generic.tar.xz");

        let an1 = ArtifactName::from_path(&dir).unwrap();
        let an2 = ArtifactName::from_path(&archive).unwrap();
        assert_eq!(an1, an2);
        assert_eq!(an1.dir_name(), "name_component_generic");
    }

    #[test]
    fn test_new_rejects_bad_parts() {
        assert!(ArtifactName::new("blas", "lib", "gfx94X").is_ok());
        assert!(matches!(
            ArtifactName::new("my_lib", "lib", "generic"),
            Err(Error::InvalidArtifactName(_))
        ));
        assert!(ArtifactName::new("../x", "lib", "generic").is_err());
        assert!(ArtifactName::new("blas", "", "generic").is_err());
    }
}
