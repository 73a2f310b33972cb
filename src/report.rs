// src/report.rs

//! Serializable summary of a classification
//!
//! Used by `stagesplit classify` for both JSON and plain-text output.
//! Unmatched files accepted by the descriptor's unmatched policy are left
//! out entirely; they belong to no component and are not reported.

use crate::components::Classification;
use crate::descriptor::ArtifactDescriptor;
use serde::Serialize;
use indexmap::IndexMap;
use std::fmt;
use std::path::PathBuf;

/// One component's share of the tree
#[derive(Debug, Clone, Serialize)]
pub struct ComponentReport {
    pub name: String,
    pub extends: Vec<String>,
    /// Own matches per base directory, in declaration order
    pub basedirs: IndexMap<String, Vec<String>>,
    /// Own matches plus everything inherited
    pub claimed_count: usize,
}

/// An unmatched file the unmatched policy does not accept
#[derive(Debug, Clone, Serialize)]
pub struct UnmatchedReport {
    pub relpath: String,
    /// Component and base directory where the file was first seen
    pub component: String,
    pub basedir: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub root: PathBuf,
    pub order: Vec<String>,
    pub components: Vec<ComponentReport>,
    pub missing_basedirs: Vec<String>,
    pub unmatched: Vec<UnmatchedReport>,
}

impl ClassificationReport {
    pub fn new(classification: &Classification, descriptor: &ArtifactDescriptor) -> Self {
        let components = classification
            .components()
            .map(|contents| ComponentReport {
                name: contents.name().to_string(),
                extends: descriptor
                    .component(contents.name())
                    .map(|c| c.extends().to_vec())
                    .unwrap_or_default(),
                basedirs: contents
                    .basedirs()
                    .map(|basedir| {
                        let relpaths: Vec<String> = contents
                            .basedir_entries(basedir)
                            .iter()
                            .map(|e| e.relpath.clone())
                            .collect();
                        (basedir.to_string(), relpaths)
                    })
                    .collect(),
                claimed_count: contents.claimed_relpaths().len(),
            })
            .collect();

        let policy = descriptor.options().unmatched_policy();
        let unmatched = classification
            .unmatched_files()
            .filter(|observed| policy.rejects(&observed.entry.relpath))
            .map(|observed| UnmatchedReport {
                relpath: observed.entry.relpath.clone(),
                component: observed.component.clone(),
                basedir: observed.basedir.clone(),
            })
            .collect();

        Self {
            root: classification.root().to_path_buf(),
            order: classification.order().to_vec(),
            components,
            missing_basedirs: classification.missing_basedirs().iter().cloned().collect(),
            unmatched,
        }
    }

    /// True if nothing would fail verification on coverage
    pub fn is_clean(&self) -> bool {
        self.unmatched.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Root: {}", self.root.display())?;
        writeln!(f, "Order: {}", self.order.join(" -> "))?;

        for component in &self.components {
            let own: usize = component.basedirs.values().map(Vec::len).sum();
            write!(f, "\n[{}]", component.name)?;
            if !component.extends.is_empty() {
                write!(f, " extends {}", component.extends.join(", "))?;
            }
            writeln!(f, " - {} own, {} claimed", own, component.claimed_count)?;
            for (basedir, relpaths) in &component.basedirs {
                writeln!(f, "  {}/", basedir)?;
                for relpath in relpaths {
                    writeln!(f, "    {}", relpath)?;
                }
            }
        }

        if !self.missing_basedirs.is_empty() {
            writeln!(f, "\nMissing base directories:")?;
            for basedir in &self.missing_basedirs {
                writeln!(f, "  {}", basedir)?;
            }
        }

        if !self.unmatched.is_empty() {
            writeln!(f, "\nUnmatched files ({}):", self.unmatched.len())?;
            for unmatched in &self.unmatched {
                writeln!(
                    f,
                    "  {} (first seen in {} by {})",
                    unmatched.relpath, unmatched.basedir, unmatched.component
                )?;
            }
        }

        Ok(())
    }
}
