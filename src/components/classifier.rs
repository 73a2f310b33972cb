// src/components/classifier.rs

//! Classification of a staged install tree into components
//!
//! Components are populated in extends order. Each one starts from the
//! paths already claimed by everything it extends, walks its base
//! directories, and claims whatever its predicate accepts among the paths
//! nobody below it has taken. Base directory walks are memoized so a
//! directory shared by the whole chain is read from disk once.
//!
//! Claims are keyed by the path relative to its base directory, so a file
//! claimed by `lib` under `a/stage` also shadows the same relpath when `dev`
//! scans `b/stage`. Packaging trees lay base directories over the same
//! prefix, which makes these the same installed file.

use super::graph::ExtendsGraph;
use crate::descriptor::{ArtifactDescriptor, ComponentDescriptor};
use crate::error::Result;
use crate::filesystem::path::safe_join;
use crate::filesystem::{BasedirScan, ScannedEntry};
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What one component ended up owning
#[derive(Debug, Clone)]
pub struct ComponentContents {
    name: String,
    /// Own matches plus everything inherited through extends
    claimed: BTreeSet<String>,
    /// Own matches per base directory, in declaration order
    basedir_contents: IndexMap<String, Vec<ScannedEntry>>,
}

impl ComponentContents {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            claimed: BTreeSet::new(),
            basedir_contents: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every relpath claimed by this component or anything it extends
    pub fn claimed_relpaths(&self) -> &BTreeSet<String> {
        &self.claimed
    }

    /// Base directories this component declared, including empty and
    /// missing ones, in declaration order
    pub fn basedirs(&self) -> impl Iterator<Item = &str> {
        self.basedir_contents.keys().map(String::as_str)
    }

    /// Entries this component matched itself under `basedir`
    pub fn basedir_entries(&self, basedir: &str) -> &[ScannedEntry] {
        self.basedir_contents
            .get(basedir)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Relpaths matched by this component itself (not inherited)
    pub fn own_relpaths(&self) -> BTreeSet<&str> {
        self.basedir_contents
            .values()
            .flatten()
            .map(|e| e.relpath.as_str())
            .collect()
    }

    /// Number of entries this component matched itself
    pub fn own_count(&self) -> usize {
        self.basedir_contents.values().map(Vec::len).sum()
    }
}

/// First sighting of a relpath during classification
#[derive(Debug, Clone)]
pub struct ObservedEntry {
    pub entry: ScannedEntry,
    /// Component that was being populated when the path was first seen
    pub component: String,
    /// Base directory it was seen under
    pub basedir: String,
}

/// The result of classifying one root directory
#[derive(Debug)]
pub struct Classification {
    root: PathBuf,
    order: Vec<String>,
    components: BTreeMap<String, ComponentContents>,
    observed: BTreeMap<String, ObservedEntry>,
    matched: BTreeSet<String>,
    missing_basedirs: BTreeSet<String>,
    scans: BTreeMap<String, BasedirScan>,
}

impl Classification {
    /// The root every base directory is relative to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Component names in the order they were populated
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn component(&self, name: &str) -> Option<&ComponentContents> {
        self.components.get(name)
    }

    /// Components in population order
    pub fn components(&self) -> impl Iterator<Item = &ComponentContents> {
        self.order.iter().filter_map(|name| self.components.get(name))
    }

    /// Every path seen in any base directory, with where it was first seen
    pub fn observed(&self) -> impl Iterator<Item = &ObservedEntry> {
        self.observed.values()
    }

    /// Paths claimed by some component
    pub fn matched_relpaths(&self) -> &BTreeSet<String> {
        &self.matched
    }

    /// Observed non-directory entries no component claimed, by relpath
    pub fn unmatched_files(&self) -> impl Iterator<Item = &ObservedEntry> {
        self.observed
            .iter()
            .filter(|(relpath, observed)| {
                !observed.entry.is_dir() && !self.matched.contains(relpath.as_str())
            })
            .map(|(_, observed)| observed)
    }

    /// Base directories that did not exist under the root
    pub fn missing_basedirs(&self) -> &BTreeSet<String> {
        &self.missing_basedirs
    }

    /// Number of distinct base directories walked
    pub fn scanned_basedir_count(&self) -> usize {
        self.scans.len()
    }
}

/// Classify every file under `root` into the descriptor's components
///
/// Fails before touching the filesystem if the extends graph cannot be
/// ordered. Missing base directories are recorded, not raised; see
/// [`Classification::verify`].
pub fn classify(descriptor: &ArtifactDescriptor, root: &Path) -> Result<Classification> {
    let order = ExtendsGraph::from_descriptor(descriptor).resolve_order()?;
    debug!("Component order: {}", order.join(" -> "));

    let mut classifier = Classifier::new(root);
    for name in &order {
        // Every ordered name came out of the descriptor
        if let Some(component) = descriptor.component(name) {
            classifier.populate(component)?;
        }
    }

    let Classifier {
        root,
        scans,
        components,
        observed,
        matched,
        missing_basedirs,
    } = classifier;

    let scans = scans
        .into_iter()
        .filter_map(|(relpath, scan)| scan.map(|s| (relpath, s)))
        .collect();

    Ok(Classification {
        root,
        order,
        components,
        observed,
        matched,
        missing_basedirs,
        scans,
    })
}

/// Mutable state while components are populated one by one
struct Classifier {
    root: PathBuf,
    /// `None` marks a base directory found missing
    scans: BTreeMap<String, Option<BasedirScan>>,
    components: BTreeMap<String, ComponentContents>,
    observed: BTreeMap<String, ObservedEntry>,
    matched: BTreeSet<String>,
    missing_basedirs: BTreeSet<String>,
}

impl Classifier {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            scans: BTreeMap::new(),
            components: BTreeMap::new(),
            observed: BTreeMap::new(),
            matched: BTreeSet::new(),
            missing_basedirs: BTreeSet::new(),
        }
    }

    fn populate(&mut self, component: &ComponentDescriptor) -> Result<()> {
        let mut contents = ComponentContents::new(component.name());

        for extended in component.extends() {
            if let Some(base) = self.components.get(extended) {
                contents.claimed.extend(base.claimed.iter().cloned());
            }
        }
        let inherited = contents.claimed.len();

        for (relpath, basedir) in component.basedirs() {
            self.ensure_scanned(relpath)?;
            let mut own = Vec::new();

            if let Some(Some(scan)) = self.scans.get(relpath) {
                for entry in scan.entries() {
                    if contents.claimed.contains(&entry.relpath) {
                        continue;
                    }
                    self.observed
                        .entry(entry.relpath.clone())
                        .or_insert_with(|| ObservedEntry {
                            entry: entry.clone(),
                            component: component.name().to_string(),
                            basedir: relpath.clone(),
                        });
                    if basedir.predicate().matches(&entry.relpath) {
                        self.matched.insert(entry.relpath.clone());
                        contents.claimed.insert(entry.relpath.clone());
                        own.push(entry.clone());
                    }
                }
            }

            contents.basedir_contents.insert(relpath.clone(), own);
        }

        info!(
            "Component {}: {} entries claimed ({} inherited) from {} base directories",
            component.name(),
            contents.own_count(),
            inherited,
            contents.basedir_contents.len()
        );
        self.components.insert(component.name().to_string(), contents);
        Ok(())
    }

    /// Walk a base directory the first time it is referenced
    fn ensure_scanned(&mut self, relpath: &str) -> Result<()> {
        if self.scans.contains_key(relpath) {
            return Ok(());
        }

        let full_path = safe_join(&self.root, relpath)?;
        let scan = if full_path.is_dir() {
            Some(BasedirScan::walk(&full_path)?)
        } else {
            if full_path.exists() {
                warn!("Base directory {} is not a directory", full_path.display());
            } else {
                debug!("Base directory {} does not exist", full_path.display());
            }
            self.missing_basedirs.insert(relpath.to_string());
            None
        };

        self.scans.insert(relpath.to_string(), scan);
        Ok(())
    }
}
