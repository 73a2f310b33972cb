// src/components/verify.rs

//! Post-classification checks
//!
//! Nothing here runs until every component has been populated, so a
//! problem in one component never hides the state of another. Each check
//! reports every offender at once.

use super::classifier::Classification;
use crate::descriptor::ArtifactDescriptor;
use crate::error::{Error, MissingBasedir, Result};
use tracing::{debug, warn};

impl Classification {
    /// Check required base directories, then unclaimed files
    ///
    /// Missing directories are reported first since they usually explain
    /// any coverage gap that follows.
    pub fn verify(&self, descriptor: &ArtifactDescriptor) -> Result<()> {
        let missing = self.required_missing(descriptor);
        if !missing.is_empty() {
            return Err(Error::MissingBasedirs(missing));
        }

        let rejected = self.rejected_unmatched(descriptor);
        if !rejected.is_empty() {
            return Err(Error::UnmatchedFiles(rejected));
        }

        debug!("Verification passed for {}", self.root().display());
        Ok(())
    }

    /// Non-optional base directories that do not exist, per component
    pub fn required_missing(&self, descriptor: &ArtifactDescriptor) -> Vec<MissingBasedir> {
        let mut missing = Vec::new();
        for component in descriptor.components() {
            for (relpath, basedir) in component.basedirs() {
                if !self.missing_basedirs().contains(relpath) {
                    continue;
                }
                if basedir.is_optional() {
                    debug!(
                        "Optional base directory {} of {} is missing",
                        relpath,
                        component.name()
                    );
                    continue;
                }
                missing.push(MissingBasedir {
                    component: component.name().to_string(),
                    basedir: relpath.clone(),
                });
            }
        }
        missing
    }

    /// Unclaimed files the unmatched policy does not accept, sorted
    pub fn rejected_unmatched(&self, descriptor: &ArtifactDescriptor) -> Vec<String> {
        let policy = descriptor.options().unmatched_policy();
        let rejected: Vec<String> = self
            .unmatched_files()
            .filter(|observed| policy.rejects(&observed.entry.relpath))
            .map(|observed| observed.entry.relpath.clone())
            .collect();
        if !rejected.is_empty() {
            warn!("{} unmatched files not covered by policy", rejected.len());
        }
        rejected
    }
}
