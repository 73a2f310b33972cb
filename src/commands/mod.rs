// src/commands/mod.rs
//! Command handlers for the stagesplit CLI

mod classify;
mod info;
mod split;

// Re-export all command handlers
pub use classify::{cmd_classify, cmd_verify};
pub use info::{cmd_defaults, cmd_manifest};
pub use split::cmd_split;

use crate::cli::TreeArgs;
use anyhow::{Context, Result};
use stagesplit::{classify, ArtifactDescriptor, Classification, ComponentRegistry};

/// Load the descriptor and classify the tree it describes
fn load_and_classify(tree: &TreeArgs) -> Result<(ArtifactDescriptor, Classification)> {
    let registry = ComponentRegistry::builtin();
    let descriptor = ArtifactDescriptor::from_file(&tree.descriptor, &registry)
        .with_context(|| format!("Failed to load descriptor {}", tree.descriptor.display()))?;

    if !tree.root.is_dir() {
        anyhow::bail!("Root directory not found: {}", tree.root.display());
    }

    let classification = classify(&descriptor, &tree.root)
        .with_context(|| format!("Failed to classify {}", tree.root.display()))?;
    Ok((descriptor, classification))
}
