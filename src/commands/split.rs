// src/commands/split.rs

//! Writing verified components to an output directory

use super::load_and_classify;
use crate::cli::TreeArgs;
use anyhow::{Context, Result};
use stagesplit::ArtifactWriter;
use std::path::Path;
use tracing::info;

/// Classify, verify, then write components
///
/// Nothing is written unless verification passes.
pub fn cmd_split(
    tree: &TreeArgs,
    output: &Path,
    name: &str,
    target_family: &str,
    components: &[String],
    hardlink: bool,
) -> Result<()> {
    let (descriptor, classification) = load_and_classify(tree)?;
    classification
        .verify(&descriptor)
        .with_context(|| format!("Verification failed for {}", tree.root.display()))?;

    info!("Writing components to {}", output.display());
    let written = ArtifactWriter::new()
        .with_hardlinks(hardlink)
        .write_all(&classification, output, name, target_family, components)
        .with_context(|| format!("Failed to write components to {}", output.display()))?;

    for artifact in &written {
        println!(
            "{}: {} files, {} bytes",
            artifact.path.display(),
            artifact.stats.files_copied + artifact.stats.files_linked,
            artifact.stats.bytes
        );
    }
    Ok(())
}
