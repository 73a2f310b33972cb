// src/commands/classify.rs

//! Classification and verification commands

use super::load_and_classify;
use crate::cli::TreeArgs;
use anyhow::{Context, Result};
use stagesplit::ClassificationReport;
use tracing::{info, warn};

/// Classify a tree and print the report
pub fn cmd_classify(tree: &TreeArgs, json: bool) -> Result<()> {
    let (descriptor, classification) = load_and_classify(tree)?;
    let report = ClassificationReport::new(&classification, &descriptor);
    if !report.is_clean() {
        warn!(
            "{} unmatched files would fail verification",
            report.unmatched.len()
        );
    }

    if json {
        let output = report.to_json().context("Failed to serialize report")?;
        println!("{}", output);
    } else {
        print!("{}", report);
    }

    Ok(())
}

/// Classify a tree and fail unless it verifies cleanly
pub fn cmd_verify(tree: &TreeArgs) -> Result<()> {
    let (descriptor, classification) = load_and_classify(tree)?;
    classification
        .verify(&descriptor)
        .with_context(|| format!("Verification failed for {}", tree.root.display()))?;

    let claimed = classification.matched_relpaths().len();
    info!("Verified {}", tree.root.display());
    println!(
        "OK: {} paths claimed across {} components",
        claimed,
        classification.order().len()
    );
    Ok(())
}
