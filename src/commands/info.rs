// src/commands/info.rs

//! Read-only informational commands

use anyhow::{Context, Result};
use stagesplit::components::ComponentDefault;
use stagesplit::{read_manifest, ArtifactName, ComponentRegistry};
use std::path::Path;

/// Print the built-in component defaults
pub fn cmd_defaults(json: bool) -> Result<()> {
    let registry = ComponentRegistry::builtin();

    if json {
        let defaults: Vec<&ComponentDefault> = registry.iter().collect();
        let output =
            serde_json::to_string_pretty(&defaults).context("Failed to serialize defaults")?;
        println!("{}", output);
        return Ok(());
    }

    for default in registry.iter() {
        print!("{}", default.name);
        if !default.extends.is_empty() {
            print!(" (extends {})", default.extends.join(", "));
        }
        println!();
        for pattern in &default.includes {
            println!("  include: {}", pattern);
        }
        for pattern in &default.excludes {
            println!("  exclude: {}", pattern);
        }
    }
    Ok(())
}

/// Print a written component's base directories
pub fn cmd_manifest(dir: &Path) -> Result<()> {
    let basedirs = read_manifest(dir)
        .with_context(|| format!("Failed to read manifest in {}", dir.display()))?;

    if let Some(name) = ArtifactName::from_path(dir) {
        println!(
            "# {} (component {}, target family {})",
            name.name, name.component, name.target_family
        );
    }
    for basedir in basedirs {
        println!("{}", basedir);
    }
    Ok(())
}
