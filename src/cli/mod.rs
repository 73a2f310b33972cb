// src/cli/mod.rs
//! CLI definitions for stagesplit
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.
//!
//! - `classify` - Report which component owns each file
//! - `verify` - Fail on missing directories or unclaimed files
//! - `split` - Verify, then write each component out
//! - `defaults` - Show the built-in component defaults
//! - `manifest` - Show the base directories of a written component

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stagesplit")]
#[command(version)]
#[command(about = "Split staged build trees into layered components", long_about = None)]
pub struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Descriptor and tree shared by every classifying command
#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// Artifact descriptor (TOML)
    #[arg(short, long)]
    pub descriptor: PathBuf,

    /// Root directory the descriptor's base directories are relative to
    #[arg(short, long)]
    pub root: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify the tree and print a report (never fails on coverage)
    Classify {
        #[command(flatten)]
        tree: TreeArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify and verify the tree
    Verify {
        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Classify, verify and write components into an output directory
    Split {
        #[command(flatten)]
        tree: TreeArgs,

        /// Output directory; each component goes to NAME_COMPONENT_FAMILY
        #[arg(short, long)]
        output: PathBuf,

        /// Artifact name
        #[arg(short, long)]
        name: String,

        /// Target family suffix
        #[arg(short, long, default_value = "generic")]
        target_family: String,

        /// Only write these components (repeatable; default: all)
        #[arg(short, long = "component")]
        components: Vec<String>,

        /// Hardlink files instead of copying (falls back to copy)
        #[arg(long)]
        hardlink: bool,
    },

    /// Show the built-in component defaults
    Defaults {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the base directories listed in a written component
    Manifest {
        /// Component directory containing artifact_manifest.txt
        dir: PathBuf,
    },
}
