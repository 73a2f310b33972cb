// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the -v/-q defaults
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Classify { tree, json } => commands::cmd_classify(&tree, json),
        Commands::Verify { tree } => commands::cmd_verify(&tree),
        Commands::Split {
            tree,
            output,
            name,
            target_family,
            components,
            hardlink,
        } => commands::cmd_split(
            &tree,
            &output,
            &name,
            &target_family,
            &components,
            hardlink,
        ),
        Commands::Defaults { json } => commands::cmd_defaults(json),
        Commands::Manifest { dir } => commands::cmd_manifest(&dir),
    }
}
