// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: artifact descriptor
fn descriptor_arg() -> Arg {
    Arg::new("descriptor")
        .short('d')
        .long("descriptor")
        .value_name("PATH")
        .required(true)
        .help("Artifact descriptor (TOML)")
}

/// Common argument: staged tree root
fn root_arg() -> Arg {
    Arg::new("root")
        .short('r')
        .long("root")
        .value_name("DIR")
        .required(true)
        .help("Root directory the descriptor's base directories are relative to")
}

fn build_cli() -> Command {
    Command::new("stagesplit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Split staged build trees into layered components")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Show debug logging"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Only log warnings and errors"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("classify")
                .about("Classify the tree and print a report (never fails on coverage)")
                .arg(descriptor_arg())
                .arg(root_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the report as JSON"),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Classify and verify the tree")
                .arg(descriptor_arg())
                .arg(root_arg()),
        )
        .subcommand(
            Command::new("split")
                .about("Classify, verify and write components into an output directory")
                .arg(descriptor_arg())
                .arg(root_arg())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("DIR")
                        .required(true)
                        .help("Output directory; each component goes to NAME_COMPONENT_FAMILY"),
                )
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .required(true)
                        .help("Artifact name"),
                )
                .arg(
                    Arg::new("target_family")
                        .short('t')
                        .long("target-family")
                        .default_value("generic")
                        .help("Target family suffix"),
                )
                .arg(
                    Arg::new("component")
                        .short('c')
                        .long("component")
                        .action(ArgAction::Append)
                        .help("Only write these components (repeatable; default: all)"),
                )
                .arg(
                    Arg::new("hardlink")
                        .long("hardlink")
                        .action(ArgAction::SetTrue)
                        .help("Hardlink files instead of copying (falls back to copy)"),
                ),
        )
        .subcommand(
            Command::new("defaults")
                .about("Show the built-in component defaults")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print as JSON"),
                ),
        )
        .subcommand(
            Command::new("manifest")
                .about("Show the base directories listed in a written component")
                .arg(
                    Arg::new("dir")
                        .required(true)
                        .help("Component directory containing artifact_manifest.txt"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("stagesplit.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
