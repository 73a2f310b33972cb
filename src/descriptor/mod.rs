// src/descriptor/mod.rs

//! Artifact descriptors - which components exist and what they claim
//!
//! A descriptor is a TOML document naming components, the base directories
//! each one scans, and the patterns that govern inclusion. Most tables can
//! be left blank because the [`ComponentRegistry`](crate::components::ComponentRegistry)
//! supplies per-component defaults; local deviations are spelled out.
//!
//! # Example descriptor.toml
//!
//! ```toml
//! [options]
//! # Files nobody claims are an error unless listed here
//! unmatched_exclude = ["bin/xyz.exe"]
//!
//! [components.lib."a/stage"]
//!
//! [components.run."a/stage"]
//! include = "bin/*.exe"
//! exclude = ["bin/def.exe", "bin/xyz.exe"]
//!
//! [components.dev."a/stage"]
//! include = "share/myproj/*.cmake"
//! force_include = "include/generated/**"
//!
//! # Only built on some platforms
//! [components.lib."b/stage"]
//! optional = ["windows"]
//! ```
//!
//! # Base directory keys
//!
//! | Key | Type | Meaning |
//! |-----|------|---------|
//! | `include` | str or list | patterns claimed by this component |
//! | `exclude` | str or list | patterns never claimed (unless force-included) |
//! | `force_include` | str or list | patterns claimed even when excluded |
//! | `default_patterns` | bool (default true) | append the registry's patterns |
//! | `optional` | bool, platform or list of platforms | tolerate a missing directory |

mod parser;

pub use parser::{
    current_platform_names, ArtifactDescriptor, BasedirDescriptor, ComponentDescriptor,
    Optional, OptionsDescriptor,
};
