// src/components/mod.rs

//! Component model for staged build trees
//!
//! A component is a named slice of a staged install tree. Components are
//! layered through `extends`: a component never claims a path that any
//! component beneath it already claimed, so files land in the lowest layer
//! that wants them.
//!
//! # Built-in Components
//!
//! | Component | Extends | Typical contents |
//! |-----------|---------|------------------|
//! | `lib` | - | shared libraries |
//! | `run` | `lib` | executables and runtime data |
//! | `dbg` | `run` | split debug info |
//! | `dev` | `dbg` | headers, static libs, cmake and pkgconfig files |
//! | `doc` | `dev` | documentation |
//!
//! # Usage
//!
//! ```no_run
//! use stagesplit::components::{classify, ComponentRegistry};
//! use stagesplit::descriptor::ArtifactDescriptor;
//! use std::path::Path;
//!
//! # fn main() -> stagesplit::Result<()> {
//! let registry = ComponentRegistry::builtin();
//! let descriptor = ArtifactDescriptor::from_file(Path::new("descriptor.toml"), &registry)?;
//! let result = classify(&descriptor, Path::new("build/mylib"))?;
//! result.verify(&descriptor)?;
//!
//! for component in result.components() {
//!     println!("{}: {} entries", component.name(), component.own_count());
//! }
//! # Ok(())
//! # }
//! ```

mod classifier;
mod defaults;
mod filters;
mod graph;
mod verify;

pub use classifier::{classify, Classification, ComponentContents, ObservedEntry};
pub use defaults::{ComponentDefault, ComponentRegistry};
pub use filters::{MatchPredicate, Pattern, PatternList, UnmatchedPolicy};
pub use graph::ExtendsGraph;
