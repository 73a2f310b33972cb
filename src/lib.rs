// src/lib.rs

//! stagesplit - split staged build trees into layered components
//!
//! A build stages its install tree on disk; a TOML descriptor says which
//! base directories of that tree belong to which components and with what
//! patterns. stagesplit classifies every file into at most one component,
//! checks that nothing was left behind by accident, and writes each
//! component out for packaging.
//!
//! # Architecture
//!
//! - Descriptor: strict TOML schema merged with per-component defaults
//! - Extends graph: components are populated bottom-up; lower layers win
//! - Memoized scans: each base directory is walked once per run
//! - Verification: missing directories and unclaimed files are hard errors
//! - Artifacts: one directory per component with a base directory manifest

pub mod artifact;
pub mod components;
pub mod descriptor;
mod error;
pub mod filesystem;
pub mod report;

pub use artifact::{read_manifest, ArtifactName, ArtifactWriter, MANIFEST_FILENAME};
pub use components::{classify, Classification, ComponentRegistry};
pub use descriptor::ArtifactDescriptor;
pub use error::{Error, MissingBasedir, Result, SchemaError, UnresolvedComponent};
pub use report::ClassificationReport;
