// src/error.rs

//! Error types for stagesplit
//!
//! Failures are split by who has to fix them: descriptor authors get
//! [`SchemaError`] and [`Error::UnresolvedExtends`], while
//! [`Error::MissingBasedirs`] and [`Error::UnmatchedFiles`] point at the
//! build tree itself.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid descriptor: {0}")]
    Schema(#[from] SchemaError),

    #[error("{source} (while loading descriptor from {})", .path.display())]
    Descriptor {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error(
        "The following components have non existing or circular extends: {}",
        join_display(.0, ", ")
    )]
    UnresolvedExtends(Vec<UnresolvedComponent>),

    #[error("{}", join_display(.0, "; "))]
    MissingBasedirs(Vec<MissingBasedir>),

    #[error(
        "Unmatched artifact files. To allow these, add an options.unmatched_exclude \
         list to the artifact descriptor: {}",
        join_display(.0, ", ")
    )]
    UnmatchedFiles(Vec<String>),

    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    #[error("Invalid artifact name: {0}")]
    InvalidArtifactName(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Path traversal detected: {0}")]
    PathTraversal(String),
}

impl Error {
    /// True for mistakes in the descriptor itself, as opposed to problems in
    /// the scanned build tree or the environment.
    pub fn is_authoring_error(&self) -> bool {
        matches!(
            self,
            Self::Schema(_) | Self::Descriptor { .. } | Self::UnresolvedExtends(_)
        )
    }
}

/// Malformed descriptor documents
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to parse descriptor: {0}")]
    Syntax(#[from] toml::de::Error),

    #[error("Descriptor contains illegal key: '{key}' in {context} (allowed: {})", .allowed.join(", "))]
    IllegalKey {
        key: String,
        context: String,
        allowed: Vec<String>,
    },

    #[error("Expected '{key}' to be a table")]
    ExpectedTable { key: String },

    #[error("Expected '{key}' to be a string or list of strings but got: {found}")]
    ExpectedStringOrList { key: String, found: String },

    #[error("Expected '{key}' to be a bool but got: {found}")]
    ExpectedBool { key: String, found: String },

    #[error("Expected 'optional' to be a bool, platform name or list of platform names but got: {found}")]
    InvalidOptional { found: String },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Invalid base directory '{relpath}': {reason}")]
    InvalidBasedir { relpath: String, reason: String },

    #[error("Component default '{0}' already defined")]
    DuplicateDefault(String),
}

/// A component that could not be ordered, with the extends it was waiting on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedComponent {
    pub name: String,
    pub unresolved: Vec<String>,
}

impl fmt::Display for UnresolvedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.name, self.unresolved.join("|"))
    }
}

/// A required base directory that does not exist under the scan root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingBasedir {
    pub component: String,
    pub basedir: String,
}

impl fmt::Display for MissingBasedir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Directory {} of {}: marked non-optional but does not exist",
            self.basedir, self.component
        )
    }
}

fn join_display<T: fmt::Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}
