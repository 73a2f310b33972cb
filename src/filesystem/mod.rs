// src/filesystem/mod.rs

//! Filesystem operations for stagesplit
//!
//! This module provides:
//! - Base directory scanning into memoized, restartable entry lists
//! - Copying selected entries into a destination tree
//! - Relative path normalization shared by descriptors and scans

mod copy;
pub mod path;
mod scan;

pub use copy::{CopyMethod, TreeCopier};
pub use scan::{BasedirScan, EntryKind, ScannedEntry};
