// src/components/filters.rs

//! Include/exclude pattern matching for component classification
//!
//! Patterns are globs over `/`-separated relative paths:
//!
//! - `*` - matches any sequence of characters within a path segment
//! - `**` - matches any sequence of path segments, including none
//! - `?` - matches any single character except `/`
//!
//! # Match Priority
//!
//! A [`MatchPredicate`] claims a path when any force-include pattern matches,
//! or when at least one include pattern matches and no exclude pattern does.
//! Force-include is the only way to override an exclude.

use crate::error::SchemaError;
use glob::MatchOptions;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A single compiled glob pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    glob: String,
    compiled: glob::Pattern,
}

impl Pattern {
    /// Compile a glob, failing with the offending pattern on bad syntax
    pub fn new(glob: impl Into<String>) -> Result<Self, SchemaError> {
        let glob = glob.into();
        let compiled = glob::Pattern::new(&glob).map_err(|e| SchemaError::InvalidPattern {
            pattern: glob.clone(),
            message: e.msg.to_string(),
        })?;
        Ok(Self { glob, compiled })
    }

    /// The source text of the pattern
    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// Check if this pattern matches a relative path
    pub fn matches(&self, relpath: &str) -> bool {
        self.compiled.matches_with(relpath, MATCH_OPTIONS)
    }
}

/// An ordered list of patterns
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<Pattern>,
}

impl PatternList {
    /// Compile every glob in order
    pub fn compile<S: AsRef<str>>(globs: &[S]) -> Result<Self, SchemaError> {
        let patterns = globs
            .iter()
            .map(|g| Pattern::new(g.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// True if any pattern matches
    pub fn matches_any(&self, relpath: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(relpath))
    }

    /// The source globs, in order
    pub fn globs(&self) -> Vec<&str> {
        self.patterns.iter().map(Pattern::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Decides whether a base directory entry belongs to a component
#[derive(Debug, Clone, Default)]
pub struct MatchPredicate {
    includes: PatternList,
    excludes: PatternList,
    force_includes: PatternList,
}

impl MatchPredicate {
    pub fn new<S: AsRef<str>>(
        includes: &[S],
        excludes: &[S],
        force_includes: &[S],
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            includes: PatternList::compile(includes)?,
            excludes: PatternList::compile(excludes)?,
            force_includes: PatternList::compile(force_includes)?,
        })
    }

    pub fn matches(&self, relpath: &str) -> bool {
        if self.force_includes.matches_any(relpath) {
            return true;
        }
        self.includes.matches_any(relpath) && !self.excludes.matches_any(relpath)
    }

    pub fn includes(&self) -> &PatternList {
        &self.includes
    }

    pub fn excludes(&self) -> &PatternList {
        &self.excludes
    }

    pub fn force_includes(&self) -> &PatternList {
        &self.force_includes
    }
}

/// Global policy for files no component claimed
///
/// An empty include list covers every file, so by default any leftover is
/// a failure until it is listed in `unmatched_exclude`.
#[derive(Debug, Clone, Default)]
pub struct UnmatchedPolicy {
    includes: PatternList,
    excludes: PatternList,
}

impl UnmatchedPolicy {
    pub fn new<S: AsRef<str>>(includes: &[S], excludes: &[S]) -> Result<Self, SchemaError> {
        Ok(Self {
            includes: PatternList::compile(includes)?,
            excludes: PatternList::compile(excludes)?,
        })
    }

    /// True if an unmatched file at `relpath` must fail verification
    pub fn rejects(&self, relpath: &str) -> bool {
        let covered = self.includes.is_empty() || self.includes.matches_any(relpath);
        covered && !self.excludes.matches_any(relpath)
    }

    pub fn includes(&self) -> &PatternList {
        &self.includes
    }

    pub fn excludes(&self) -> &PatternList {
        &self.excludes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(glob: &str) -> Pattern {
        Pattern::new(glob).unwrap()
    }

    // ====================
    // Glob matching tests
    // ====================

    #[test]
    fn test_glob_exact() {
        assert!(pattern("bin/foo").matches("bin/foo"));
        assert!(!pattern("bin/foo").matches("bin/bar"));
    }

    #[test]
    fn test_glob_single_star_stays_in_segment() {
        assert!(pattern("lib/*.so").matches("lib/x.so"));
        assert!(!pattern("lib/*.so").matches("lib/sub/x.so"));
        assert!(!pattern("*.so").matches("lib/x.so"));
    }

    #[test]
    fn test_glob_double_star_crosses_separators() {
        assert!(pattern("**/*.so").matches("x.so"));
        assert!(pattern("**/*.so").matches("lib/x.so"));
        assert!(pattern("**/*.so").matches("lib/llvm/lib/x.so"));
        assert!(pattern("include/**").matches("include/a/b/c.h"));
    }

    #[test]
    fn test_glob_double_star_middle() {
        assert!(pattern("**/cmake/**").matches("lib/cmake/foo/fooConfig.cmake"));
        assert!(pattern(".build-id/**/*.debug").matches(".build-id/ab/cdef.debug"));
        assert!(pattern("**/share/doc/**").matches("share/doc/foo/README"));
    }

    #[test]
    fn test_glob_versioned_so() {
        assert!(pattern("**/*.so.*").matches("lib/libfoo.so.1.2"));
        assert!(!pattern("**/*.so").matches("lib/libfoo.so.1"));
    }

    #[test]
    fn test_glob_question_mark() {
        assert!(pattern("bin/fo?").matches("bin/foo"));
        assert!(!pattern("bin/fo?").matches("bin/fooo"));
    }

    #[test]
    fn test_invalid_pattern_names_glob() {
        let err = Pattern::new("lib/[abc").unwrap_err();
        assert!(err.to_string().contains("lib/[abc"));
    }

    // ====================
    // MatchPredicate tests
    // ====================

    #[test]
    fn test_predicate_include_exclude() {
        let pred = MatchPredicate::new(&["bin/*"], &["bin/xyz.exe"], &[]).unwrap();
        assert!(pred.matches("bin/abc.exe"));
        assert!(!pred.matches("bin/xyz.exe"));
        assert!(!pred.matches("lib/abc.so"));
    }

    #[test]
    fn test_predicate_no_includes_matches_nothing() {
        let pred = MatchPredicate::new::<&str>(&[], &[], &[]).unwrap();
        assert!(!pred.matches("anything"));
    }

    #[test]
    fn test_predicate_force_include_beats_exclude() {
        let pred = MatchPredicate::new(&["**"], &["**/*.pdb"], &["bin/keep.pdb"]).unwrap();
        assert!(pred.matches("bin/keep.pdb"));
        assert!(!pred.matches("bin/other.pdb"));
    }

    #[test]
    fn test_predicate_force_include_without_include() {
        let pred = MatchPredicate::new(&[], &[], &["share/extra/**"]).unwrap();
        assert!(pred.matches("share/extra/data.bin"));
        assert!(!pred.matches("share/other/data.bin"));
    }

    #[test]
    fn test_predicate_keeps_pattern_order() {
        let pred = MatchPredicate::new(&["b/**", "a/**"], &[], &[]).unwrap();
        assert_eq!(pred.includes().globs(), vec!["b/**", "a/**"]);
    }

    // ====================
    // UnmatchedPolicy tests
    // ====================

    #[test]
    fn test_unmatched_policy_default_rejects_everything() {
        let policy = UnmatchedPolicy::default();
        assert!(policy.rejects("bin/xyz.exe"));
    }

    #[test]
    fn test_unmatched_policy_exclude_accepts() {
        let policy = UnmatchedPolicy::new(&[], &["bin/xyz.exe"]).unwrap();
        assert!(!policy.rejects("bin/xyz.exe"));
        assert!(policy.rejects("bin/abc.exe"));
    }

    #[test]
    fn test_unmatched_policy_include_narrows() {
        let policy = UnmatchedPolicy::new(&["lib/**"], &[]).unwrap();
        assert!(policy.rejects("lib/stray.txt"));
        assert!(!policy.rejects("tmp/stray.txt"));
    }
}
