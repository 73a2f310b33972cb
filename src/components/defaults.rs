// src/components/defaults.rs

//! Default patterns and extends chains for well-known component names
//!
//! The built-in registry layers each component on the previous one:
//!
//! | Component | Extends | Default includes |
//! |-----------|---------|------------------|
//! | `lib` | - | shared libraries (`.so`, `.dll`, `.dylib`) |
//! | `run` | `lib` | - (descriptors add executables explicitly) |
//! | `dbg` | `run` | `.build-id/**/*.debug` |
//! | `dev` | `dbg` | static libs, headers, cmake, pkgconfig, modulefiles |
//! | `doc` | `dev` | `**/share/doc/**` |
//!
//! A registry is an ordinary value. Pass [`ComponentRegistry::builtin`] to the
//! descriptor parser, or build a different one for tests.

use crate::error::SchemaError;
use serde::Serialize;

/// Defaults applied to a component by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentDefault {
    pub name: String,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub extends: Vec<String>,
}

impl ComponentDefault {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn includes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn extends<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extends = names.into_iter().map(Into::into).collect();
        self
    }
}

/// Immutable table of component defaults, in definition order
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    defaults: Vec<ComponentDefault>,
    empty: ComponentDefault,
}

impl ComponentRegistry {
    /// An empty registry (no well-known components)
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard lib -> run -> dbg -> dev -> doc chain
    pub fn builtin() -> Self {
        Self {
            defaults: builtin_defaults(),
            empty: ComponentDefault::default(),
        }
    }

    /// Add a default; each name can only be defined once
    pub fn define(&mut self, default: ComponentDefault) -> Result<(), SchemaError> {
        if self.contains(&default.name) {
            return Err(SchemaError::DuplicateDefault(default.name));
        }
        self.defaults.push(default);
        Ok(())
    }

    /// Builder form of [`define`](Self::define)
    pub fn with(mut self, default: ComponentDefault) -> Result<Self, SchemaError> {
        self.define(default)?;
        Ok(self)
    }

    /// Defaults for `name`; unknown names get an empty default
    pub fn get(&self, name: &str) -> &ComponentDefault {
        self.defaults
            .iter()
            .find(|d| d.name == name)
            .unwrap_or(&self.empty)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defaults.iter().any(|d| d.name == name)
    }

    /// Registered names in definition order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.defaults.iter().map(|d| d.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentDefault> {
        self.defaults.iter()
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}

fn builtin_defaults() -> Vec<ComponentDefault> {
    vec![
        // Shared libraries and anything needed to load them at runtime.
        // Descriptors include/exclude non-standard variations explicitly.
        ComponentDefault::new("lib").includes([
            "**/*.dll",
            "**/*.dylib",
            "**/*.dylib.*",
            "**/*.so",
            "**/*.so.*",
        ]),
        // Executables and tools not needed by library consumers. Descriptors
        // name their "bin" contents explicitly.
        ComponentDefault::new("run").extends(["lib"]),
        ComponentDefault::new("dbg")
            .includes([".build-id/**/*.debug"])
            .extends(["run"]),
        // Headers and cmake/pkgconfig trees without an explicit "include" or
        // "cmake" path component still need explicit includes.
        ComponentDefault::new("dev")
            .includes([
                "**/*.a",
                "**/*.lib",
                "**/cmake/**",
                "**/include/**",
                "**/share/modulefiles/**",
                "**/pkgconfig/**",
            ])
            .extends(["dbg"]),
        ComponentDefault::new("doc")
            .includes(["**/share/doc/**"])
            .extends(["dev"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_chain() {
        let registry = ComponentRegistry::builtin();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["lib", "run", "dbg", "dev", "doc"]);

        assert!(registry.get("lib").extends.is_empty());
        assert_eq!(registry.get("run").extends, vec!["lib"]);
        assert_eq!(registry.get("dbg").extends, vec!["run"]);
        assert_eq!(registry.get("dev").extends, vec!["dbg"]);
        assert_eq!(registry.get("doc").extends, vec!["dev"]);
    }

    #[test]
    fn test_builtin_names_are_distinct() {
        let mut rebuilt = ComponentRegistry::new();
        for default in builtin_defaults() {
            rebuilt.define(default).unwrap();
        }
        let names: Vec<&str> = rebuilt.names().collect();
        assert_eq!(names, ComponentRegistry::builtin().names().collect::<Vec<_>>());
    }

    #[test]
    fn test_builtin_patterns() {
        let registry = ComponentRegistry::builtin();
        assert!(registry.get("lib").includes.contains(&"**/*.so".to_string()));
        assert!(registry.get("run").includes.is_empty());
        assert!(registry.get("dev").includes.contains(&"**/include/**".to_string()));
        assert_eq!(registry.get("doc").includes, vec!["**/share/doc/**"]);
    }

    #[test]
    fn test_unknown_name_gets_empty_default() {
        let registry = ComponentRegistry::builtin();
        let extras = registry.get("extras");
        assert!(extras.includes.is_empty());
        assert!(extras.excludes.is_empty());
        assert!(extras.extends.is_empty());
        assert!(!registry.contains("extras"));
    }

    #[test]
    fn test_duplicate_define_rejected() {
        let mut registry = ComponentRegistry::new();
        registry.define(ComponentDefault::new("lib")).unwrap();
        let err = registry.define(ComponentDefault::new("lib")).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateDefault(name) if name == "lib"));
    }

    #[test]
    fn test_fabricated_registry() {
        let registry = ComponentRegistry::new()
            .with(ComponentDefault::new("base").includes(["**"]))
            .unwrap()
            .with(ComponentDefault::new("top").extends(["base"]))
            .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("top").extends, vec!["base"]);
    }
}
