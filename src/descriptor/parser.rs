// src/descriptor/parser.rs

//! Parser for artifact descriptor TOML files.
//!
//! Every schema level has a fixed set of keys and anything else is rejected
//! with the offending key and the allowed set. Component tables are the one
//! open level: `extends` is the only scalar field and every other key must
//! be a base directory table.

use crate::components::{ComponentRegistry, MatchPredicate, UnmatchedPolicy};
use crate::error::{Error, Result, SchemaError};
use crate::filesystem::path::normalize_relpath;
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use toml::{Table, Value};

const DESCRIPTOR_KEYS: &[&str] = &["components", "options"];
const OPTIONS_KEYS: &[&str] = &["unmatched_include", "unmatched_exclude"];
const COMPONENT_FIELDS: &[&str] = &["extends"];
const BASEDIR_KEYS: &[&str] = &[
    "default_patterns",
    "exclude",
    "force_include",
    "include",
    "optional",
];

/// Whether a missing base directory is tolerated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Optional {
    /// Missing is always an error
    Never,
    /// Missing is never an error
    Always,
    /// Missing is tolerated on the listed platforms (lowercase names)
    OnPlatforms(BTreeSet<String>),
}

impl Optional {
    /// Evaluate against the platform this process runs on
    pub fn is_optional(&self) -> bool {
        current_platform_names()
            .iter()
            .any(|platform| self.applies_to(platform))
    }

    /// Evaluate against a given platform name (case-insensitive)
    pub fn applies_to(&self, platform: &str) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::OnPlatforms(platforms) => platforms.contains(&platform.to_lowercase()),
        }
    }

    fn from_value(value: Option<&Value>) -> std::result::Result<Self, SchemaError> {
        let platforms: Vec<&Value> = match value {
            None => return Ok(Self::Never),
            Some(Value::Boolean(true)) => return Ok(Self::Always),
            Some(Value::Boolean(false)) => return Ok(Self::Never),
            Some(v @ Value::String(_)) => vec![v],
            Some(Value::Array(items)) => items.iter().collect(),
            Some(other) => {
                return Err(SchemaError::InvalidOptional {
                    found: other.to_string(),
                });
            }
        };

        let mut set = BTreeSet::new();
        for platform in platforms {
            match platform {
                Value::String(name) => {
                    set.insert(name.to_lowercase());
                }
                other => {
                    return Err(SchemaError::InvalidOptional {
                        found: other.to_string(),
                    });
                }
            }
        }
        Ok(Self::OnPlatforms(set))
    }
}

/// Lowercase names this platform answers to in `optional` lists
///
/// Both the Rust target OS name and the conventional system name are
/// accepted, so `"darwin"` and `"macos"` both mean macOS.
pub fn current_platform_names() -> Vec<&'static str> {
    match std::env::consts::OS {
        "macos" => vec!["macos", "darwin"],
        other => vec![other],
    }
}

/// One base directory scanned on behalf of one component
#[derive(Debug, Clone)]
pub struct BasedirDescriptor {
    relpath: String,
    predicate: MatchPredicate,
    optional: Optional,
    default_patterns: bool,
}

impl BasedirDescriptor {
    fn from_table(
        component: &str,
        relpath: String,
        record: &Table,
        registry: &ComponentRegistry,
    ) -> std::result::Result<Self, SchemaError> {
        check_allowed_keys(
            record,
            BASEDIR_KEYS,
            &format!("base directory '{}' of component '{}'", relpath, component),
        )?;

        let optional = Optional::from_value(record.get("optional"))?;
        let default_patterns = match record.get("default_patterns") {
            None => true,
            Some(Value::Boolean(b)) => *b,
            Some(other) => {
                return Err(SchemaError::ExpectedBool {
                    key: "default_patterns".to_string(),
                    found: other.to_string(),
                });
            }
        };

        let defaults = registry.get(component);
        let mut includes = string_or_list("include", record.get("include"))?;
        let mut excludes = string_or_list("exclude", record.get("exclude"))?;
        let force_includes = string_or_list("force_include", record.get("force_include"))?;
        if default_patterns {
            includes.extend(defaults.includes.iter().cloned());
            excludes.extend(defaults.excludes.iter().cloned());
        }

        Ok(Self {
            relpath,
            predicate: MatchPredicate::new(&includes, &excludes, &force_includes)?,
            optional,
            default_patterns,
        })
    }

    /// Root-relative path of the directory
    pub fn relpath(&self) -> &str {
        &self.relpath
    }

    pub fn predicate(&self) -> &MatchPredicate {
        &self.predicate
    }

    pub fn optional(&self) -> &Optional {
        &self.optional
    }

    /// Whether a missing directory is tolerated on this platform
    pub fn is_optional(&self) -> bool {
        self.optional.is_optional()
    }

    pub fn uses_default_patterns(&self) -> bool {
        self.default_patterns
    }
}

/// A named component and the base directories it draws from
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    name: String,
    extends: Vec<String>,
    /// In declaration order, which decides precedence between base
    /// directories holding the same relpath
    basedirs: IndexMap<String, BasedirDescriptor>,
}

impl ComponentDescriptor {
    /// A component with no base directories and the registry's extends
    pub fn empty(name: &str, registry: &ComponentRegistry) -> Self {
        Self {
            name: name.to_string(),
            extends: registry.get(name).extends.clone(),
            basedirs: IndexMap::new(),
        }
    }

    fn from_table(
        name: &str,
        record: &Table,
        registry: &ComponentRegistry,
    ) -> std::result::Result<Self, SchemaError> {
        let mut component = Self::empty(name, registry);

        for (key, value) in record {
            if COMPONENT_FIELDS.contains(&key.as_str()) {
                // Only field today is "extends"; an explicit list replaces the
                // registry chain, even when empty.
                component.extends = string_or_list(key, Some(value))?;
                continue;
            }

            let Value::Table(basedir_record) = value else {
                let mut allowed: Vec<String> =
                    COMPONENT_FIELDS.iter().map(|k| k.to_string()).collect();
                allowed.push("<base directory table>".to_string());
                return Err(SchemaError::IllegalKey {
                    key: key.clone(),
                    context: format!("component '{}'", name),
                    allowed,
                });
            };

            let relpath =
                normalize_relpath(key).map_err(|e| SchemaError::InvalidBasedir {
                    relpath: key.clone(),
                    reason: e.to_string(),
                })?;
            if component.basedirs.contains_key(&relpath) {
                return Err(SchemaError::InvalidBasedir {
                    relpath: key.clone(),
                    reason: format!("duplicates '{}' in component '{}'", relpath, name),
                });
            }

            let basedir =
                BasedirDescriptor::from_table(name, relpath.clone(), basedir_record, registry)?;
            component.basedirs.insert(relpath, basedir);
        }

        Ok(component)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Components this one layers on top of
    pub fn extends(&self) -> &[String] {
        &self.extends
    }

    /// Base directories keyed by root-relative path, in declaration order
    pub fn basedirs(&self) -> &IndexMap<String, BasedirDescriptor> {
        &self.basedirs
    }

    pub fn basedir(&self, relpath: &str) -> Option<&BasedirDescriptor> {
        self.basedirs.get(relpath)
    }
}

/// Descriptor-wide options
#[derive(Debug, Clone, Default)]
pub struct OptionsDescriptor {
    unmatched: UnmatchedPolicy,
}

impl OptionsDescriptor {
    fn from_table(record: &Table) -> std::result::Result<Self, SchemaError> {
        check_allowed_keys(record, OPTIONS_KEYS, "options")?;
        let includes = string_or_list("unmatched_include", record.get("unmatched_include"))?;
        let excludes = string_or_list("unmatched_exclude", record.get("unmatched_exclude"))?;
        Ok(Self {
            unmatched: UnmatchedPolicy::new(&includes, &excludes)?,
        })
    }

    /// Policy applied to files no component claimed
    pub fn unmatched_policy(&self) -> &UnmatchedPolicy {
        &self.unmatched
    }
}

/// A fully resolved artifact descriptor
///
/// Every registry name is present as a component, so default extends chains
/// always resolve even when the document only mentions some of them.
#[derive(Debug, Clone)]
pub struct ArtifactDescriptor {
    components: BTreeMap<String, ComponentDescriptor>,
    options: OptionsDescriptor,
}

impl ArtifactDescriptor {
    /// Load a descriptor from a TOML file
    pub fn from_file(path: &Path, registry: &ComponentRegistry) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_str(&content, registry).map_err(|source| Error::Descriptor {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a descriptor from a TOML string
    pub fn parse(content: &str, registry: &ComponentRegistry) -> Result<Self> {
        Ok(Self::parse_str(content, registry)?)
    }

    fn parse_str(
        content: &str,
        registry: &ComponentRegistry,
    ) -> std::result::Result<Self, SchemaError> {
        let table: Table = toml::from_str(content)?;
        Self::from_table(&table, registry)
    }

    /// Build a descriptor from an already-loaded document
    pub fn from_table(
        record: &Table,
        registry: &ComponentRegistry,
    ) -> std::result::Result<Self, SchemaError> {
        check_allowed_keys(record, DESCRIPTOR_KEYS, "descriptor")?;

        let options = match record.get("options") {
            None => OptionsDescriptor::default(),
            Some(Value::Table(options)) => OptionsDescriptor::from_table(options)?,
            Some(_) => {
                return Err(SchemaError::ExpectedTable {
                    key: "options".to_string(),
                });
            }
        };

        let mut components = BTreeMap::new();
        match record.get("components") {
            None => {}
            Some(Value::Table(records)) => {
                for (name, value) in records {
                    let Value::Table(component_record) = value else {
                        return Err(SchemaError::ExpectedTable {
                            key: format!("components.{}", name),
                        });
                    };
                    let component =
                        ComponentDescriptor::from_table(name, component_record, registry)?;
                    components.insert(name.clone(), component);
                }
            }
            Some(_) => {
                return Err(SchemaError::ExpectedTable {
                    key: "components".to_string(),
                });
            }
        }

        for name in registry.names() {
            if !components.contains_key(name) {
                components.insert(name.to_string(), ComponentDescriptor::empty(name, registry));
            }
        }

        Ok(Self {
            components,
            options,
        })
    }

    pub fn component(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.components.get(name)
    }

    /// All components, ordered by name
    pub fn components(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.components.values()
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn options(&self) -> &OptionsDescriptor {
        &self.options
    }
}

fn check_allowed_keys(
    record: &Table,
    allowed: &[&str],
    context: &str,
) -> std::result::Result<(), SchemaError> {
    for key in record.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(SchemaError::IllegalKey {
                key: key.clone(),
                context: context.to_string(),
                allowed: allowed.iter().map(|k| k.to_string()).collect(),
            });
        }
    }
    Ok(())
}

/// Accept a string, a list of strings, or nothing
fn string_or_list(key: &str, value: Option<&Value>) -> std::result::Result<Vec<String>, SchemaError> {
    let expected = |found: &Value| SchemaError::ExpectedStringOrList {
        key: key.to_string(),
        found: found.to_string(),
    };

    match value {
        None => Ok(Vec::new()),
        Some(Value::String(s)) if s.is_empty() => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(vec![s.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(expected(other)),
            })
            .collect(),
        Some(other) => Err(expected(other)),
    }
}
