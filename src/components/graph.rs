// src/components/graph.rs

//! Extends graph for component processing order
//!
//! A component may only be populated after every component it extends, so
//! that the paths they claimed are known. The order comes from a topological
//! sort (Kahn's algorithm). Cycles and references to components that do not
//! exist both show up the same way - nodes that never reach in-degree zero -
//! and are reported together.

use crate::descriptor::ArtifactDescriptor;
use crate::error::{Error, Result, UnresolvedComponent};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Directed graph: component -> components it extends
#[derive(Debug, Default)]
pub struct ExtendsGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl ExtendsGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for every component in a descriptor
    pub fn from_descriptor(descriptor: &ArtifactDescriptor) -> Self {
        let mut graph = Self::new();
        for component in descriptor.components() {
            graph.add_component(component.name(), component.extends());
        }
        graph
    }

    /// Add a component with the names it extends
    ///
    /// Extended names are not added as nodes; a name that is never added
    /// itself stays unresolved.
    pub fn add_component<S: AsRef<str>>(&mut self, name: &str, extends: &[S]) {
        let entry = self.edges.entry(name.to_string()).or_default();
        entry.extend(extends.iter().map(|s| s.as_ref().to_string()));
    }

    /// Compute the processing order (extended components first)
    ///
    /// Ties are broken by name so the order is stable across runs.
    pub fn resolve_order(&self) -> Result<Vec<String>> {
        let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        let mut in_degrees: BTreeMap<&str, usize> = BTreeMap::new();

        for (name, extends) in &self.edges {
            in_degrees.insert(name.as_str(), extends.len());
            for extended in extends {
                dependents
                    .entry(extended.as_str())
                    .or_default()
                    .push(name.as_str());
            }
        }

        let mut queue: VecDeque<&str> = in_degrees
            .iter()
            .filter(|&(_, deg)| *deg == 0)
            .map(|(name, _)| *name)
            .collect();
        let mut order = Vec::with_capacity(self.edges.len());

        while let Some(node) = queue.pop_front() {
            order.push(node.to_string());

            for dependent in dependents.get(node).into_iter().flatten() {
                if let Some(deg) = in_degrees.get_mut(dependent) {
                    *deg = deg.saturating_sub(1);
                    if *deg == 0 {
                        queue.push_back(*dependent);
                    }
                }
            }
        }

        if order.len() != self.edges.len() {
            let resolved: BTreeSet<&str> = order.iter().map(String::as_str).collect();
            let unresolved: Vec<UnresolvedComponent> = self
                .edges
                .iter()
                .filter(|(name, _)| !resolved.contains(name.as_str()))
                .map(|(name, extends)| UnresolvedComponent {
                    name: name.clone(),
                    unresolved: extends
                        .iter()
                        .filter(|e| !resolved.contains(e.as_str()))
                        .cloned()
                        .collect(),
                })
                .collect();
            return Err(Error::UnresolvedExtends(unresolved));
        }

        Ok(order)
    }
}
