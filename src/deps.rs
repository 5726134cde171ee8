use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Task;

/// Reverse adjacency: dependency name -> names of tasks that declared it, in
/// the order they were declared. Each edge appears once.
///
/// Append-only. Edges survive completion of either endpoint.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyIndex {
    dependents: BTreeMap<String, Vec<String>>,
}

impl DependencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `dep -> task.name` for every declared dependency.
    pub fn record_edges(&mut self, task: &Task) {
        for dep in &task.dependencies {
            self.record_edge(dep, &task.name);
        }
    }

    /// Returns false if the edge was already present.
    pub fn record_edge(&mut self, dependency: &str, dependent: &str) -> bool {
        let dependents = self.dependents.entry(dependency.to_string()).or_default();
        if dependents.iter().any(|d| d == dependent) {
            return false;
        }
        dependents.push(dependent.to_string());
        true
    }

    /// Copy of `other` with duplicate edges collapsed, keeping first
    /// occurrence order.
    pub fn deduplicated(other: &DependencyIndex) -> Self {
        let mut index = Self::new();
        for (dependency, dependents) in other.iter() {
            for dependent in dependents {
                index.record_edge(dependency, dependent);
            }
        }
        index
    }

    pub fn dependents_of(&self, name: &str) -> Vec<String> {
        self.dependents.get(name).cloned().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.dependents
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn edge_count(&self) -> usize {
        self.dependents.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }
}
