use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::CompletionRule;
use crate::deps::DependencyIndex;
use crate::error::{Result, TaskqError};
use crate::eval::{self, Evaluation, Executability};
use crate::model::{Task, normalize_dependencies, parse_name};
use crate::queue::PriorityQueue;

/// Outcome of a successful add: the stored task and whether it can already
/// be worked on. A task may be added while its dependencies are pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Added {
    #[serde(flatten)]
    pub task: Task,
    #[serde(flatten)]
    pub status: Executability,
}

/// Outcome of a successful completion plus a re-evaluation of what is left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub completed: String,
    #[serde(flatten)]
    pub remaining: Evaluation,
}

/// Pending tasks, completed names, the dependency index and the priority
/// queue. Every public operation leaves all four consistent with each other.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Keyed by sequence; the queue doubles as the name lookup.
    pending: BTreeMap<u64, Task>,
    completed: BTreeSet<String>,
    index: DependencyIndex,
    queue: PriorityQueue,
    next_sequence: u64,
    rule: CompletionRule,
}

impl Registry {
    pub fn new(rule: CompletionRule) -> Self {
        Self {
            rule,
            ..Self::default()
        }
    }

    /// Rebuild a registry from persisted parts. Sequences are assigned in the
    /// order `tasks` are given. Entries that would break name uniqueness are
    /// dropped.
    pub fn restore<C>(
        tasks: Vec<Task>,
        completed: C,
        index: DependencyIndex,
        rule: CompletionRule,
    ) -> Self
    where
        C: IntoIterator<Item = String>,
    {
        let mut registry = Self {
            completed: completed.into_iter().collect(),
            index: DependencyIndex::deduplicated(&index),
            rule,
            ..Self::default()
        };

        for mut task in tasks {
            if task.name.trim().is_empty() || registry.exists(&task.name) {
                warn!(task = %task.name, "skipping duplicate or unnamed task in snapshot");
                continue;
            }
            task.sequence = registry.next_sequence;
            registry.next_sequence += 1;
            registry.index.record_edges(&task);
            registry.queue.insert(&task.name, task.key());
            registry.pending.insert(task.sequence, task);
        }

        debug!(
            pending = registry.pending.len(),
            completed = registry.completed.len(),
            edges = registry.index.edge_count(),
            "registry restored"
        );
        registry
    }

    /// True if `name` is pending or completed.
    pub fn exists(&self, name: &str) -> bool {
        self.queue.contains(name) || self.completed.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        let (_, sequence) = self.queue.key_of(name)?;
        self.pending.get(&sequence)
    }

    pub fn is_completed(&self, name: &str) -> bool {
        self.completed.contains(name)
    }

    pub fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    pub fn dependencies(&self) -> &DependencyIndex {
        &self.index
    }

    /// Dependents of `name` in declaration order.
    pub fn dependents_of(&self, name: &str) -> Vec<String> {
        self.index.dependents_of(name)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn add(
        &mut self,
        name: &str,
        priority: i64,
        dependencies: Vec<String>,
        deadline: Option<NaiveDate>,
    ) -> Result<Added> {
        let name = parse_name(name)?;
        if self.exists(&name) {
            return Err(TaskqError::DuplicateName(name));
        }

        let dependencies = normalize_dependencies(dependencies);
        let unknown: Vec<String> = dependencies
            .iter()
            .filter(|dep| !self.exists(dep))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(TaskqError::UnknownDependency(unknown));
        }

        let task = Task {
            name,
            priority,
            dependencies,
            deadline,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;

        self.index.record_edges(&task);
        self.queue.insert(&task.name, task.key());
        self.pending.insert(task.sequence, task.clone());

        let status = eval::is_executable(&task, &self.completed);
        info!(
            task = %task.name,
            priority = task.priority,
            executable = status.executable,
            "task added"
        );
        Ok(Added { task, status })
    }

    /// Pending tasks by `(priority, sequence)` when `ordered`, otherwise in
    /// insertion order. Call again to restart.
    pub fn list_pending(&self, ordered: bool) -> Box<dyn Iterator<Item = &Task> + '_> {
        if ordered {
            Box::new(
                self.queue
                    .iter()
                    .filter_map(|name| self.get(name)),
            )
        } else {
            Box::new(self.pending.values())
        }
    }

    pub fn executability(&self, name: &str) -> Result<Executability> {
        let task = self
            .get(name)
            .ok_or_else(|| TaskqError::NotFound(name.to_string()))?;
        Ok(eval::is_executable(task, &self.completed))
    }

    pub fn evaluate_all(&self) -> Evaluation {
        eval::evaluate_all(self.list_pending(true), &self.completed)
    }

    /// Most urgent pending task whose dependencies are all completed.
    pub fn next_executable(&self) -> Option<&Task> {
        self.list_pending(true)
            .find(|task| eval::is_executable(task, &self.completed).executable)
    }

    /// Move `name` from pending to completed if the completion rule allows it.
    pub fn complete(&mut self, name: &str) -> Result<Completion> {
        let task = self
            .get(name)
            .ok_or_else(|| TaskqError::NotFound(name.to_string()))?;

        let status = eval::is_executable(task, &self.completed);
        if !status.executable {
            debug!(task = name, pending = ?status.pending_dependencies, "completion refused");
            return Err(TaskqError::UnmetDependencies(status.pending_dependencies));
        }

        let blocking = self.blocking_dependents(name);
        if !blocking.is_empty() {
            debug!(task = name, dependents = ?blocking, "completion refused");
            return Err(TaskqError::BlockedByDependents(blocking));
        }

        let task = self.remove(name)?;
        self.completed.insert(task.name.clone());
        info!(task = %task.name, "task completed");

        Ok(Completion {
            completed: task.name,
            remaining: self.evaluate_all(),
        })
    }

    /// Dependents that hold back the completion of `name` under the
    /// configured rule.
    fn blocking_dependents(&self, name: &str) -> Vec<String> {
        match self.rule {
            CompletionRule::DependentsFirst => self
                .index
                .dependents_of(name)
                .into_iter()
                .filter(|dependent| !self.completed.contains(dependent))
                .collect(),
            CompletionRule::PrerequisitesOnly => Vec::new(),
        }
    }

    fn remove(&mut self, name: &str) -> Result<Task> {
        let (_, sequence) = self
            .queue
            .remove(name)
            .ok_or_else(|| TaskqError::NotFound(name.to_string()))?;
        self.pending
            .remove(&sequence)
            .ok_or_else(|| TaskqError::NotFound(name.to_string()))
    }
}
