use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::Task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Executability {
    pub executable: bool,
    /// Declared dependencies not yet completed, in declaration order.
    pub pending_dependencies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedTask {
    pub name: String,
    pub pending_dependencies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub executable: Vec<String>,
    pub blocked: Vec<BlockedTask>,
}

pub fn is_executable(task: &Task, completed: &BTreeSet<String>) -> Executability {
    let pending_dependencies: Vec<String> = task
        .dependencies
        .iter()
        .filter(|dep| !completed.contains(dep.as_str()))
        .cloned()
        .collect();
    Executability {
        executable: pending_dependencies.is_empty(),
        pending_dependencies,
    }
}

/// Partition `tasks` into executable and blocked, keeping the iteration order.
pub fn evaluate_all<'a, I>(tasks: I, completed: &BTreeSet<String>) -> Evaluation
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut evaluation = Evaluation::default();
    for task in tasks {
        let status = is_executable(task, completed);
        if status.executable {
            evaluation.executable.push(task.name.clone());
        } else {
            evaluation.blocked.push(BlockedTask {
                name: task.name.clone(),
                pending_dependencies: status.pending_dependencies,
            });
        }
    }
    evaluation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, deps: &[&str]) -> Task {
        Task {
            name: name.into(),
            priority: 1,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            deadline: None,
            sequence: 0,
        }
    }

    fn completed(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn no_dependencies_is_always_executable() {
        let status = is_executable(&task("a", &[]), &BTreeSet::new());
        assert!(status.executable);
        assert!(status.pending_dependencies.is_empty());
    }

    #[test]
    fn pending_dependencies_preserve_declaration_order() {
        let t = task("roof", &["walls", "beams", "permit"]);
        let status = is_executable(&t, &completed(&["beams"]));
        assert!(!status.executable);
        assert_eq!(status.pending_dependencies, vec!["walls", "permit"]);
    }

    #[test]
    fn all_dependencies_completed_is_executable() {
        let t = task("roof", &["walls", "beams"]);
        assert!(is_executable(&t, &completed(&["walls", "beams", "other"])).executable);
    }

    #[test]
    fn evaluate_all_partitions_in_input_order() {
        let tasks = vec![task("c", &["x"]), task("a", &[]), task("b", &["y", "x"])];
        let eval = evaluate_all(&tasks, &completed(&["y"]));
        assert_eq!(eval.executable, vec!["a"]);
        assert_eq!(
            eval.blocked,
            vec![
                BlockedTask {
                    name: "c".into(),
                    pending_dependencies: vec!["x".into()]
                },
                BlockedTask {
                    name: "b".into(),
                    pending_dependencies: vec!["x".into()]
                },
            ]
        );
    }
}
