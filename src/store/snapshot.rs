use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::CompletionRule;
use crate::deps::DependencyIndex;
use crate::error::Result;
use crate::model::Task;
use crate::registry::Registry;

/// On-disk shape of the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub completed_tasks: Vec<String>,
    #[serde(default)]
    pub task_dependencies: DependencyIndex,
}

impl Snapshot {
    /// Pending tasks are captured in queue order so that reassigning
    /// sequences by file position on load keeps tie-breaks intact.
    pub fn capture(registry: &Registry) -> Self {
        Self {
            tasks: registry.list_pending(true).cloned().collect(),
            completed_tasks: registry.completed().iter().cloned().collect(),
            task_dependencies: registry.dependencies().clone(),
        }
    }

    pub fn into_registry(self, rule: CompletionRule) -> Registry {
        Registry::restore(
            self.tasks,
            self.completed_tasks,
            self.task_dependencies,
            rule,
        )
    }

    pub fn read(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Write through a sibling temp file so a failed write never truncates
    /// the previous snapshot.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn capture_writes_pending_in_priority_order() {
        let mut reg = Registry::default();
        reg.add("low", 9, vec![], None).unwrap();
        reg.add("high", 1, vec![], None).unwrap();

        let snap = Snapshot::capture(&reg);
        let names: Vec<_> = snap.tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["high", "low"]);
    }

    #[test]
    fn save_then_load_reproduces_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");

        let mut reg = Registry::new(CompletionRule::PrerequisitesOnly);
        reg.add("a", 1, vec![], None).unwrap();
        reg.add("b", 5, vec!["a".into()], None).unwrap();
        reg.add("c", 5, vec!["a".into()], NaiveDate::from_ymd_opt(2030, 1, 2))
            .unwrap();
        reg.add("d", 5, vec![], None).unwrap();
        reg.complete("a").unwrap();

        Snapshot::capture(&reg).write(&path).unwrap();
        let loaded = Snapshot::read(&path)
            .unwrap()
            .into_registry(CompletionRule::PrerequisitesOnly);

        let order = |r: &Registry| -> Vec<String> {
            r.list_pending(true).map(|t| t.name.clone()).collect()
        };
        assert_eq!(order(&loaded), order(&reg));
        assert_eq!(loaded.completed(), reg.completed());
        assert_eq!(loaded.dependencies(), reg.dependencies());
        assert_eq!(
            loaded.get("c").and_then(|t| t.deadline),
            NaiveDate::from_ymd_opt(2030, 1, 2)
        );
    }

    #[test]
    fn file_uses_documented_keys() {
        let mut reg = Registry::default();
        reg.add("a", 1, vec![], None).unwrap();
        reg.add("b", 2, vec!["a".into()], None).unwrap();

        let json = serde_json::to_value(Snapshot::capture(&reg)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "tasks": [
                    {"name": "a", "priority": 1, "dependencies": [], "deadline": null},
                    {"name": "b", "priority": 2, "dependencies": ["a"], "deadline": null}
                ],
                "completed_tasks": [],
                "task_dependencies": {"a": ["b"]}
            })
        );
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let snap: Snapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snap, Snapshot::default());
    }
}
