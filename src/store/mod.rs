pub mod lock;
pub mod snapshot;

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::registry::Registry;
use crate::store::snapshot::Snapshot;

pub const DEFAULT_DIR: &str = ".taskq";
pub const SNAPSHOT_FILE: &str = "tasks.json";
pub const LOCK_FILE: &str = "tasks.lock";

/// State directory holding the config and the registry snapshot.
///
/// Holds an exclusive lock for as long as it is alive, so one `Store` is one
/// load-mutate-save transaction.
pub struct Store {
    root: PathBuf,
    config: Config,
    _lock: File,
}

impl Store {
    /// Open (creating if needed) the state directory at `root`.
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        let lock = lock::acquire_lock(&root.join(LOCK_FILE))?;
        let config = Config::load_or_init(root)?;
        debug!(root = %root.display(), rule = %config.completion_rule, "store opened");
        Ok(Self {
            root: root.to_path_buf(),
            config,
            _lock: lock,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_FILE)
    }

    /// Load the registry. A missing or unreadable snapshot is not fatal: it
    /// yields an empty registry, which is persisted straight away.
    pub fn load(&self) -> Registry {
        let rule = self.config.completion_rule;
        let path = self.snapshot_path();

        let snapshot = if path.exists() {
            match Snapshot::read(&path) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "snapshot unreadable, resetting");
                    None
                }
            }
        } else {
            None
        };

        match snapshot {
            Some(snapshot) => snapshot.into_registry(rule),
            None => {
                let registry = Registry::new(rule);
                if let Err(e) = self.save(&registry) {
                    warn!(error = %e, "failed to persist empty registry");
                }
                registry
            }
        }
    }

    pub fn save(&self, registry: &Registry) -> Result<()> {
        Snapshot::capture(registry).write(&self.snapshot_path())?;
        debug!(pending = registry.pending_count(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskqError;
    use tempfile::tempdir;

    #[test]
    fn open_creates_directory_config_and_lock() {
        let dir = tempdir().unwrap();
        let root = dir.path().join(DEFAULT_DIR);
        let store = Store::open(&root).unwrap();
        assert!(store.root().join("config.json").exists());
        assert!(store.root().join(LOCK_FILE).exists());
    }

    #[test]
    fn second_open_is_locked_out() {
        let dir = tempdir().unwrap();
        let _store = Store::open(dir.path()).unwrap();
        assert!(matches!(Store::open(dir.path()), Err(TaskqError::Locked(_))));
    }

    #[test]
    fn missing_snapshot_loads_empty_and_is_written() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        let reg = store.load();
        assert_eq!(reg.pending_count(), 0);
        assert!(store.snapshot_path().exists());
    }

    #[test]
    fn corrupt_snapshot_resets_to_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SNAPSHOT_FILE), "{\"tasks\": [oops").unwrap();
        let store = Store::open(dir.path()).unwrap();

        let reg = store.load();
        assert_eq!(reg.pending_count(), 0);
        assert!(reg.completed().is_empty());

        let written = Snapshot::read(&store.snapshot_path()).unwrap();
        assert_eq!(written, Snapshot::default());
    }

    #[test]
    fn saved_registry_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = Store::open(dir.path()).unwrap();
            let mut reg = store.load();
            reg.add("a", 1, vec![], None).unwrap();
            store.save(&reg).unwrap();
        }
        let store = Store::open(dir.path()).unwrap();
        let reg = store.load();
        assert!(reg.get("a").is_some());
    }
}
