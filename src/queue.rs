use std::collections::{BTreeMap, HashMap};

/// Pending tasks ordered by `(priority, sequence)`.
///
/// A binary heap cannot drop an arbitrary entry cheaply, so the ordering lives
/// in a `BTreeMap` keyed by the immutable sort key, with a name lookup on the
/// side for removal.
#[derive(Debug, Default, Clone)]
pub struct PriorityQueue {
    order: BTreeMap<(i64, u64), String>,
    keys: HashMap<String, (i64, u64)>,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `name` under `key`. Returns false if the name is already queued.
    pub fn insert(&mut self, name: &str, key: (i64, u64)) -> bool {
        if self.keys.contains_key(name) {
            return false;
        }
        self.keys.insert(name.to_string(), key);
        self.order.insert(key, name.to_string());
        true
    }

    pub fn remove(&mut self, name: &str) -> Option<(i64, u64)> {
        let key = self.keys.remove(name)?;
        self.order.remove(&key);
        Some(key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains_key(name)
    }

    pub fn key_of(&self, name: &str) -> Option<(i64, u64)> {
        self.keys.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Names in ascending `(priority, sequence)` order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.values().map(String::as_str)
    }
}
