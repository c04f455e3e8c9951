//! Key-value persistence capability used by the progress and stats stores.
//!
//! Writes are buffered in memory and only reach the backing medium on
//! [`KeyValueStore::flush`]. Callers that need all-or-nothing updates go
//! through [`KeyValueStore::transact`].

use crate::utils::persistence::{load_json_or_default, save_json};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// A single stored value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

/// String-keyed store of integers, booleans and floats.
///
/// Implementors provide raw access; the typed getters fall back to the given
/// default when a key is missing or holds a different type.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<StoredValue>;
    fn put(&mut self, key: &str, value: StoredValue);
    fn remove(&mut self, key: &str);
    fn clear(&mut self);
    fn keys(&self) -> Vec<String>;
    /// Commit buffered writes.
    fn flush(&mut self) -> io::Result<()>;

    /// Apply `update` and flush. If the flush fails the store is put back to
    /// its contents before `update` ran and the error is returned.
    fn transact<F>(&mut self, update: F) -> io::Result<()>
    where
        F: FnOnce(&mut Self),
        Self: Sized,
    {
        let before: Vec<(String, StoredValue)> = self
            .keys()
            .into_iter()
            .filter_map(|key| self.get(&key).map(|value| (key, value)))
            .collect();
        update(&mut *self);
        if let Err(e) = self.flush() {
            self.clear();
            for (key, value) in before {
                self.put(&key, value);
            }
            debug!("Flush failed, rolled back to {} keys", self.keys().len());
            return Err(e);
        }
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(StoredValue::Int(v)) => v,
            _ => default,
        }
    }

    fn put_int(&mut self, key: &str, value: i64) {
        self.put(key, StoredValue::Int(value));
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(StoredValue::Bool(v)) => v,
            _ => default,
        }
    }

    fn put_bool(&mut self, key: &str, value: bool) {
        self.put(key, StoredValue::Bool(value));
    }

    fn get_float(&self, key: &str, default: f64) -> f64 {
        match self.get(key) {
            Some(StoredValue::Float(v)) => v,
            Some(StoredValue::Int(v)) => v as f64,
            _ => default,
        }
    }

    fn put_float(&mut self, key: &str, value: f64) {
        self.put(key, StoredValue::Float(value));
    }
}

/// In-memory store. `flush` does nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    values: BTreeMap<String, StoredValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<StoredValue> {
        self.values.get(key).copied()
    }

    fn put(&mut self, key: &str, value: StoredValue) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Store backed by a JSON object on disk, rewritten in full on every flush.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing or unreadable file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values: MemoryStore = load_json_or_default(&path);
        debug!("Opened {} ({} keys)", path.display(), values.len());
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<StoredValue> {
        self.values.get(key)
    }

    fn put(&mut self, key: &str, value: StoredValue) {
        self.values.put(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys()
    }

    fn flush(&mut self) -> io::Result<()> {
        debug!("Flushing {} keys to {}", self.values.len(), self.path.display());
        save_json(&self.path, &self.values)
    }
}

/// Memory store whose flush can be made to fail.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FlakyStore {
    pub values: MemoryStore,
    pub fail_flush: bool,
}

#[cfg(test)]
impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Option<StoredValue> {
        self.values.get(key)
    }

    fn put(&mut self, key: &str, value: StoredValue) {
        self.values.put(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys()
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.fail_flush {
            return Err(io::Error::other("disk full"));
        }
        Ok(())
    }
}
