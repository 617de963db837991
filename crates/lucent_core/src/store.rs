//! Session key-value store
//!
//! Typed storage for the widget layer: values go in as anything
//! `Serialize`, come out as anything `DeserializeOwned`, and the whole
//! store round-trips through a JSON snapshot for host-side
//! persistence. Missing keys and type mismatches read as `None`; only
//! snapshot (de)serialization surfaces errors.

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Errors surfaced by [`Store`] operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The value handed to [`Store::set`] could not be converted to
    /// JSON.
    #[error("value for {key:?} cannot be stored: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// A snapshot could not be written or read back.
    #[error("store snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// String-keyed store of JSON-shaped values.
#[derive(Debug, Default)]
pub struct Store {
    entries: FxHashMap<String, serde_json::Value>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`, replacing any previous entry.
    pub fn set<T: Serialize>(&mut self, key: impl Into<String>, value: &T) -> Result<(), StoreError> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|source| StoreError::Serialize {
            key: key.clone(),
            source,
        })?;
        self.entries.insert(key, value);
        Ok(())
    }

    /// Fetch and deserialize the value under `key`. Missing keys and
    /// type mismatches both read as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Remove the entry under `key`. Returns whether one was there.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serialize the whole store to a JSON object.
    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Rebuild a store from [`export_json`](Self::export_json) output.
    pub fn import_json(json: &str) -> Result<Self, StoreError> {
        let entries: FxHashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }
}
