//! Injected key-value store for per-project user metadata.
//!
//! Favorites, tags, and notes are uninteresting JSON blobs keyed by
//! project path. The store is an explicit dependency handed to callers,
//! not a process-wide singleton, so the core can be tested against
//! [`MemoryStore`] and the app can use [`JsonFileStore`].

use crate::file::{self, FileError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store file error: {0}")]
    File(#[from] FileError),

    #[error("store is not a JSON object: {path}")]
    NotAnObject { path: PathBuf },

    #[error("malformed store JSON in {path}: {message}")]
    MalformedJson { path: PathBuf, message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value persistence keyed by project path string.
pub trait MetadataStore {
    fn get(&self, key: &str) -> Option<&Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
    fn keys(&self) -> Vec<String>;
}

/// User metadata attached to one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectMeta {
    pub favorite: bool,
    pub tags: Vec<String>,
    pub notes: String,
}

/// Typed read of a project's metadata; missing or unreadable entries
/// come back as the default record.
pub fn project_meta(store: &dyn MetadataStore, project: &str) -> ProjectMeta {
    store
        .get(project)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}

/// Typed write of a project's metadata.
pub fn set_project_meta(
    store: &mut dyn MetadataStore,
    project: &str,
    meta: &ProjectMeta,
) -> Result<(), StoreError> {
    store.set(project, serde_json::to_value(meta)?)
}

/// In-process store for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataStore for MemoryStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Whole-map JSON file, loaded eagerly and rewritten atomically on every
/// mutation. Keys sort deterministically so the file diffs cleanly.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Open a store file; a missing file is an empty store, not an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            let text = file::read_text(&path)?;
            let value: Value =
                serde_json::from_str(&text).map_err(|err| StoreError::MalformedJson {
                    path: path.clone(),
                    message: err.to_string(),
                })?;
            match value {
                Value::Object(map) => map.into_iter().collect(),
                _ => return Err(StoreError::NotAnObject { path }),
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        let map: serde_json::Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let text = serde_json::to_string_pretty(&Value::Object(map))?;
        file::write_text(&self.path, &text)?;
        Ok(())
    }
}

impl MetadataStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
