//! Durable key-value substrate and the persisted collections built on it.
//!
//! Every collection lives under one key as a JSON array. Reads are fail-soft:
//! a missing, unreadable or malformed value yields the collection's default
//! dataset. Writes are synchronous and happen once per committed change.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::error::{Result, StoreError};

/// Key-value persistence used by [`PersistedCollection`].
pub trait StorageBackend: Send + Sync {
    /// Raw text stored under `key`, or `None` when nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, text: &str) -> Result<()>;
    /// Human-readable location for the storage info panel.
    fn location(&self) -> String;
}

/// One pretty-printed JSON file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let rel = sanitize_relative_path(format!("{key}.json").as_str())?;
        Ok(self.root.join(rel))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)?;
        Ok(Some(data))
    }

    fn write(&self, key: &str, text: &str) -> Result<()> {
        let path = self.key_path(key)?;
        write_text_file(path, text)
    }

    fn location(&self) -> String {
        self.root.to_string_lossy().to_string()
    }
}

/// In-process storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates `key` without counting it as a write.
    pub fn with_entry(self, key: &str, text: &str) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), text.to_string());
        }
        self
    }

    /// Number of writes performed since construction.
    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|count| *count).unwrap_or(0)
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, text: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), text.to_string());
        *self.writes.lock().map_err(|_| StoreError::Poisoned)? += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// A typed list of records mirrored to one storage key.
pub struct PersistedCollection<T> {
    key: String,
    backend: Arc<dyn StorageBackend>,
    items: Vec<T>,
}

impl<T> PersistedCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Reads the collection stored under `key`, substituting `default` when the
    /// value is absent or cannot be decoded. Never writes.
    pub fn load(backend: Arc<dyn StorageBackend>, key: impl Into<String>, default: Vec<T>) -> Self {
        let key = key.into();
        let items = match read_collection::<T>(backend.as_ref(), key.as_str()) {
            Ok(Some(items)) => {
                debug!(key = %key, count = items.len(), "loaded stored collection");
                items
            }
            Ok(None) => {
                debug!(key = %key, "no stored collection, using defaults");
                default
            }
            Err(err) => {
                warn!(key = %key, error = %err, "stored collection unreadable, using defaults");
                default
            }
        };
        Self {
            key,
            backend,
            items,
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn snapshot(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Writes `items` under the key and makes them the current snapshot. On a
    /// failed write the previous snapshot is kept.
    pub fn commit(&mut self, items: Vec<T>) -> Result<&[T]> {
        let text = serde_json::to_string_pretty(&items)?;
        self.backend.write(self.key.as_str(), text.as_str())?;
        debug!(key = %self.key, count = items.len(), "committed collection");
        self.items = items;
        Ok(self.items.as_slice())
    }
}

fn read_collection<T>(backend: &dyn StorageBackend, key: &str) -> Result<Option<Vec<T>>>
where
    T: DeserializeOwned,
{
    let Some(raw) = backend.read(key)? else {
        return Ok(None);
    };
    let items = serde_json::from_str::<Vec<T>>(raw.as_str())?;
    Ok(Some(items))
}

pub(crate) fn write_text_file(path: PathBuf, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub(crate) fn sanitize_relative_path(value: &str) -> Result<PathBuf> {
    let mut out = PathBuf::new();
    for component in PathBuf::from(value).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            _ => return Err(StoreError::InvalidKey(value.to_string())),
        }
    }
    if out.as_os_str().is_empty() {
        return Err(StoreError::InvalidKey(value.to_string()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        label: String,
    }

    fn row(id: &str, label: &str) -> Row {
        Row {
            id: id.to_string(),
            label: label.to_string(),
        }
    }

    fn defaults() -> Vec<Row> {
        vec![row("d1", "default")]
    }

    #[test]
    fn load_uses_default_when_key_is_absent() {
        let backend = Arc::new(MemoryStorage::new());
        let collection = PersistedCollection::load(backend.clone(), "rows", defaults());
        assert_eq!(collection.snapshot(), defaults().as_slice());
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn load_falls_back_on_malformed_json() {
        let backend = Arc::new(MemoryStorage::new().with_entry("rows", "{not json"));
        let collection = PersistedCollection::load(backend, "rows", defaults());
        assert_eq!(collection.snapshot(), defaults().as_slice());
    }

    #[test]
    fn load_falls_back_when_value_is_not_an_array() {
        let backend = Arc::new(MemoryStorage::new().with_entry("rows", r#"{"id":"x"}"#));
        let collection = PersistedCollection::load(backend, "rows", defaults());
        assert_eq!(collection.snapshot(), defaults().as_slice());
    }

    #[test]
    fn load_falls_back_when_records_have_the_wrong_shape() {
        let backend = Arc::new(MemoryStorage::new().with_entry("rows", r#"[{"id":1}]"#));
        let collection = PersistedCollection::load(backend, "rows", defaults());
        assert_eq!(collection.snapshot(), defaults().as_slice());
    }

    #[test]
    fn stored_empty_array_wins_over_defaults() {
        let backend = Arc::new(MemoryStorage::new().with_entry("rows", "[]"));
        let collection = PersistedCollection::<Row>::load(backend, "rows", defaults());
        assert!(collection.snapshot().is_empty());
    }

    #[test]
    fn commit_then_load_reproduces_the_collection() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());
        let mut collection = PersistedCollection::load(backend.clone(), "rows", Vec::new());
        let items = vec![row("a", "first"), row("b", "second")];
        collection.commit(items.clone()).unwrap();

        let reloaded = PersistedCollection::<Row>::load(backend, "rows", defaults());
        assert_eq!(reloaded.snapshot(), items.as_slice());
    }

    #[test]
    fn commit_writes_exactly_once() {
        let backend = Arc::new(MemoryStorage::new());
        let mut collection = PersistedCollection::load(backend.clone(), "rows", Vec::new());
        collection.commit(vec![row("a", "x")]).unwrap();
        assert_eq!(backend.write_count(), 1);
        collection.commit(Vec::new()).unwrap();
        assert_eq!(backend.write_count(), 2);
    }

    #[test]
    fn failed_commit_keeps_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let backend: Arc<dyn StorageBackend> = Arc::new(FileStorage::new(dir.path()));
        let mut collection = PersistedCollection::load(backend, "../escape", defaults());

        let result = collection.commit(vec![row("a", "x")]);
        assert!(matches!(result, Err(StoreError::InvalidKey(_))));
        assert_eq!(collection.snapshot(), defaults().as_slice());
    }

    #[test]
    fn file_storage_round_trips_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("data"));
        assert_eq!(storage.read("rows").unwrap(), None);

        storage.write("rows", "[1,2,3]").unwrap();
        assert_eq!(storage.read("rows").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(dir.path().join("nested/data/rows.json").is_file());
    }

    #[test]
    fn sanitize_rejects_escaping_paths() {
        assert!(sanitize_relative_path("../x.json").is_err());
        assert!(sanitize_relative_path("/etc/passwd").is_err());
        assert!(sanitize_relative_path("").is_err());
        assert_eq!(
            sanitize_relative_path("./a/b.json").unwrap(),
            PathBuf::from("a").join("b.json")
        );
    }
}
