// Saved visualizations and the stores that keep them

use crate::structures::StructureKind;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Saved visualization {id} not found.")]
    NotFound { id: u64 },

    #[error("Could not access the visualization store: {0}")]
    Io(#[from] io::Error),

    #[error("Saved visualizations are unreadable: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Visualization store is full ({capacity} entries).")]
    CapacityExceeded { capacity: usize },
}

/// Persisted record: `{id, name, kind, payload, created_at}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedVisualization {
    pub id: u64,
    pub name: String,
    pub kind: StructureKind,
    /// Stored as written; normalized only when loaded back
    pub payload: Json,
    /// Seconds since the Unix epoch
    pub created_at: u64,
}

/// Record contents before the store assigns an id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewVisualization {
    pub name: String,
    pub kind: StructureKind,
    pub payload: Json,
}

/// Persistence boundary used by the playground
pub trait VisualizationStore {
    /// Records, newest first
    fn list(&self) -> Result<Vec<SavedVisualization>, StoreError>;

    fn get(&self, id: u64) -> Result<SavedVisualization, StoreError>;

    fn create(&mut self, new: NewVisualization) -> Result<SavedVisualization, StoreError>;

    fn delete(&mut self, id: u64) -> Result<(), StoreError>;
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Record list shared by both stores
#[derive(Debug, Default)]
struct Records {
    entries: Vec<SavedVisualization>,
    next_id: u64,
}

impl Records {
    fn from_entries(entries: Vec<SavedVisualization>) -> Self {
        let next_id = entries.iter().map(|r| r.id).max().map_or(1, |max| max + 1);
        Records { entries, next_id }
    }

    fn list(&self) -> Vec<SavedVisualization> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        entries
    }

    fn get(&self, id: u64) -> Result<SavedVisualization, StoreError> {
        self.entries
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    fn push(&mut self, new: NewVisualization) -> SavedVisualization {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        let record = SavedVisualization {
            id,
            name: new.name,
            kind: new.kind,
            payload: new.payload,
            created_at: now_secs(),
        };
        self.entries.push(record.clone());
        record
    }

    fn remove(&mut self, id: u64) -> Result<SavedVisualization, StoreError> {
        let position = self
            .entries
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound { id })?;
        Ok(self.entries.remove(position))
    }
}

/// Session-only store with a fixed number of slots
#[derive(Debug)]
pub struct MemoryStore {
    records: Records,
    capacity: usize,
}

impl MemoryStore {
    pub fn new(capacity: usize) -> Self {
        MemoryStore {
            records: Records::default(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.records.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.entries.is_empty()
    }
}

impl VisualizationStore for MemoryStore {
    fn list(&self) -> Result<Vec<SavedVisualization>, StoreError> {
        Ok(self.records.list())
    }

    fn get(&self, id: u64) -> Result<SavedVisualization, StoreError> {
        self.records.get(id)
    }

    fn create(&mut self, new: NewVisualization) -> Result<SavedVisualization, StoreError> {
        if self.len() >= self.capacity {
            return Err(StoreError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        Ok(self.records.push(new))
    }

    fn delete(&mut self, id: u64) -> Result<(), StoreError> {
        self.records.remove(id).map(|_| ())
    }
}

/// Store backed by a JSON file holding an array of records
///
/// The whole file is rewritten after every change. A missing file is an
/// empty store; it is created on the first save.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: Records,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Vec::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(JsonFileStore {
            path,
            records: Records::from_entries(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.entries.is_empty()
    }

    fn flush(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.records.entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl VisualizationStore for JsonFileStore {
    fn list(&self) -> Result<Vec<SavedVisualization>, StoreError> {
        Ok(self.records.list())
    }

    fn get(&self, id: u64) -> Result<SavedVisualization, StoreError> {
        self.records.get(id)
    }

    fn create(&mut self, new: NewVisualization) -> Result<SavedVisualization, StoreError> {
        let record = self.records.push(new);
        if let Err(err) = self.flush() {
            self.records.entries.pop();
            return Err(err);
        }
        Ok(record)
    }

    fn delete(&mut self, id: u64) -> Result<(), StoreError> {
        let removed = self.records.remove(id)?;
        if let Err(err) = self.flush() {
            self.records.entries.push(removed);
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(name: &str) -> NewVisualization {
        NewVisualization {
            name: name.to_string(),
            kind: StructureKind::BinaryHeap,
            payload: json!({"values": [1, 3, 2], "mode": "min"}),
        }
    }

    #[test]
    fn test_memory_store_crud() {
        let mut store = MemoryStore::new(4);
        let first = store.create(sample("first")).unwrap();
        let second = store.create(sample("second")).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.get(2).unwrap().name, "second");

        store.delete(1).unwrap();
        assert!(matches!(store.get(1), Err(StoreError::NotFound { id: 1 })));
        assert!(matches!(store.delete(1), Err(StoreError::NotFound { id: 1 })));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_memory_store_capacity() {
        let mut store = MemoryStore::new(1);
        store.create(sample("only")).unwrap();
        assert!(matches!(
            store.create(sample("extra")),
            Err(StoreError::CapacityExceeded { capacity: 1 })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_list_newest_first() {
        let mut store = MemoryStore::new(8);
        for name in ["a", "b", "c"] {
            store.create(sample(name)).unwrap();
        }
        let names: Vec<String> = store.list().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_record_json_shape() {
        let mut store = MemoryStore::new(2);
        let record = store.create(sample("shape")).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["kind"], json!("binaryheap"));
        assert_eq!(value["payload"]["values"], json!([1, 3, 2]));
        assert!(value["created_at"].is_u64());
    }

    #[test]
    fn test_json_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(store.is_empty());
        store.create(sample("kept")).unwrap();
        let dropped = store.create(sample("dropped")).unwrap();
        store.delete(dropped.id).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        let records = reopened.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "kept");
        assert_eq!(records[0].kind, StructureKind::BinaryHeap);

        // Ids continue after the highest stored one
        let mut reopened = reopened;
        assert_eq!(reopened.create(sample("next")).unwrap().id, 2);
    }

    #[test]
    fn test_json_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Json(_))));
    }
}
