//! # JSON File Store
//!
//! The data file is the database: every load reads and parses the whole
//! file, every save rewrites it. Writes are plain overwrites, so a crash
//! mid-write can truncate the file.

use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use super::backend::RecordStore;
use super::collection::{Collection, Layout, Record};
use super::errors::{StorageError, StorageResult};

/// Record store backed by a single JSON file
#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    default_layout: Layout,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> JsonFileStore<T> {
    /// Create a store for the given file, creating it in list layout on first save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_layout(path, Layout::List)
    }

    /// Create a store whose file is created in the given layout
    pub fn with_layout(path: impl Into<PathBuf>, default_layout: Layout) -> Self {
        Self {
            path: path.into(),
            default_layout,
            _record: PhantomData,
        }
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

impl<T: Record> RecordStore<T> for JsonFileStore<T> {
    fn load(&self) -> StorageResult<Collection<T>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Collection::new(self.default_layout));
            }
            Err(e) => {
                return Err(StorageError::io_error("failed to read data file", e)
                    .with_path(self.display_path()));
            }
        };

        let document: Value = serde_json::from_str(&content).map_err(|e| {
            StorageError::parse_error(format!("invalid JSON: {}", e)).with_path(self.display_path())
        })?;

        Collection::from_json(document).map_err(|e| e.with_path(self.display_path()))
    }

    fn save(&self, collection: &Collection<T>) -> StorageResult<()> {
        let document = collection.to_json()?;
        let bytes = to_indented_json(&document)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::write_failed("failed to create data directory", e)
                        .with_path(self.display_path())
                })?;
            }
        }

        fs::write(&self.path, bytes).map_err(|e| {
            StorageError::write_failed("failed to write data file", e).with_path(self.display_path())
        })
    }
}

/// Serialise with four-space indentation
fn to_indented_json(document: &Value) -> StorageResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    document.serialize(&mut serializer).map_err(|e| {
        StorageError::write_failed_no_source(format!("failed to serialise collection: {}", e))
    })?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use tempfile::TempDir;

    use crate::storage::errors::StorageErrorCode;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: u32,
    }

    impl Record for Item {
        fn record_key(&self) -> String {
            self.id.to_string()
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let store: JsonFileStore<Item> = JsonFileStore::new(temp.path().join("items.json"));

        let collection = store.load().unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.layout(), Layout::List);
    }

    #[test]
    fn test_missing_file_uses_default_layout() {
        let temp = TempDir::new().unwrap();
        let store: JsonFileStore<Item> =
            JsonFileStore::with_layout(temp.path().join("items.json"), Layout::Keyed);

        assert_eq!(store.load().unwrap().layout(), Layout::Keyed);
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let store: JsonFileStore<Item> = JsonFileStore::new(temp.path().join("items.json"));

        let collection = Collection::from_records(vec![Item { id: 1 }, Item { id: 2 }]);
        store.save(&collection).unwrap();

        assert_eq!(store.load().unwrap(), collection);
    }

    #[test]
    fn test_save_overwrites_whole_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("items.json");
        let store: JsonFileStore<Item> = JsonFileStore::new(&path);

        store
            .save(&Collection::from_records(vec![Item { id: 1 }, Item { id: 2 }]))
            .unwrap();
        store.save(&Collection::from_records(vec![Item { id: 3 }])).unwrap();

        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, json!([{"id": 3}]));
    }

    #[test]
    fn test_save_uses_four_space_indent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("items.json");
        let store: JsonFileStore<Item> = JsonFileStore::new(&path);

        store.save(&Collection::from_records(vec![Item { id: 1 }])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n        \"id\": 1"));
    }

    #[test]
    fn test_keyed_file_keeps_layout() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("items.json");
        fs::write(&path, r#"{"a": {"id": 1}}"#).unwrap();
        let store: JsonFileStore<Item> = JsonFileStore::new(&path);

        let mut collection = store.load().unwrap();
        assert_eq!(collection.layout(), Layout::Keyed);
        collection.push(Item { id: 2 });
        store.save(&collection).unwrap();

        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, json!({"a": {"id": 1}, "2": {"id": 2}}));
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("items.json");
        fs::write(&path, "[{\"id\": 1},").unwrap();
        let store: JsonFileStore<Item> = JsonFileStore::new(&path);

        let err = store.load().unwrap_err();
        assert_eq!(err.code(), StorageErrorCode::RegStorageParseError);
        assert!(err.path().unwrap().ends_with("items.json"));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let store: JsonFileStore<Item> =
            JsonFileStore::new(temp.path().join("nested").join("items.json"));

        store.save(&Collection::from_records(vec![Item { id: 1 }])).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }
}
