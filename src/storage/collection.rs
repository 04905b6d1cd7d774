//! In-memory materialisation of a data file
//!
//! A data file holds one JSON document, either an array of records (list
//! layout) or an object mapping keys to records (keyed layout). The layout
//! a collection was read in is the layout it is written back in.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::{StorageError, StorageResult};

/// A record type that can live in a [`Collection`]
pub trait Record:
    Serialize + DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + 'static
{
    /// Key used for the record in keyed layout and for lookups in list layout
    fn record_key(&self) -> String;
}

/// On-disk shape of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// JSON array of records
    #[default]
    List,
    /// JSON object keyed by record key
    Keyed,
}

/// Full collection of records, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    layout: Layout,
    entries: Vec<(String, T)>,
}

impl<T: Record> Collection<T> {
    /// Create an empty collection
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            entries: Vec::new(),
        }
    }

    /// Build a list-layout collection from records
    pub fn from_records(records: Vec<T>) -> Self {
        let entries = records
            .into_iter()
            .map(|record| (record.record_key(), record))
            .collect();
        Self {
            layout: Layout::List,
            entries,
        }
    }

    /// Decode a parsed data file.
    ///
    /// Arrays become list layout, objects become keyed layout. Any other
    /// document, or a record that does not match `T`, is a parse error.
    pub fn from_json(document: Value) -> StorageResult<Self> {
        match document {
            Value::Array(items) => {
                let mut entries = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let record: T = serde_json::from_value(item).map_err(|e| {
                        StorageError::parse_error(format!("record at index {}: {}", index, e))
                    })?;
                    entries.push((record.record_key(), record));
                }
                Ok(Self {
                    layout: Layout::List,
                    entries,
                })
            }
            Value::Object(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (key, item) in map {
                    let record: T = serde_json::from_value(item).map_err(|e| {
                        StorageError::parse_error(format!("record '{}': {}", key, e))
                    })?;
                    entries.push((key, record));
                }
                Ok(Self {
                    layout: Layout::Keyed,
                    entries,
                })
            }
            other => Err(StorageError::parse_error(format!(
                "expected a JSON array or object, found {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Encode the collection in its layout
    pub fn to_json(&self) -> StorageResult<Value> {
        match self.layout {
            Layout::List => {
                let items = self
                    .entries
                    .iter()
                    .map(|(_, record)| encode(record))
                    .collect::<StorageResult<Vec<_>>>()?;
                Ok(Value::Array(items))
            }
            Layout::Keyed => {
                let mut map = Map::new();
                for (key, record) in &self.entries {
                    map.insert(key.clone(), encode(record)?);
                }
                Ok(Value::Object(map))
            }
        }
    }

    /// Returns the layout
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over records in file order
    pub fn records(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, record)| record)
    }

    /// Consume the collection, returning records in file order
    pub fn into_records(self) -> Vec<T> {
        self.entries.into_iter().map(|(_, record)| record).collect()
    }

    /// Look a record up by key
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, record)| record)
    }

    /// Whether a key is already taken
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// First record matching a predicate
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.records().find(|record| predicate(record))
    }

    /// First record matching a predicate, mutably
    pub fn find_mut(&mut self, predicate: impl Fn(&T) -> bool) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .map(|(_, record)| record)
            .find(|record| predicate(record))
    }

    /// Whether any record matches a predicate
    pub fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.records().any(predicate)
    }

    /// Append a record under its own key
    pub fn push(&mut self, record: T) {
        self.entries.push((record.record_key(), record));
    }

    /// Remove and return the first record matching a predicate
    pub fn remove_first(&mut self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        let position = self.entries.iter().position(|(_, record)| predicate(record))?;
        Some(self.entries.remove(position).1)
    }
}

fn encode<T: Serialize>(record: &T) -> StorageResult<Value> {
    serde_json::to_value(record)
        .map_err(|e| StorageError::write_failed_no_source(format!("failed to encode record: {}", e)))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: u32,
        label: String,
    }

    impl Record for Item {
        fn record_key(&self) -> String {
            self.id.to_string()
        }
    }

    #[test]
    fn test_array_is_list_layout() {
        let collection: Collection<Item> = Collection::from_json(json!([
            {"id": 1, "label": "a"},
            {"id": 2, "label": "b"}
        ]))
        .unwrap();

        assert_eq!(collection.layout(), Layout::List);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get("2").unwrap().label, "b");
    }

    #[test]
    fn test_object_is_keyed_layout() {
        let collection: Collection<Item> = Collection::from_json(json!({
            "first": {"id": 7, "label": "x"}
        }))
        .unwrap();

        assert_eq!(collection.layout(), Layout::Keyed);
        assert!(collection.contains_key("first"));
        assert!(collection.get("7").is_none());
    }

    #[test]
    fn test_layout_survives_reencoding() {
        let document = json!({"k": {"id": 1, "label": "a"}});
        let collection: Collection<Item> = Collection::from_json(document.clone()).unwrap();
        assert_eq!(collection.to_json().unwrap(), document);

        let document = json!([{"id": 1, "label": "a"}]);
        let collection: Collection<Item> = Collection::from_json(document.clone()).unwrap();
        assert_eq!(collection.to_json().unwrap(), document);
    }

    #[test]
    fn test_scalar_document_rejected() {
        let err = Collection::<Item>::from_json(json!(42)).unwrap_err();
        assert!(err.message().contains("number"));
    }

    #[test]
    fn test_mistyped_record_rejected() {
        let err = Collection::<Item>::from_json(json!([{"id": "one", "label": "a"}])).unwrap_err();
        assert!(err.message().contains("index 0"));
    }

    #[test]
    fn test_remove_first() {
        let mut collection = Collection::from_records(vec![
            Item { id: 1, label: "a".into() },
            Item { id: 2, label: "b".into() },
        ]);

        let removed = collection.remove_first(|item| item.label == "a").unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(collection.len(), 1);
        assert!(collection.remove_first(|item| item.label == "a").is_none());
    }
}
