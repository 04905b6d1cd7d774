//! Roster of students keyed by integer id and unique by roll number

use std::sync::Arc;

use serde_json::Value;

use super::errors::{RegistryError, RegistryResult};
use super::observe;
use super::query::{sort_by_cgpa, SortDirection};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::schema::{validate_roster_student, RosterStudent};
use crate::storage::{Layout, RecordStore};

/// Roster operations over an injected store
#[derive(Debug, Clone)]
pub struct Roster {
    store: Arc<dyn RecordStore<RosterStudent>>,
    metrics: Arc<MetricsRegistry>,
}

impl Roster {
    pub fn new(store: Arc<dyn RecordStore<RosterStudent>>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { store, metrics }
    }

    /// All entries in file order
    pub fn list(&self) -> RegistryResult<Vec<RosterStudent>> {
        observe(&self.metrics, "list_roster", self.try_list())
    }

    fn try_list(&self) -> RegistryResult<Vec<RosterStudent>> {
        let entries = self.store.load()?.into_records();
        self.metrics.increment_queries_executed();
        Ok(entries)
    }

    /// Validates and appends an entry.
    ///
    /// # Errors
    ///
    /// - `Validation` if a field violates its constraint
    /// - `Duplicate` if the id or roll number is taken
    pub fn add(&self, body: &Value) -> RegistryResult<RosterStudent> {
        observe(&self.metrics, "add_roster_entry", self.try_add(body))
    }

    fn try_add(&self, body: &Value) -> RegistryResult<RosterStudent> {
        let entry = validate_roster_student(body)?;
        let mut roster = self.store.load()?;

        // Keyed files may use keys that differ from the stored id.
        if roster.any(|s| s.id == entry.id) || roster.contains_key(&entry.id.to_string()) {
            return Err(RegistryError::duplicate_id());
        }
        if roster.any(|s| s.roll_number == entry.roll_number) {
            return Err(RegistryError::duplicate_roll_number());
        }

        roster.push(entry.clone());
        self.store.save(&roster)?;

        self.metrics.increment_roster_added();
        let id = entry.id.to_string();
        log_event_with_fields(
            Event::RosterEntryAdded,
            &[("id", id.as_str()), ("roll_number", entry.roll_number.as_str())],
        );
        Ok(entry)
    }

    /// Looks an entry up by its key.
    ///
    /// Keyed files match the object key; list files parse the key as an
    /// integer id, so `007` finds id 7.
    pub fn get(&self, key: &str) -> RegistryResult<RosterStudent> {
        observe(&self.metrics, "get_roster_entry", self.try_get(key))
    }

    fn try_get(&self, key: &str) -> RegistryResult<RosterStudent> {
        let roster = self.store.load()?;
        let entry = match roster.layout() {
            Layout::Keyed => roster.get(key),
            Layout::List => key
                .parse::<i64>()
                .ok()
                .and_then(|id| roster.find(|s| s.id == id)),
        }
        .cloned()
        .ok_or(RegistryError::NotFound)?;
        self.metrics.increment_queries_executed();
        Ok(entry)
    }

    /// All entries ordered by CGPA; `order` defaults to ascending
    pub fn sorted_by_cgpa(&self, order: Option<&str>) -> RegistryResult<Vec<RosterStudent>> {
        observe(&self.metrics, "sort_roster", self.try_sorted_by_cgpa(order))
    }

    fn try_sorted_by_cgpa(&self, order: Option<&str>) -> RegistryResult<Vec<RosterStudent>> {
        let direction = match order.filter(|raw| !raw.is_empty()) {
            Some(raw) => SortDirection::parse("order", raw)?,
            None => SortDirection::default(),
        };
        let mut entries = self.store.load()?.into_records();
        sort_by_cgpa(&mut entries, direction);
        self.metrics.increment_queries_executed();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Collection, MemoryStore};
    use serde_json::json;

    fn roster() -> (Roster, Arc<MemoryStore<RosterStudent>>) {
        let store = Arc::new(MemoryStore::<RosterStudent>::new());
        let roster = Roster::new(store.clone(), Arc::new(MetricsRegistry::new()));
        (roster, store)
    }

    fn body(id: i64, roll_number: &str, cgpa: Option<f64>) -> Value {
        let mut body = json!({"id": id, "name": "Sara", "age": 20, "roll_number": roll_number});
        if let Some(cgpa) = cgpa {
            body["CGPA"] = json!(cgpa);
        }
        body
    }

    #[test]
    fn test_add_and_list() {
        let (roster, _) = roster();

        roster.add(&body(1, "R-1", Some(3.1))).unwrap();
        roster.add(&body(2, "R-2", None)).unwrap();

        let ids: Vec<i64> = roster.list().unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_duplicate_id() {
        let (roster, store) = roster();
        roster.add(&body(1, "R-1", None)).unwrap();

        let err = roster.add(&body(1, "R-9", None)).unwrap_err();

        assert_eq!(err.to_string(), "ID already exists");
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_roll_number() {
        let (roster, _) = roster();
        roster.add(&body(1, "R-1", None)).unwrap();

        let err = roster.add(&body(2, "R-1", None)).unwrap_err();
        assert_eq!(err.to_string(), "Roll number already exists");
    }

    #[test]
    fn test_keyed_key_collision() {
        let existing = RosterStudent {
            id: 10,
            name: "Kept".to_string(),
            age: 21,
            roll_number: "R-10".to_string(),
            grade: None,
            cgpa: None,
        };
        let collection: Collection<RosterStudent> = Collection::from_json(json!({
            "2": serde_json::to_value(&existing).unwrap()
        }))
        .unwrap();
        let roster = Roster::new(
            Arc::new(MemoryStore::with_collection(collection)),
            Arc::new(MetricsRegistry::new()),
        );

        let err = roster.add(&body(2, "R-2", None)).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(_)));
    }

    #[test]
    fn test_get_by_key() {
        let (roster, _) = roster();
        roster.add(&body(7, "R-7", None)).unwrap();

        assert_eq!(roster.get("7").unwrap().roll_number, "R-7");
        assert!(matches!(roster.get("8"), Err(RegistryError::NotFound)));
        assert!(matches!(roster.get("abc"), Err(RegistryError::NotFound)));
    }

    #[test]
    fn test_get_parses_id_in_list_layout() {
        let (roster, _) = roster();
        roster.add(&body(7, "R-7", None)).unwrap();
        roster.add(&body(-3, "R-3", None)).unwrap();

        assert_eq!(roster.get("007").unwrap().id, 7);
        assert_eq!(roster.get("+7").unwrap().id, 7);
        assert_eq!(roster.get("-3").unwrap().roll_number, "R-3");
        assert!(matches!(roster.get("7.0"), Err(RegistryError::NotFound)));
    }

    #[test]
    fn test_get_matches_key_in_keyed_layout() {
        let collection: Collection<RosterStudent> = Collection::from_json(json!({
            "s1": {"id": 1, "name": "Sara", "age": 20, "roll_number": "R-1"}
        }))
        .unwrap();
        let roster = Roster::new(
            Arc::new(MemoryStore::with_collection(collection)),
            Arc::new(MetricsRegistry::new()),
        );

        assert_eq!(roster.get("s1").unwrap().id, 1);
        assert!(matches!(roster.get("1"), Err(RegistryError::NotFound)));
    }

    #[test]
    fn test_sorted_by_cgpa() {
        let (roster, _) = roster();
        roster.add(&body(1, "R-1", Some(3.5))).unwrap();
        roster.add(&body(2, "R-2", None)).unwrap();
        roster.add(&body(3, "R-3", Some(2.0))).unwrap();

        let ids = |entries: Vec<RosterStudent>| entries.iter().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(ids(roster.sorted_by_cgpa(None).unwrap()), vec![2, 3, 1]);
        assert_eq!(ids(roster.sorted_by_cgpa(Some("desc")).unwrap()), vec![1, 3, 2]);
        assert!(matches!(
            roster.sorted_by_cgpa(Some("sideways")),
            Err(RegistryError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_invalid_entry_rejected() {
        let (roster, store) = roster();

        let err = roster
            .add(&json!({"id": 1, "name": "S", "age": 20, "roll_number": "R-1"}))
            .unwrap_err();

        assert!(matches!(err, RegistryError::Validation(_)));
        assert!(store.load().unwrap().is_empty());
    }
}
