use super::record::{Record, RecordId, Values};
use crate::core::{FormError, Result};
use std::collections::HashMap;
use tracing::{debug, info};

/// Authoritative per-type record sequences.
///
/// Each type keeps insertion order: creates append, updates replace in place,
/// deletes remove. Ids come from one counter shared by all types, so an id is
/// unique across the whole store and never handed out twice.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: HashMap<String, Vec<Record>>,
    next_id: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            next_id: 1,
        }
    }

    fn issue_id(&mut self) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a new record and return its fresh id
    pub fn create(&mut self, type_name: &str, values: Values) -> RecordId {
        let id = self.issue_id();
        self.records
            .entry(type_name.to_string())
            .or_default()
            .push(Record::new(id, values));
        info!(type_name, %id, "record created");
        id
    }

    /// Replace the values of record `id`, keeping its position
    pub fn update(&mut self, type_name: &str, id: RecordId, values: Values) -> Result<()> {
        let record = self
            .records
            .get_mut(type_name)
            .and_then(|rows| rows.iter_mut().find(|r| r.id == id))
            .ok_or_else(|| FormError::StaleEditTarget {
                type_name: type_name.to_string(),
                id,
            })?;

        record.values = values;
        info!(type_name, %id, "record updated");
        Ok(())
    }

    /// Remove record `id` and hand it back
    pub fn delete(&mut self, type_name: &str, id: RecordId) -> Result<Record> {
        let not_found = || FormError::RecordNotFound {
            type_name: type_name.to_string(),
            id,
        };

        let rows = self.records.get_mut(type_name).ok_or_else(not_found)?;
        let pos = rows.iter().position(|r| r.id == id).ok_or_else(not_found)?;
        let removed = rows.remove(pos);
        info!(type_name, %id, remaining = rows.len(), "record deleted");
        Ok(removed)
    }

    /// All records of a type in insertion order; empty for types with none
    pub fn records(&self, type_name: &str) -> &[Record] {
        self.records
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get(&self, type_name: &str, id: RecordId) -> Option<&Record> {
        self.records(type_name).iter().find(|r| r.id == id)
    }

    pub fn contains(&self, type_name: &str, id: RecordId) -> bool {
        self.get(type_name, id).is_some()
    }

    pub fn len(&self, type_name: &str) -> usize {
        self.records(type_name).len()
    }

    pub fn total(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Drop every record. The id counter keeps running.
    pub fn clear(&mut self) {
        debug!(total = self.total(), "store cleared");
        self.records.clear();
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::values;

    #[test]
    fn test_create_appends_with_fresh_ids() {
        let mut store = RecordStore::new();
        let a = store.create("User", values([("firstName", "Ann")]));
        let b = store.create("User", values([("firstName", "Bo")]));

        assert_eq!(a, RecordId(1));
        assert_ne!(a, b);
        let ids: Vec<_> = store.records("User").iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_ids_are_unique_across_types() {
        let mut store = RecordStore::new();
        let a = store.create("User", Values::new());
        let b = store.create("Address", Values::new());
        assert_ne!(a, b);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = RecordStore::new();
        let a = store.create("User", values([("firstName", "Ann")]));
        let b = store.create("User", values([("firstName", "Bo")]));

        store
            .update("User", a, values([("firstName", "Anna")]))
            .unwrap();

        let rows = store.records("User");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, a);
        assert_eq!(rows[0].get("firstName"), Some("Anna"));
        assert_eq!(rows[1].id, b);
    }

    #[test]
    fn test_update_missing_id_is_stale() {
        let mut store = RecordStore::new();
        let err = store
            .update("User", RecordId(42), Values::new())
            .unwrap_err();
        assert!(matches!(err, FormError::StaleEditTarget { id: RecordId(42), .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_only_touches_target() {
        let mut store = RecordStore::new();
        let a = store.create("User", Values::new());
        let b = store.create("User", Values::new());
        let c = store.create("Address", Values::new());

        let removed = store.delete("User", a).unwrap();
        assert_eq!(removed.id, a);
        assert_eq!(store.len("User"), 1);
        assert!(store.contains("User", b));
        assert!(store.contains("Address", c));

        assert!(matches!(
            store.delete("User", a),
            Err(FormError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = RecordStore::new();
        let a = store.create("User", Values::new());
        store.delete("User", a).unwrap();
        store.clear();
        let b = store.create("User", Values::new());
        assert!(b > a);
    }
}
