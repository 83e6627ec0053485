//! A small in-memory record store for running predicates end to end.
//!
//! [`MemoryStore`] is the reference query backend: insert records, then
//! [`find`](MemoryStore::find) with a [`Predicate`] built by a chain. It is
//! deliberately simple (linear scan, no indexes) and exists so a chain can be
//! exercised without a database.

use crate::eval::Record;
use crate::predicate::Predicate;

/// An in-memory collection of records, queryable by predicate.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Vec<Record>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record.
    pub fn insert(&mut self, record: Record) {
        self.rows.push(record);
    }

    /// Append every record from an iterator.
    pub fn extend(&mut self, records: impl IntoIterator<Item = Record>) {
        self.rows.extend(records);
    }

    /// All records matching `predicate`, in insertion order.
    pub fn find(&self, predicate: &Predicate) -> Vec<&Record> {
        let matched: Vec<&Record> = self
            .rows
            .iter()
            .filter(|row| predicate.matches(row))
            .collect();
        tracing::debug!(
            total = self.rows.len(),
            matched = matched.len(),
            "predicate scan"
        );
        matched
    }

    /// The number of records matching `predicate`.
    pub fn count(&self, predicate: &Predicate) -> usize {
        self.rows.iter().filter(|row| predicate.matches(row)).count()
    }

    /// The number of records in the store.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use crate::value::Value;

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.extend([
            record! { "id" => 1, "username" => "zhangsan" },
            record! { "id" => 2, "username" => "lisi" },
            record! { "id" => 3, "username" => "wangwu" },
        ]);
        store
    }

    #[test]
    fn test_find_matches_in_insertion_order() {
        let store = store();
        let rows = store.find(&Predicate::Gt("id".into(), Value::Int(1)));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("username"), Some(&Value::String("lisi".into())));
    }

    #[test]
    fn test_neutral_predicate_matches_everything() {
        let store = store();
        assert_eq!(store.count(&Predicate::Always), 3);
    }

    #[test]
    fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.find(&Predicate::Always).is_empty());
    }
}
