//! Explicit keyed cache over the fetched expense data.
//!
//! The original behavior was hidden inside a third-party fetching
//! library; here it is a named component with fixed rules:
//! - create invalidates the collection (forcing a refetch);
//! - delete removes the id from the collection and the record entry;
//! - update replaces the record in both.
//!
//! Reads are keyed by stable identity (the whole collection, or one
//! record per id), so a completed fetch simply replaces the previous
//! value: last-write-wins, no cross-request coordination needed.

use std::collections::HashMap;

use api_types::expense::Expense;

#[derive(Debug, Default)]
pub struct ExpenseCache {
    collection: Option<Vec<Expense>>,
    records: HashMap<String, Expense>,
}

impl ExpenseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached collection, `None` when never fetched or invalidated.
    pub fn collection(&self) -> Option<&[Expense]> {
        self.collection.as_deref()
    }

    pub fn put_collection(&mut self, expenses: Vec<Expense>) {
        self.collection = Some(expenses);
    }

    pub fn invalidate_collection(&mut self) {
        self.collection = None;
    }

    pub fn record(&self, id: &str) -> Option<&Expense> {
        self.records.get(id)
    }

    pub fn put_record(&mut self, expense: Expense) {
        self.records.insert(expense.id.clone(), expense);
    }

    /// A create makes the cached collection stale.
    pub fn on_created(&mut self) {
        self.invalidate_collection();
    }

    /// A delete removes the id everywhere, keeping the collection
    /// usable without a refetch.
    pub fn on_deleted(&mut self, id: &str) {
        if let Some(collection) = self.collection.as_mut() {
            collection.retain(|e| e.id != id);
        }
        self.records.remove(id);
    }

    /// An update replaces the record in the collection and the
    /// per-record entry.
    pub fn on_updated(&mut self, expense: Expense) {
        if let Some(collection) = self.collection.as_mut() {
            for slot in collection.iter_mut() {
                if slot.id == expense.id {
                    *slot = expense.clone();
                }
            }
        }
        self.put_record(expense);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: &str, name: &str) -> Expense {
        Expense {
            id: id.to_string(),
            name: name.to_string(),
            amount: "1".to_string(),
            description: String::new(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn create_invalidates_collection() {
        let mut cache = ExpenseCache::new();
        cache.put_collection(vec![expense("1", "A")]);
        cache.on_created();
        assert!(cache.collection().is_none());
    }

    #[test]
    fn delete_removes_from_collection_and_records() {
        let mut cache = ExpenseCache::new();
        cache.put_collection(vec![expense("1", "A"), expense("2", "B")]);
        cache.put_record(expense("1", "A"));
        cache.on_deleted("1");
        assert_eq!(cache.collection().map(|c| c.len()), Some(1));
        assert!(cache.record("1").is_none());
        assert!(cache.collection().is_some_and(|c| c[0].id == "2"));
    }

    #[test]
    fn update_replaces_in_both_places() {
        let mut cache = ExpenseCache::new();
        cache.put_collection(vec![expense("1", "A"), expense("2", "B")]);
        cache.on_updated(expense("2", "B renamed"));
        assert!(
            cache
                .collection()
                .is_some_and(|c| c[1].name == "B renamed")
        );
        assert_eq!(cache.record("2").map(|e| e.name.as_str()), Some("B renamed"));
    }

    #[test]
    fn delete_on_empty_cache_is_a_no_op() {
        let mut cache = ExpenseCache::new();
        cache.on_deleted("missing");
        assert!(cache.collection().is_none());
    }
}
