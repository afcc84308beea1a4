//! Store traits for filtering and sorting

use super::query::{CardFilter, CardSort};

/// Trait for stores that support filtering and sorting
///
/// Queries never mutate the store; they work on a copy of its contents.
pub trait QueryableStore<T> {
    /// Keep the entities matching every predicate of `filter`
    fn apply_filters(&self, data: Vec<T>, filter: &CardFilter) -> Vec<T>;

    /// Order entities by `sort`, keeping the input order among equal keys
    fn apply_sort(&self, data: Vec<T>, sort: CardSort) -> Vec<T>;

    /// Get all entities (unfiltered, unsorted)
    fn list_all(&self) -> Vec<T>;

    /// Filter then sort a copy of the store contents
    fn query(&self, filter: &CardFilter, sort: CardSort) -> Vec<T> {
        let filtered = self.apply_filters(self.list_all(), filter);
        self.apply_sort(filtered, sort)
    }
}
