//! The exclusive-access employee table.
//!
//! [`EmployeeStore`] keeps the records and the next-identifier counter
//! behind a single [`Mutex`]. Every public method takes the lock once,
//! does pure in-memory work, and releases it before returning, so
//! operations are linearizable and never observe a half-applied write.
//! No method calls another locking method while holding the guard.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use roster_types::{Employee, EmployeeDraft, EmployeeId};
use tracing::debug;

use crate::page::{EmployeePage, PageOutOfRange, PageRequest};

/// State guarded by the store lock.
#[derive(Debug)]
struct StoreInner {
    /// Records keyed by their own id.
    employees: HashMap<EmployeeId, Employee>,
    /// The id the next created record receives. Strictly greater than
    /// every id ever handed out; never decremented.
    next_id: EmployeeId,
}

impl StoreInner {
    /// Assign the next id to `draft`, store it, and return the record.
    fn insert_draft(&mut self, draft: EmployeeDraft) -> Employee {
        let id = self.next_id;
        self.next_id = id.next();
        let employee = Employee::from_draft(id, draft);
        self.employees.insert(id, employee.clone());
        employee
    }
}

/// In-memory employee store. One instance per process, shared via `Arc`.
#[derive(Debug)]
pub struct EmployeeStore {
    inner: Mutex<StoreInner>,
}

impl EmployeeStore {
    /// Create an empty store whose first assigned id is 1.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                employees: HashMap::new(),
                next_id: EmployeeId::FIRST,
            }),
        }
    }

    /// Acquire the store lock.
    ///
    /// Every critical section leaves the state consistent, so a lock
    /// poisoned by a panicking holder is still safe to use.
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a new record under the next identifier and return it.
    pub fn create(&self, draft: EmployeeDraft) -> Employee {
        let employee = self.lock().insert_draft(draft);
        debug!(id = %employee.id, "employee stored");
        employee
    }

    /// Store every draft in input order, each under its own fresh id.
    ///
    /// The whole batch is applied under one lock acquisition, so the
    /// assigned ids are consecutive.
    pub fn batch_create(&self, drafts: Vec<EmployeeDraft>) -> Vec<Employee> {
        let created: Vec<Employee> = {
            let mut inner = self.lock();
            drafts
                .into_iter()
                .map(|draft| inner.insert_draft(draft))
                .collect()
        };
        debug!(count = created.len(), "employee batch stored");
        created
    }

    /// Look up a record by id.
    pub fn get(&self, id: EmployeeId) -> Option<Employee> {
        self.lock().employees.get(&id).cloned()
    }

    /// Replace the mutable fields of an existing record.
    ///
    /// Returns the updated record, or `None` (with no change) if `id` is
    /// not stored.
    pub fn update(&self, id: EmployeeId, draft: EmployeeDraft) -> Option<Employee> {
        let mut inner = self.lock();
        let employee = inner.employees.get_mut(&id)?;
        employee.apply(draft);
        Some(employee.clone())
    }

    /// Remove a record. Returns `false` (with no change) if `id` is not
    /// stored. The id is never assigned again.
    pub fn delete(&self, id: EmployeeId) -> bool {
        self.lock().employees.remove(&id).is_some()
    }

    /// Return one page of records sorted by ascending id.
    ///
    /// The snapshot, sort, and slice all happen under the lock.
    ///
    /// # Errors
    ///
    /// Returns [`PageOutOfRange`] when the page starts at or past the end
    /// of the stored records, including page 1 of an empty store.
    pub fn list_page(&self, request: PageRequest) -> Result<EmployeePage, PageOutOfRange> {
        let inner = self.lock();
        let mut records: Vec<Employee> = inner.employees.values().cloned().collect();
        records.sort_unstable_by_key(|e| e.id);
        request.slice(records)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().employees.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.lock().employees.is_empty()
    }
}

impl Default for EmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    fn draft(name: &str) -> EmployeeDraft {
        EmployeeDraft::new(name, "Engineer", 1000.0)
    }

    fn three_record_store() -> EmployeeStore {
        let store = EmployeeStore::new();
        store.create(draft("a"));
        store.create(draft("b"));
        store.create(draft("c"));
        store
    }

    fn page_ids(page: &EmployeePage) -> Vec<u64> {
        page.employees.iter().map(|e| e.id.into_inner()).collect()
    }

    // -----------------------------------------------------------------------
    // Create / get
    // -----------------------------------------------------------------------

    #[test]
    fn create_then_get_round_trips() {
        let store = EmployeeStore::new();
        let created = store.create(EmployeeDraft::new("Ada", "CTO", 250_000.0));

        let fetched = store.get(created.id).unwrap();
        assert_eq!(fetched.id, EmployeeId(1));
        assert_eq!(fetched.name, "Ada");
        assert_eq!(fetched.position, "CTO");
        assert_eq!(fetched.salary, 250_000.0);
        assert_eq!(fetched, created);
    }

    #[test]
    fn get_missing_is_none() {
        let store = EmployeeStore::new();
        assert!(store.get(EmployeeId(1)).is_none());
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let store = EmployeeStore::new();
        let ids: Vec<u64> = (0..5)
            .map(|_| store.create(draft("x")).id.into_inner())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let store = EmployeeStore::new();
        let first = store.create(draft("a"));
        let second = store.create(draft("b"));
        assert!(store.delete(second.id));
        assert!(store.delete(first.id));

        let third = store.create(draft("c"));
        assert_eq!(third.id, EmployeeId(3));
        assert!(store.get(first.id).is_none());
        assert!(store.get(second.id).is_none());
    }

    // -----------------------------------------------------------------------
    // Batch create
    // -----------------------------------------------------------------------

    #[test]
    fn batch_create_preserves_input_order() {
        let store = EmployeeStore::new();
        store.create(draft("before"));

        let created = store.batch_create(vec![draft("x"), draft("y"), draft("z")]);
        let names: Vec<&str> = created.iter().map(|e| e.name.as_str()).collect();
        let ids: Vec<u64> = created.iter().map(|e| e.id.into_inner()).collect();

        assert_eq!(names, vec!["x", "y", "z"]);
        assert_eq!(ids, vec![2, 3, 4]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn batch_create_empty_is_a_no_op() {
        let store = EmployeeStore::new();
        assert!(store.batch_create(Vec::new()).is_empty());
        assert!(store.is_empty());
        assert_eq!(store.create(draft("a")).id, EmployeeId(1));
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    #[test]
    fn update_replaces_fields_and_keeps_id() {
        let store = three_record_store();
        let updated = store
            .update(EmployeeId(2), EmployeeDraft::new("B2", "Manager", 5.5))
            .unwrap();

        assert_eq!(updated.id, EmployeeId(2));
        assert_eq!(updated.name, "B2");
        assert_eq!(updated.position, "Manager");
        assert_eq!(updated.salary, 5.5);
        assert_eq!(store.get(EmployeeId(2)).unwrap(), updated);

        // Neighbours untouched.
        assert_eq!(store.get(EmployeeId(1)).unwrap().name, "a");
        assert_eq!(store.get(EmployeeId(3)).unwrap().name, "c");
    }

    #[test]
    fn update_missing_changes_nothing() {
        let store = three_record_store();
        let before = store.list_page(PageRequest::default()).unwrap();

        assert!(store.update(EmployeeId(9), draft("ghost")).is_none());

        let after = store.list_page(PageRequest::default()).unwrap();
        assert_eq!(before, after);
        assert_eq!(store.create(draft("d")).id, EmployeeId(4));
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[test]
    fn delete_removes_exactly_one() {
        let store = three_record_store();
        assert!(store.delete(EmployeeId(2)));
        assert_eq!(store.len(), 2);
        assert!(store.get(EmployeeId(2)).is_none());
        assert!(store.get(EmployeeId(1)).is_some());
        assert!(store.get(EmployeeId(3)).is_some());
    }

    #[test]
    fn second_delete_is_not_found() {
        let store = three_record_store();
        assert!(store.delete(EmployeeId(1)));
        assert!(!store.delete(EmployeeId(1)));
        assert_eq!(store.len(), 2);
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    #[test]
    fn list_first_page() {
        let store = three_record_store();
        let page = store.list_page(PageRequest::new(1, 2)).unwrap();
        assert_eq!(page_ids(&page), vec![1, 2]);
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 2);
    }

    #[test]
    fn list_second_page() {
        let store = three_record_store();
        let page = store.list_page(PageRequest::new(2, 2)).unwrap();
        assert_eq!(page_ids(&page), vec![3]);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn list_past_end_is_out_of_range() {
        let store = three_record_store();
        let err = store.list_page(PageRequest::new(3, 2)).unwrap_err();
        assert_eq!(err.total, 3);
        assert_eq!(err.page, 3);
    }

    #[test]
    fn list_empty_store_is_out_of_range() {
        let store = EmployeeStore::new();
        assert!(store.list_page(PageRequest::new(1, 50)).is_err());
    }

    #[test]
    fn list_is_sorted_by_id_after_deletes_and_updates() {
        let store = EmployeeStore::new();
        for i in 0..20 {
            store.create(draft(&format!("e{i}")));
        }
        for id in [3, 7, 11] {
            assert!(store.delete(EmployeeId(id)));
        }
        store.update(EmployeeId(15), draft("renamed")).unwrap();

        let page = store.list_page(PageRequest::new(1, 50)).unwrap();
        let ids = page_ids(&page);
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert_eq!(page.total, 17);
        assert!(!ids.contains(&7));
    }

    // -----------------------------------------------------------------------
    // Concurrency
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_creates_assign_unique_ids() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 250;

        let store = Arc::new(EmployeeStore::new());

        let ids: Vec<EmployeeId> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let store = Arc::clone(&store);
                    scope.spawn(move || {
                        (0..PER_THREAD)
                            .map(|_| store.create(draft("c")).id)
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        let unique: HashSet<EmployeeId> = ids.iter().copied().collect();
        assert_eq!(ids.len(), THREADS * PER_THREAD);
        assert_eq!(unique.len(), THREADS * PER_THREAD);
        assert_eq!(store.len(), THREADS * PER_THREAD);
        assert_eq!(unique.iter().max(), Some(&EmployeeId(2000)));
    }

    #[test]
    fn concurrent_batches_get_consecutive_ids() {
        let store = Arc::new(EmployeeStore::new());

        let batches: Vec<Vec<Employee>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let store = Arc::clone(&store);
                    scope.spawn(move || store.batch_create(vec![draft("x"); 10]))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for batch in &batches {
            let ids: Vec<u64> = batch.iter().map(|e| e.id.into_inner()).collect();
            let first = ids[0];
            let expected: Vec<u64> = (first..first + 10).collect();
            assert_eq!(ids, expected);
        }
        assert_eq!(store.len(), 40);
    }

    #[test]
    fn listing_never_observes_a_partial_batch() {
        let store = Arc::new(EmployeeStore::new());

        std::thread::scope(|scope| {
            let writer = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..200 {
                    writer.batch_create(vec![draft("b"); 5]);
                }
            });

            let reader = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..200 {
                    if let Ok(page) = reader.list_page(PageRequest::new(1, 10_000)) {
                        assert_eq!(page.total % 5, 0);
                    }
                }
            });
        });

        assert_eq!(store.len(), 1000);
    }
}
