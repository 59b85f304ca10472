//! Employee book: the client-side copy of the roster
//!
//! Holds the records last fetched from an [`EmployeeSource`] plus a loading
//! flag. Every successful mutation invalidates the copy and reloads it in
//! full; nothing is patched locally. A failed call changes nothing and is
//! only logged.

use shared::models::{Employee, EmployeeInput, EmployeeUpdate};

use crate::EmployeeSource;

pub struct EmployeeBook<S> {
    source: S,
    employees: Vec<Employee>,
    loading: bool,
}

impl<S: EmployeeSource> EmployeeBook<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            employees: Vec::new(),
            loading: false,
        }
    }

    /// Create a book and perform the initial fetch
    pub async fn open(source: S) -> Self {
        let mut book = Self::new(source);
        book.load().await;
        book
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current records, in the order the source returned them
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Initial fetch
    pub async fn load(&mut self) {
        self.refresh().await;
    }

    /// Replace the record set with a fresh listing
    ///
    /// When overlapping refreshes race, the last one to finish wins.
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.source.list().await {
            Ok(employees) => self.employees = employees,
            Err(e) => tracing::warn!(error = %e, "Failed to load employees"),
        }
        self.loading = false;
    }

    pub async fn add(&mut self, input: EmployeeInput) {
        match self.source.create(input).await {
            Ok(_) => self.refresh().await,
            Err(e) => tracing::warn!(error = %e, "Failed to add employee"),
        }
    }

    /// Update by id; reloads even when the source matched no record
    pub async fn update(&mut self, id: &str, update: EmployeeUpdate) {
        match self.source.update(id, update).await {
            Ok(_) => self.refresh().await,
            Err(e) => tracing::warn!(id = %id, error = %e, "Failed to update employee"),
        }
    }

    pub async fn delete(&mut self, id: &str) {
        match self.source.delete(id).await {
            Ok(()) => self.refresh().await,
            Err(e) => tracing::warn!(id = %id, error = %e, "Failed to delete employee"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientError, ClientResult, LocalStore};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ana() -> EmployeeInput {
        EmployeeInput {
            first_name: "Ana".to_string(),
            last_name: "Li".to_string(),
            email: "a@x.com".to_string(),
            contact: "5551234567".to_string(),
            designation: "Eng".to_string(),
            salary: 90000.75,
        }
    }

    /// Source whose mutations always fail; counts list calls
    #[derive(Default)]
    struct BrokenSource {
        lists: AtomicUsize,
        seed: Mutex<Vec<Employee>>,
    }

    #[async_trait]
    impl EmployeeSource for BrokenSource {
        async fn list(&self) -> ClientResult<Vec<Employee>> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            Ok(self.seed.lock().unwrap().clone())
        }

        async fn create(&self, _input: EmployeeInput) -> ClientResult<Employee> {
            Err(ClientError::Internal("boom".into()))
        }

        async fn update(&self, _id: &str, _u: EmployeeUpdate) -> ClientResult<Option<Employee>> {
            Err(ClientError::Validation("ID required".into()))
        }

        async fn delete(&self, _id: &str) -> ClientResult<()> {
            Err(ClientError::Internal("boom".into()))
        }
    }

    #[tokio::test]
    async fn test_open_fetches_once() {
        let store = LocalStore::open_in_memory().unwrap();
        store.insert(ana()).unwrap();

        let book = EmployeeBook::open(store).await;
        assert!(!book.is_loading());
        assert_eq!(book.employees().len(), 1);
    }

    #[tokio::test]
    async fn test_mutations_reload_in_full() {
        let store = LocalStore::open_in_memory().unwrap();
        let mut book = EmployeeBook::open(store).await;

        book.add(ana()).await;
        assert_eq!(book.employees().len(), 1);
        assert_eq!(book.employees()[0].display_salary(), "90000");

        // A record written behind the book's back shows up on the next reload
        book.source().insert(ana()).unwrap();
        let id = book.employees()[0].id.clone().unwrap();
        book.update(
            &id,
            EmployeeUpdate {
                first_name: Some("Anna".into()),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(book.employees().len(), 2);
        assert!(book.employees().iter().any(|e| e.first_name == "Anna"));

        book.delete(&id).await;
        assert_eq!(book.employees().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_mutations_change_nothing() {
        let mut existing = Employee::from_input(ana());
        existing.id = Some("employee:1".into());
        let source = BrokenSource {
            seed: Mutex::new(vec![existing.clone()]),
            ..Default::default()
        };

        let mut book = EmployeeBook::open(source).await;
        assert_eq!(book.source().lists.load(Ordering::SeqCst), 1);

        book.add(ana()).await;
        book.update("employee:1", EmployeeUpdate::default()).await;
        book.delete("employee:1").await;

        // No reload was triggered and the copy is untouched
        assert_eq!(book.source().lists.load(Ordering::SeqCst), 1);
        assert_eq!(book.employees(), &[existing]);
    }

    #[tokio::test]
    async fn test_update_of_missing_record_still_reloads() {
        let store = LocalStore::open_in_memory().unwrap();
        let mut book = EmployeeBook::open(store).await;

        book.update("employee:nope", EmployeeUpdate::default()).await;
        assert!(book.employees().is_empty());
    }
}
