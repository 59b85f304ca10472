//! redb-backed offline store
//!
//! The whole roster is one JSON array stored under a fixed key. It is read
//! in full on every access and rewritten in full on every mutation; this is
//! a single-user, single-device mode with no server of record.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::models::{EMPLOYEE_TABLE, Employee, EmployeeInput, EmployeeUpdate, employee_key};
use shared::util::now_millis;
use thiserror::Error;

/// Table holding the serialized roster: key = fixed name, value = JSON array
const ROSTER_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("roster");

/// Fixed key of the serialized record array
pub const EMPLOYEES_KEY: &str = "employees";

/// Local storage errors
#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type LocalStoreResult<T> = Result<T, LocalStoreError>;

/// Offline roster storage backed by redb
#[derive(Clone)]
pub struct LocalStore {
    db: Arc<Database>,
}

impl LocalStore {
    /// Open or create the store at the given path
    pub fn open(path: impl AsRef<Path>) -> LocalStoreResult<Self> {
        Self::init(Database::create(path)?)
    }

    /// Open an in-memory store
    pub fn open_in_memory() -> LocalStoreResult<Self> {
        Self::init(Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?)
    }

    fn init(db: Database) -> LocalStoreResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ROSTER_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Load the full roster (empty when nothing was saved yet)
    pub fn load(&self) -> LocalStoreResult<Vec<Employee>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ROSTER_TABLE)?;
        match table.get(EMPLOYEES_KEY)? {
            Some(guard) => Ok(serde_json::from_slice(guard.value())?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the full roster
    pub fn save(&self, employees: &[Employee]) -> LocalStoreResult<()> {
        let bytes = serde_json::to_vec(employees)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ROSTER_TABLE)?;
            table.insert(EMPLOYEES_KEY, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Add a record at the front of the roster, assigning id and timestamp
    pub fn insert(&self, input: EmployeeInput) -> LocalStoreResult<Employee> {
        let mut employees = self.load()?;
        let mut employee = Employee::from_input(input);
        employee.id = Some(format!("{}:{}", EMPLOYEE_TABLE, uuid::Uuid::new_v4()));
        employee.created_at = Some(now_millis());
        employees.insert(0, employee.clone());
        self.save(&employees)?;
        Ok(employee)
    }

    /// Merge fields into the matching record; `None` when there is none
    pub fn modify(&self, id: &str, update: EmployeeUpdate) -> LocalStoreResult<Option<Employee>> {
        let mut employees = self.load()?;
        let Some(employee) = employees.iter_mut().find(|e| same_id(e, id)) else {
            return Ok(None);
        };
        employee.apply(update);
        let updated = employee.clone();
        self.save(&employees)?;
        Ok(Some(updated))
    }

    /// Remove the matching record if present
    pub fn remove(&self, id: &str) -> LocalStoreResult<()> {
        let mut employees = self.load()?;
        let before = employees.len();
        employees.retain(|e| !same_id(e, id));
        if employees.len() != before {
            self.save(&employees)?;
        }
        Ok(())
    }
}

fn same_id(employee: &Employee, id: &str) -> bool {
    employee
        .id
        .as_deref()
        .is_some_and(|own| employee_key(own) == employee_key(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(first: &str) -> EmployeeInput {
        EmployeeInput {
            first_name: first.to_string(),
            last_name: "Li".to_string(),
            email: "a@x.com".to_string(),
            contact: "5551234567".to_string(),
            designation: "Eng".to_string(),
            salary: 90000.75,
        }
    }

    #[test]
    fn test_empty_store_loads_nothing() {
        let store = LocalStore::open_in_memory().unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_insert_prepends_with_ids() {
        let store = LocalStore::open_in_memory().unwrap();
        let a = store.insert(input("Ana")).unwrap();
        let b = store.insert(input("Ben")).unwrap();

        assert!(a.id.as_deref().unwrap().starts_with("employee:"));
        assert_ne!(a.id, b.id);

        let names: Vec<String> = store
            .load()
            .unwrap()
            .into_iter()
            .map(|e| e.first_name)
            .collect();
        assert_eq!(names, vec!["Ben", "Ana"]);
    }

    #[test]
    fn test_modify_and_remove() {
        let store = LocalStore::open_in_memory().unwrap();
        let a = store.insert(input("Ana")).unwrap();
        let id = a.id.clone().unwrap();

        let updated = store
            .modify(
                &id,
                EmployeeUpdate {
                    salary: Some(1.5),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.salary, 1.5);
        assert_eq!(updated.id, a.id);

        assert!(store.modify("employee:missing", EmployeeUpdate::default()).unwrap().is_none());
        assert_eq!(store.load().unwrap().len(), 1);

        store.remove("employee:missing").unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
        store.remove(&id).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_roster_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.redb");

        {
            let store = LocalStore::open(&path).unwrap();
            store.insert(input("Ana")).unwrap();
        }

        let store = LocalStore::open(&path).unwrap();
        let employees = store.load().unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].first_name, "Ana");
    }
}
