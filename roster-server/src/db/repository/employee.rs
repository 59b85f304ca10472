//! Employee Repository

use super::{BaseRepository, RepoError, RepoResult};
use serde::Serialize;
use shared::models::{EMPLOYEE_TABLE, Employee, EmployeeInput, EmployeeUpdate, employee_key};
use shared::util::{now_millis, snowflake_id};
use surrealdb::engine::any::Any;
use surrealdb::{RecordId, Surreal};

/// Field projection shared by every read (record id flattened to a string)
const PROJECTION: &str =
    "<string>id AS id, firstName, lastName, email, contact, designation, salary, createdAt";

/// Stored document body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeDocument {
    first_name: String,
    last_name: String,
    email: String,
    contact: String,
    designation: String,
    salary: f64,
    created_at: i64,
}

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all employees, newest first
    ///
    /// Records sharing a creation millisecond are ordered by key, so the
    /// listing order is stable.
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query(format!(
                "SELECT {PROJECTION} FROM {EMPLOYEE_TABLE} ORDER BY createdAt DESC, id DESC"
            ))
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find employee by id
    ///
    /// An id that cannot name an employee record yields `None`.
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let Some(thing) = record_id(id) else {
            return Ok(None);
        };
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {PROJECTION} FROM $thing"))
            .bind(("thing", thing))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Create a new employee
    ///
    /// The payload is stored as-is; the store assigns id and creation time.
    pub async fn create(&self, data: EmployeeInput) -> RepoResult<Employee> {
        let key = snowflake_id();
        let thing = RecordId::from_table_key(EMPLOYEE_TABLE, key);
        let doc = EmployeeDocument {
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            contact: data.contact,
            designation: data.designation,
            salary: data.salary,
            created_at: now_millis(),
        };

        self.base
            .db()
            .query("CREATE $thing CONTENT $data RETURN NONE")
            .bind(("thing", thing))
            .bind(("data", doc))
            .await?
            .check()?;

        let id = format!("{EMPLOYEE_TABLE}:{key}");
        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database(format!("Failed to create employee {id}")))
    }

    /// Update an employee
    ///
    /// Present fields are merged into the stored document. Returns `None`
    /// without creating anything when no record matches `id`.
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Option<Employee>> {
        let Some(thing) = record_id(id) else {
            return Ok(None);
        };
        if self.find_by_id(id).await?.is_none() {
            return Ok(None);
        }

        self.base
            .db()
            .query("UPDATE $thing MERGE $data RETURN NONE")
            .bind(("thing", thing))
            .bind(("data", data))
            .await?
            .check()?;

        self.find_by_id(id).await
    }

    /// Hard delete an employee; deleting a missing record is not an error
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let Some(thing) = record_id(id) else {
            return Ok(());
        };
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?
            .check()?;
        Ok(())
    }
}

/// Parse an external id (`employee:<key>` or `<key>`) into a record id
fn record_id(id: &str) -> Option<RecordId> {
    let key = employee_key(id.trim());
    if key.is_empty() {
        return None;
    }
    Some(match key.parse::<i64>() {
        Ok(n) => RecordId::from_table_key(EMPLOYEE_TABLE, n),
        Err(_) => RecordId::from_table_key(EMPLOYEE_TABLE, key.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbPool;
    use std::time::Duration;

    async fn repo() -> EmployeeRepository {
        let pool = DbPool::new("mem://", "test", "test");
        EmployeeRepository::new(pool.connection().await.unwrap())
    }

    fn input(first: &str, salary: f64) -> EmployeeInput {
        EmployeeInput {
            first_name: first.to_string(),
            last_name: "Li".to_string(),
            email: format!("{}@x.com", first.to_lowercase()),
            contact: "5551234567".to_string(),
            designation: "Eng".to_string(),
            salary,
        }
    }

    #[test]
    fn test_record_id_accepts_both_forms() {
        let a = record_id("employee:42").unwrap();
        let b = record_id("42").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.table(), "employee");
        assert!(record_id("").is_none());
        assert!(record_id("employee:").is_none());
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let repo = repo().await;
        let created = repo.create(input("Ana", 90000.75)).await.unwrap();

        let id = created.id.clone().unwrap();
        assert!(id.starts_with("employee:"));
        assert!(created.created_at.is_some());
        assert_eq!(created.first_name, "Ana");
        assert_eq!(created.salary, 90000.75);

        let found = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found, created);

        // Bare key resolves to the same record
        let key = employee_key(&id).to_string();
        assert_eq!(repo.find_by_id(&key).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_create_stores_payload_as_is() {
        let repo = repo().await;
        let mut data = input("Bad", -5.0);
        data.email = "not-an-email".to_string();
        data.contact = "123456789012345".to_string();

        let created = repo.create(data).await.unwrap();
        assert_eq!(created.salary, -5.0);
        assert_eq!(created.email, "not-an-email");
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let repo = repo().await;
        for name in ["First", "Second", "Third"] {
            repo.create(input(name, 1000.0)).await.unwrap();
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.first_name)
            .collect();
        assert_eq!(names, vec!["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn test_find_all_breaks_ties_by_key() {
        let repo = repo().await;
        for n in 0..12 {
            repo.create(input(&format!("Burst{n}"), 1000.0)).await.unwrap();
        }

        let listed = repo.find_all().await.unwrap();
        assert_eq!(listed.len(), 12);
        let order: Vec<(i64, i64)> = listed
            .iter()
            .map(|e| {
                let key = employee_key(e.id.as_deref().unwrap()).parse::<i64>().unwrap();
                (e.created_at.unwrap(), key)
            })
            .collect();
        assert!(order.windows(2).all(|w| w[0] > w[1]));

        let again: Vec<Option<String>> =
            repo.find_all().await.unwrap().into_iter().map(|e| e.id).collect();
        let first: Vec<Option<String>> = listed.into_iter().map(|e| e.id).collect();
        assert_eq!(again, first);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let repo = repo().await;
        let created = repo.create(input("Ana", 90000.75)).await.unwrap();
        let id = created.id.clone().unwrap();

        let updated = repo
            .update(
                &id,
                EmployeeUpdate {
                    designation: Some("Lead".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.designation, "Lead");
        assert_eq!(updated.first_name, "Ana");
        assert_eq!(updated.salary, 90000.75);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none_and_creates_nothing() {
        let repo = repo().await;
        let update = EmployeeUpdate::from(input("Ghost", 1.0));

        assert!(repo.update("employee:1", update.clone()).await.unwrap().is_none());
        assert!(repo.update("someone-else:1", update).await.unwrap().is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = repo().await;
        let created = repo.create(input("Ana", 1.0)).await.unwrap();
        let id = created.id.unwrap();

        repo.delete(&id).await.unwrap();
        assert!(repo.find_by_id(&id).await.unwrap().is_none());

        // Deleting again, or deleting something that never existed, succeeds
        repo.delete(&id).await.unwrap();
        repo.delete("employee:999").await.unwrap();
        repo.delete("garbage").await.unwrap();
    }
}
