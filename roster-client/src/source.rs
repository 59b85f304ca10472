//! Record source abstraction
//!
//! The book and page controller are generic over where records live: the
//! roster server ([`HttpClient`]) or the offline store ([`LocalStore`]).

use async_trait::async_trait;
use shared::models::{Employee, EmployeeInput, EmployeeUpdate};

use crate::{ClientResult, HttpClient, LocalStore};

#[async_trait]
pub trait EmployeeSource: Send + Sync {
    /// All records, newest first
    async fn list(&self) -> ClientResult<Vec<Employee>>;

    /// Persist a new record; the source assigns its identifier
    async fn create(&self, input: EmployeeInput) -> ClientResult<Employee>;

    /// Merge `update` into the record named by `id`; `None` if there is none
    async fn update(&self, id: &str, update: EmployeeUpdate) -> ClientResult<Option<Employee>>;

    /// Remove the record named by `id`; a missing record is not an error
    async fn delete(&self, id: &str) -> ClientResult<()>;
}

#[async_trait]
impl EmployeeSource for HttpClient {
    async fn list(&self) -> ClientResult<Vec<Employee>> {
        self.list_employees().await
    }

    async fn create(&self, input: EmployeeInput) -> ClientResult<Employee> {
        self.create_employee(&input).await
    }

    async fn update(&self, id: &str, update: EmployeeUpdate) -> ClientResult<Option<Employee>> {
        self.update_employee(id, &update).await
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.delete_employee(id).await
    }
}

#[async_trait]
impl EmployeeSource for LocalStore {
    async fn list(&self) -> ClientResult<Vec<Employee>> {
        Ok(self.load()?)
    }

    async fn create(&self, input: EmployeeInput) -> ClientResult<Employee> {
        Ok(self.insert(input)?)
    }

    async fn update(&self, id: &str, update: EmployeeUpdate) -> ClientResult<Option<Employee>> {
        Ok(self.modify(id, update)?)
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        Ok(self.remove(id)?)
    }
}
