//! Employee list view: search, numbering, exports and row actions

use shared::models::Employee;

use crate::ClientResult;
use crate::export::{self, ExportFile};

/// One displayed row: 1-based position in the filtered order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListRow<'a> {
    pub position: usize,
    pub employee: &'a Employee,
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeListView {
    search: String,
}

impl EmployeeListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Records whose combined field text contains the search text
    ///
    /// Case-insensitive, ignoring surrounding whitespace in the search text.
    /// A blank search passes every record through.
    pub fn filter<'a>(&self, employees: &'a [Employee]) -> Vec<&'a Employee> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return employees.iter().collect();
        }
        employees
            .iter()
            .filter(|e| e.search_text().to_lowercase().contains(&needle))
            .collect()
    }

    /// Filtered records numbered by display position
    pub fn rows<'a>(&self, employees: &'a [Employee]) -> Vec<ListRow<'a>> {
        self.filter(employees)
            .into_iter()
            .enumerate()
            .map(|(idx, employee)| ListRow {
                position: idx + 1,
                employee,
            })
            .collect()
    }

    /// Spreadsheet of the filtered records (`employees.xlsx`)
    pub fn export_spreadsheet(&self, employees: &[Employee]) -> ClientResult<ExportFile> {
        export::spreadsheet(&self.filter(employees))
    }

    /// PDF table of the filtered records (`employees.pdf`)
    pub fn export_document(&self, employees: &[Employee]) -> ClientResult<ExportFile> {
        export::document(&self.filter(employees))
    }

    /// Confirmation prompt shown before deleting `employee`
    pub fn delete_prompt(employee: &Employee) -> String {
        format!(
            "Are you sure you want to delete {} {}?",
            employee.first_name, employee.last_name
        )
    }

    /// Ask `confirm` before deleting; yields the id to delete when accepted
    ///
    /// Records that were never persisted have no id and are refused
    /// without prompting.
    pub fn request_delete<F>(employee: &Employee, confirm: F) -> Option<String>
    where
        F: FnOnce(&str) -> bool,
    {
        let Some(id) = employee.id.as_deref() else {
            tracing::warn!(
                name = %employee.full_name(),
                "Refusing to delete an employee that was never saved"
            );
            return None;
        };
        confirm(&Self::delete_prompt(employee)).then(|| id.to_string())
    }
}
