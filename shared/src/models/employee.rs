//! Employee Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Record table / identifier prefix (`employee:<key>`)
pub const EMPLOYEE_TABLE: &str = "employee";

/// Employee record as stored and returned by the API
///
/// `id` and `created_at` are assigned by the store and are absent on a
/// record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact: String,
    pub designation: String,
    pub salary: f64,
    /// Creation timestamp (Unix millis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Employee {
    /// Build a not-yet-persisted record from validated input
    pub fn from_input(input: EmployeeInput) -> Self {
        Self {
            id: None,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            contact: input.contact,
            designation: input.designation,
            salary: input.salary,
            created_at: None,
        }
    }

    /// Business fields of this record (identifier and timestamp dropped)
    pub fn to_input(&self) -> EmployeeInput {
        EmployeeInput {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            contact: self.contact.clone(),
            designation: self.designation.clone(),
            salary: self.salary,
        }
    }

    /// Apply replacement fields; identifier and creation time stay fixed
    pub fn apply(&mut self, update: EmployeeUpdate) {
        if let Some(v) = update.first_name {
            self.first_name = v;
        }
        if let Some(v) = update.last_name {
            self.last_name = v;
        }
        if let Some(v) = update.email {
            self.email = v;
        }
        if let Some(v) = update.contact {
            self.contact = v;
        }
        if let Some(v) = update.designation {
            self.designation = v;
        }
        if let Some(v) = update.salary {
            self.salary = v;
        }
    }

    /// Full name as shown in confirmations
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Salary as displayed and exported
    pub fn display_salary(&self) -> String {
        format_salary(self.salary)
    }

    /// Concatenation of every field value, used by free-text search
    ///
    /// Includes the identifier (when persisted) and the salary as a plain number.
    pub fn search_text(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(7);
        if let Some(id) = &self.id {
            parts.push(id.clone());
        }
        parts.push(self.first_name.clone());
        parts.push(self.last_name.clone());
        parts.push(self.email.clone());
        parts.push(self.contact.clone());
        parts.push(self.designation.clone());
        parts.push(self.salary.to_string());
        parts.join(" ")
    }
}

/// Salary display rule: truncated toward zero, no decimals, no currency symbol
pub fn format_salary(salary: f64) -> String {
    if !salary.is_finite() {
        return "0".to_string();
    }
    (salary.trunc() as i64).to_string()
}

/// Employee fields without identifier (create payload / form output)
///
/// The validation rules are the form schema. The server persists the
/// payload as-is and does not run them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(max = 10, message = "Contact must be at most 10 characters"))]
    pub contact: String,
    #[validate(length(min = 1, message = "Designation is required"))]
    pub designation: String,
    #[validate(range(min = 0.0, message = "Salary must be positive"))]
    pub salary: f64,
}

impl Default for EmployeeInput {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            contact: String::new(),
            designation: String::new(),
            salary: 0.0,
        }
    }
}

/// Update employee payload
///
/// Every present field replaces the stored value; absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
}

impl From<EmployeeInput> for EmployeeUpdate {
    fn from(input: EmployeeInput) -> Self {
        Self {
            first_name: Some(input.first_name),
            last_name: Some(input.last_name),
            email: Some(input.email),
            contact: Some(input.contact),
            designation: Some(input.designation),
            salary: Some(input.salary),
        }
    }
}

/// Normalize an identifier to its record key
///
/// Accepts both `employee:<key>` and a bare `<key>`.
pub fn employee_key(id: &str) -> &str {
    id.strip_prefix(EMPLOYEE_TABLE)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}
