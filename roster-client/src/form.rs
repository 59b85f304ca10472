//! Employee form state
//!
//! Field drafts are kept as the text the user typed. Submitting runs the
//! [`EmployeeInput`] schema and hands the validated values to the caller
//! exactly once per successful submission.

use std::collections::BTreeMap;

use shared::models::{Employee, EmployeeInput};
use validator::Validate;

/// Form fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Contact,
    Designation,
    Salary,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Contact,
        FormField::Designation,
        FormField::Salary,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Contact => "Contact",
            Self::Designation => "Designation",
            Self::Salary => "Salary",
        }
    }

    /// Map a schema field name (as reported by `validator`)
    fn from_schema(name: &str) -> Option<Self> {
        match name {
            "first_name" => Some(Self::FirstName),
            "last_name" => Some(Self::LastName),
            "email" => Some(Self::Email),
            "contact" => Some(Self::Contact),
            "designation" => Some(Self::Designation),
            "salary" => Some(Self::Salary),
            _ => None,
        }
    }
}

const SALARY_NOT_A_NUMBER: &str = "Salary must be a number";
const DEFAULT_SALARY: &str = "0";

#[derive(Debug, Clone, PartialEq)]
struct Draft {
    first_name: String,
    last_name: String,
    email: String,
    contact: String,
    designation: String,
    salary: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            contact: String::new(),
            designation: String::new(),
            salary: DEFAULT_SALARY.to_string(),
        }
    }
}

impl Draft {
    fn from_employee(employee: &Employee) -> Self {
        Self {
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            contact: employee.contact.clone(),
            designation: employee.designation.clone(),
            salary: employee.salary.to_string(),
        }
    }

    fn field(&self, field: FormField) -> &String {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Contact => &self.contact,
            FormField::Designation => &self.designation,
            FormField::Salary => &self.salary,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::Contact => &mut self.contact,
            FormField::Designation => &mut self.designation,
            FormField::Salary => &mut self.salary,
        }
    }
}

/// Create/edit form for a single employee
#[derive(Debug, Clone, Default)]
pub struct EmployeeForm {
    draft: Draft,
    errors: BTreeMap<FormField, String>,
    /// Set while editing an existing record: that record's identifier
    target: Option<Option<String>>,
}

impl EmployeeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-populated for editing `employee`
    pub fn for_employee(employee: &Employee) -> Self {
        let mut form = Self::new();
        form.load(Some(employee));
        form
    }

    /// Point the form at a record to edit, or at none (create)
    ///
    /// Fields are re-populated only when the target's identity changes, so
    /// handing in a refreshed copy of the same record keeps in-progress edits.
    pub fn load(&mut self, initial: Option<&Employee>) {
        match initial {
            Some(employee) => {
                let identity = Some(employee.id.clone());
                if self.target != identity {
                    self.draft = Draft::from_employee(employee);
                    self.errors.clear();
                    self.target = identity;
                }
            }
            None => self.target = None,
        }
    }

    /// Whether the form edits an existing record
    pub fn is_editing(&self) -> bool {
        self.target.is_some()
    }

    pub fn value(&self, field: FormField) -> &str {
        self.draft.field(field)
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.draft.field_mut(field) = value.into();
    }

    /// Per-field error text from the last submission attempt
    pub fn errors(&self) -> &BTreeMap<FormField, String> {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Clear every field back to its empty default
    pub fn reset(&mut self) {
        self.draft = Draft::default();
        self.errors.clear();
    }

    /// Validate the drafts, recording per-field errors
    pub fn validate(&mut self) -> Option<EmployeeInput> {
        self.errors.clear();

        let salary = self
            .draft
            .salary
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite());

        let input = EmployeeInput {
            first_name: self.draft.first_name.clone(),
            last_name: self.draft.last_name.clone(),
            email: self.draft.email.clone(),
            contact: self.draft.contact.clone(),
            designation: self.draft.designation.clone(),
            salary: salary.unwrap_or_default(),
        };

        if let Err(errors) = input.validate() {
            for (name, field_errors) in errors.field_errors() {
                let (Some(field), Some(first)) = (FormField::from_schema(&name), field_errors.first())
                else {
                    continue;
                };
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                self.errors.insert(field, message);
            }
        }
        if salary.is_none() {
            self.errors
                .insert(FormField::Salary, SALARY_NOT_A_NUMBER.to_string());
        }

        self.errors.is_empty().then_some(input)
    }

    /// Validate and, when valid, call `on_submit` with the values
    ///
    /// Returns `None` (and does not call back) while any field is invalid.
    /// After a successful create the form is cleared; an edit keeps its values.
    pub fn submit<R>(&mut self, on_submit: impl FnOnce(EmployeeInput) -> R) -> Option<R> {
        let input = self.validate()?;
        let result = on_submit(input);
        if !self.is_editing() {
            self.reset();
        }
        Some(result)
    }
}
