//! Page controller: wires the book, the form and the list together
//!
//! ```text
//! Idle ──show_add──▶ Adding ──submit/cancel──▶ Idle
//! Idle ──edit(e)───▶ Editing(e) ──submit/cancel──▶ Idle
//! ```

use shared::models::Employee;

use crate::{
    ClientResult, EmployeeBook, EmployeeForm, EmployeeListView, EmployeeSource, ExportFile,
    ListRow,
};

/// What the page currently shows besides the list
#[derive(Debug, Clone, PartialEq)]
pub enum PageMode {
    /// List only, add trigger visible
    Idle,
    /// Blank form for a new record
    Adding,
    /// Form pre-populated from the target record
    Editing(Employee),
}

pub struct PageController<S> {
    book: EmployeeBook<S>,
    form: EmployeeForm,
    list: EmployeeListView,
    mode: PageMode,
}

impl<S: EmployeeSource> PageController<S> {
    pub fn new(source: S) -> Self {
        Self {
            book: EmployeeBook::new(source),
            form: EmployeeForm::new(),
            list: EmployeeListView::new(),
            mode: PageMode::Idle,
        }
    }

    /// Create the page and perform the initial fetch
    pub async fn open(source: S) -> Self {
        let mut page = Self::new(source);
        page.book.load().await;
        page
    }

    pub fn mode(&self) -> &PageMode {
        &self.mode
    }

    pub fn book(&self) -> &EmployeeBook<S> {
        &self.book
    }

    pub fn employees(&self) -> &[Employee] {
        self.book.employees()
    }

    pub fn is_loading(&self) -> bool {
        self.book.is_loading()
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EmployeeForm {
        &mut self.form
    }

    pub fn list(&self) -> &EmployeeListView {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut EmployeeListView {
        &mut self.list
    }

    pub fn form_visible(&self) -> bool {
        !matches!(self.mode, PageMode::Idle)
    }

    /// The add trigger is hidden whenever the form is shown
    pub fn add_trigger_visible(&self) -> bool {
        !self.form_visible()
    }

    /// Displayed rows for the current search
    pub fn rows(&self) -> Vec<ListRow<'_>> {
        self.list.rows(self.book.employees())
    }

    pub async fn refresh(&mut self) {
        self.book.refresh().await;
    }

    /// Open a blank form
    pub fn show_add(&mut self) {
        self.form.load(None);
        self.form.reset();
        self.mode = PageMode::Adding;
    }

    /// Open the form on `employee`
    pub fn edit(&mut self, employee: Employee) {
        self.form.load(Some(&employee));
        self.mode = PageMode::Editing(employee);
    }

    /// Close the form without submitting
    pub fn cancel(&mut self) {
        self.form.load(None);
        self.mode = PageMode::Idle;
    }

    /// Submit the form as a create or an update, depending on the mode
    ///
    /// Returns whether the form validated. A validated submission always
    /// closes the form, whether or not the store accepted the change.
    pub async fn submit(&mut self) -> bool {
        match self.mode.clone() {
            PageMode::Idle => false,
            PageMode::Adding => {
                let Some(input) = self.form.submit(|input| input) else {
                    return false;
                };
                self.book.add(input).await;
                self.mode = PageMode::Idle;
                true
            }
            PageMode::Editing(target) => {
                let Some(input) = self.form.submit(|input| input) else {
                    return false;
                };
                match target.id.as_deref() {
                    Some(id) => self.book.update(id, input.into()).await,
                    None => tracing::warn!(
                        name = %target.full_name(),
                        "Cannot update an employee that was never saved"
                    ),
                }
                self.cancel();
                true
            }
        }
    }

    /// Delete `employee` after `confirm` accepts the prompt
    ///
    /// Returns whether a delete was issued.
    pub async fn delete<F>(&mut self, employee: &Employee, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        match EmployeeListView::request_delete(employee, confirm) {
            Some(id) => {
                self.book.delete(&id).await;
                true
            }
            None => false,
        }
    }

    pub fn export_spreadsheet(&self) -> ClientResult<ExportFile> {
        self.list.export_spreadsheet(self.book.employees())
    }

    pub fn export_document(&self) -> ClientResult<ExportFile> {
        self.list.export_document(self.book.employees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FormField, LocalStore};

    fn fill(form: &mut EmployeeForm, first: &str) {
        form.set(FormField::FirstName, first);
        form.set(FormField::LastName, "Li");
        form.set(FormField::Email, "a@x.com");
        form.set(FormField::Contact, "5551234567");
        form.set(FormField::Designation, "Eng");
        form.set(FormField::Salary, "90000.75");
    }

    async fn page() -> PageController<LocalStore> {
        PageController::open(LocalStore::open_in_memory().unwrap()).await
    }

    #[tokio::test]
    async fn test_add_flow() {
        let mut page = page().await;
        assert_eq!(page.mode(), &PageMode::Idle);
        assert!(page.add_trigger_visible());

        page.show_add();
        assert_eq!(page.mode(), &PageMode::Adding);
        assert!(page.form_visible());
        assert!(!page.add_trigger_visible());

        fill(page.form_mut(), "Ana");
        assert!(page.submit().await);
        assert_eq!(page.mode(), &PageMode::Idle);
        assert_eq!(page.employees().len(), 1);
        assert_eq!(page.employees()[0].display_salary(), "90000");
    }

    #[tokio::test]
    async fn test_invalid_submit_keeps_form_open() {
        let mut page = page().await;
        page.show_add();
        fill(page.form_mut(), "");

        assert!(!page.submit().await);
        assert_eq!(page.mode(), &PageMode::Adding);
        assert!(page.form().error(FormField::FirstName).is_some());
        assert!(page.employees().is_empty());
    }

    #[tokio::test]
    async fn test_edit_persists_changes() {
        let mut page = page().await;
        page.show_add();
        fill(page.form_mut(), "Ana");
        page.submit().await;

        let ana = page.employees()[0].clone();
        page.edit(ana.clone());
        assert_eq!(page.mode(), &PageMode::Editing(ana.clone()));
        assert_eq!(page.form().value(FormField::FirstName), "Ana");

        page.form_mut().set(FormField::Designation, "Lead");
        assert!(page.submit().await);
        assert_eq!(page.mode(), &PageMode::Idle);

        let stored = &page.employees()[0];
        assert_eq!(stored.id, ana.id);
        assert_eq!(stored.designation, "Lead");
        assert_eq!(page.employees().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_returns_to_idle() {
        let mut page = page().await;
        page.show_add();
        fill(page.form_mut(), "Ana");
        page.submit().await;

        page.edit(page.employees()[0].clone());
        page.form_mut().set(FormField::FirstName, "Changed");
        page.cancel();
        assert_eq!(page.mode(), &PageMode::Idle);
        assert_eq!(page.employees()[0].first_name, "Ana");

        // A fresh add after editing starts blank
        page.show_add();
        assert_eq!(page.form().value(FormField::FirstName), "");
        assert!(!page.form().is_editing());
    }

    #[tokio::test]
    async fn test_scenario_create_then_delete() {
        let mut page = page().await;
        page.show_add();
        fill(page.form_mut(), "Ana");
        page.submit().await;

        let rows = page.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].employee.display_salary(), "90000");

        let ana = page.employees()[0].clone();
        assert!(!page.delete(&ana, |_| false).await);
        assert_eq!(page.employees().len(), 1);

        assert!(page.delete(&ana, |_| true).await);
        assert!(page.employees().is_empty());
    }

    #[tokio::test]
    async fn test_exports_follow_search() {
        let mut page = page().await;
        for name in ["Ana", "Ben"] {
            page.show_add();
            fill(page.form_mut(), name);
            page.submit().await;
        }

        page.list_mut().set_search("ben");
        assert_eq!(page.rows().len(), 1);

        let sheet = page.export_spreadsheet().unwrap();
        assert_eq!(sheet.file_name, "employees.xlsx");
        let pdf = page.export_document().unwrap();
        assert_eq!(pdf.file_name, "employees.pdf");
        assert!(pdf.bytes.starts_with(b"%PDF-1.5"));
    }
}
