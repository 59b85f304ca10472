//! Export artifacts
//!
//! Both exports cover the records handed in, in order, with salaries
//! truncated to whole numbers.

mod pdf;
mod xlsx;

use std::path::{Path, PathBuf};

use shared::models::Employee;

use crate::ClientResult;

pub use pdf::{PDF_CONTENT_TYPE, PDF_FILE_NAME, PDF_HEADERS};
pub use xlsx::{SHEET_NAME, XLSX_CONTENT_TYPE, XLSX_FILE_NAME, XLSX_HEADERS};

/// A generated file ready to hand to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Write the file into `dir` under its own name, returning the path
    pub fn save_to(&self, dir: impl AsRef<Path>) -> ClientResult<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "Export saved");
        Ok(path)
    }
}

/// Spreadsheet export (`employees.xlsx`)
pub fn spreadsheet(employees: &[&Employee]) -> ClientResult<ExportFile> {
    Ok(ExportFile {
        file_name: XLSX_FILE_NAME.to_string(),
        content_type: XLSX_CONTENT_TYPE,
        bytes: xlsx::write_workbook(employees)?,
    })
}

/// PDF table export (`employees.pdf`)
pub fn document(employees: &[&Employee]) -> ClientResult<ExportFile> {
    Ok(ExportFile {
        file_name: PDF_FILE_NAME.to_string(),
        content_type: PDF_CONTENT_TYPE,
        bytes: pdf::write_document(employees)?,
    })
}

/// Cell values of one exported record after the position column
fn record_cells(employee: &Employee) -> [String; 6] {
    [
        employee.first_name.clone(),
        employee.last_name.clone(),
        employee.email.clone(),
        employee.contact.clone(),
        employee.designation.clone(),
        employee.display_salary(),
    ]
}
