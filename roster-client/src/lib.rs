//! Roster Client - client-side core for the employee roster
//!
//! Plain state objects a UI front end drives: the HTTP client, the record
//! book (data hook), the form, the list view with exports, and the page
//! controller wiring them together. [`LocalStore`] provides the offline mode.

pub mod book;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod http;
pub mod list;
pub mod local;
pub mod page;
pub mod source;

pub use book::EmployeeBook;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use export::ExportFile;
pub use form::{EmployeeForm, FormField};
pub use http::HttpClient;
pub use list::{EmployeeListView, ListRow};
pub use local::{LocalStore, LocalStoreError};
pub use page::{PageController, PageMode};
pub use source::EmployeeSource;

// Re-export shared types for convenience
pub use shared::models::{Employee, EmployeeInput, EmployeeUpdate};
