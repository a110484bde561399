//! TOML file storage
//!
//! Projects live in `.planroll/projects/{project}.toml` (one `[[task]]`
//! entry per task); employees live in `.planroll/employees/{id}.toml`.
//! Everything is plain TOML so records stay reviewable in version control.

mod employee;
mod project;

pub use employee::{EmployeeSaveError, EmployeeStore};
pub use project::{ProjectFile, ProjectMeta, ProjectStore};
