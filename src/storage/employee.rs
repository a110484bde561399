//! Employee record storage
//!
//! One TOML file per employee: `.planroll/employees/{id}.toml`. Saving
//! runs the pre-persist hook first: recompute the residence cost total,
//! validate the residence period, then validate the sponsorship rows.
//! A validation failure aborts the save with nothing written.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DATA_DIR;
use crate::core::models::{DateInterval, EmployeeRecord};
use crate::core::services::intervals::{
    validate_row_set, validate_single_period, ValidationError,
};

/// Why an employee save was rejected or failed
#[derive(Debug, thiserror::Error)]
pub enum EmployeeSaveError {
    /// The record failed date validation; nothing was written
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Storage-level failure
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Employee record storage
#[derive(Debug, Clone)]
pub struct EmployeeStore {
    root: PathBuf,
}

impl EmployeeStore {
    /// Create a store under the given workspace root
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn dir(&self) -> PathBuf {
        self.root.join(DATA_DIR).join("employees")
    }

    fn file_path(&self, id: &str) -> PathBuf {
        let safe: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();
        self.dir().join(format!("{}.toml", safe.to_lowercase()))
    }

    /// Run the pre-persist hook on a record without writing it
    ///
    /// Mutates the record (cost total) exactly as a save would.
    pub fn validate(record: &mut EmployeeRecord) -> Result<(), ValidationError> {
        record.recompute_total();
        validate_single_period(record.residence_start, record.residence_end)?;

        let rows: Vec<DateInterval> = record
            .sponsorships
            .iter()
            .enumerate()
            .map(|(idx, row)| DateInterval::new(row.start, row.end, idx + 1))
            .collect();
        validate_row_set(&rows)
    }

    /// Validate and persist an employee record
    pub fn save(&self, record: &mut EmployeeRecord) -> Result<(), EmployeeSaveError> {
        Self::validate(record)?;

        let path = self.file_path(&record.id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(anyhow::Error::from)?;
        }
        let content = toml::to_string_pretty(record).map_err(anyhow::Error::from)?;
        fs::write(&path, content).map_err(anyhow::Error::from)?;
        Ok(())
    }

    /// Load an employee record by id
    pub fn get(&self, id: &str) -> anyhow::Result<Option<EmployeeRecord>> {
        let path = self.file_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(toml::from_str(&content)?))
    }

    /// List all stored employee ids
    pub fn list_ids(&self) -> anyhow::Result<Vec<String>> {
        let dir = self.dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "toml") {
                let content = fs::read_to_string(&path)?;
                let record: EmployeeRecord = toml::from_str(&content)?;
                ids.push(record.id);
            }
        }
        ids.sort();
        Ok(ids)
    }
}
