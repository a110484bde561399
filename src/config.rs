//! Workspace configuration
//!
//! Persistent settings live in `.planroll.toml` at the workspace root:
//! the task id prefix and the default currency used when a project does
//! not set its own.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the workspace config file
pub const CONFIG_FILE: &str = ".planroll.toml";

/// Name of the data directory holding project and employee files
pub const DATA_DIR: &str = ".planroll";

/// Workspace configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default settings applied where a project has no override
    #[serde(default)]
    pub defaults: Defaults,
}

/// Default settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Prefix for generated task ids (PREFIX-N)
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Currency reported for projects without their own
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_prefix() -> String {
    "TSK".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            currency: default_currency(),
        }
    }
}

impl Config {
    /// Path of the config file under the given workspace root
    #[must_use]
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Load the config from the workspace root, falling back to defaults
    /// when the file does not exist
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let path = Self::path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save the config to the workspace root
    pub fn save(&self, root: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(Self::path(root), content)?;
        Ok(())
    }
}
