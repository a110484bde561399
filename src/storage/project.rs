//! Project task storage
//!
//! One TOML file per project: `.planroll/projects/{project}.toml` with a
//! `[project]` header and `[[task]]` entries. Implements the
//! `TaskRepository` port for the rollup service.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{Config, DATA_DIR};
use crate::core::models::TaskNode;
use crate::core::ports::TaskRepository;

/// Convert a project name to a safe filename
/// e.g. "Tower B/Phase 2" -> "tower-b-phase-2"
fn project_to_filename(project: &str) -> String {
    project
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .to_lowercase()
}

/// On-disk project file structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Project metadata
    pub project: ProjectMeta,

    /// Tasks in this project
    #[serde(default, rename = "task")]
    pub tasks: Vec<TaskNode>,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMeta {
    /// Project name
    pub name: String,

    /// Project currency; falls back to the config default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// When the project file was created
    pub created_at: String,
}

/// Task storage for one project
#[derive(Debug, Clone)]
pub struct ProjectStore {
    root: PathBuf,
    project: String,
    prefix: String,
    default_currency: String,
}

impl ProjectStore {
    /// Open a project's store under the given workspace root
    ///
    /// Reads `.planroll.toml` for the id prefix and default currency; the
    /// project file itself is created lazily on first write.
    pub fn open(root: &Path, project: &str) -> anyhow::Result<Self> {
        if project.trim().is_empty() {
            anyhow::bail!("Project is required");
        }
        let config = Config::load(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            project: project.to_string(),
            prefix: config.defaults.prefix,
            default_currency: config.defaults.currency,
        })
    }

    /// Project name this store is scoped to
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Path of this project's task file
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.root
            .join(DATA_DIR)
            .join("projects")
            .join(format!("{}.toml", project_to_filename(&self.project)))
    }

    /// Whether the project file exists on disk
    #[must_use]
    pub fn exists(&self) -> bool {
        self.file_path().exists()
    }

    /// Currency for this project (project override, else config default)
    pub fn currency(&self) -> anyhow::Result<String> {
        let file = self.load_file()?;
        Ok(file.project.currency.unwrap_or_else(|| self.default_currency.clone()))
    }

    /// Set the project currency override
    pub fn set_currency(&self, currency: &str) -> anyhow::Result<()> {
        let mut file = self.load_file()?;
        file.project.currency = Some(currency.to_string());
        self.save_file(&file)
    }

    fn load_file(&self) -> anyhow::Result<ProjectFile> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(ProjectFile {
                project: ProjectMeta {
                    name: self.project.clone(),
                    currency: None,
                    created_at: chrono::Utc::now().to_rfc3339(),
                },
                tasks: Vec::new(),
            });
        }
        let content = fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    fn save_file(&self, file: &ProjectFile) -> anyhow::Result<()> {
        let path = self.file_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(file)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Insert a new task, assigning an id and sibling order if unset
    ///
    /// Returns the task id.
    pub fn insert(&self, mut task: TaskNode) -> anyhow::Result<String> {
        let mut file = self.load_file()?;

        if task.id.is_empty() {
            task.id = self.next_id(&file.tasks);
        } else if file.tasks.iter().any(|t| t.id == task.id) {
            anyhow::bail!("Task already exists: {}", task.id);
        }

        if task.order == 0 {
            task.order = file.tasks.iter().map(|t| t.order).max().unwrap_or(0) + 1;
        }

        if let Some(parent) = &task.parent {
            if !file.tasks.iter().any(|t| &t.id == parent) {
                anyhow::bail!("Parent task not found: {parent}");
            }
        }

        let id = task.id.clone();
        file.tasks.push(task);
        self.save_file(&file)?;
        Ok(id)
    }

    /// Remove a task by id
    ///
    /// Refuses to remove a task that still has children.
    pub fn remove(&self, id: &str) -> anyhow::Result<bool> {
        let mut file = self.load_file()?;

        if file.tasks.iter().any(|t| t.parent.as_deref() == Some(id)) {
            anyhow::bail!("Task {id} still has children");
        }

        let original_len = file.tasks.len();
        file.tasks.retain(|t| t.id != id);
        let removed = file.tasks.len() < original_len;

        if removed {
            self.save_file(&file)?;
        }

        Ok(removed)
    }

    /// Generate the next task id using the configured prefix
    fn next_id(&self, tasks: &[TaskNode]) -> String {
        let max_num = tasks
            .iter()
            .filter_map(|t| {
                t.id.strip_prefix(&self.prefix)
                    .and_then(|s| s.strip_prefix('-'))
                    .and_then(|n| n.parse::<u32>().ok())
            })
            .max()
            .unwrap_or(0);
        format!("{}-{}", self.prefix, max_num + 1)
    }
}

impl TaskRepository for ProjectStore {
    fn list(&self) -> anyhow::Result<Vec<TaskNode>> {
        Ok(self.load_file()?.tasks)
    }

    fn get(&self, id: &str) -> anyhow::Result<Option<TaskNode>> {
        Ok(self.load_file()?.tasks.into_iter().find(|t| t.id == id))
    }

    fn save(&self, task: &TaskNode) -> anyhow::Result<()> {
        let mut file = self.load_file()?;
        let slot = file
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| anyhow::anyhow!("Task not found: {}", task.id))?;
        *slot = task.clone();
        self.save_file(&file)
    }
}
