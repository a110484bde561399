//! Task repository port
//!
//! Defines the interface the rollup service uses to read and persist
//! tasks of a single project.

use crate::core::models::TaskNode;

/// Repository over one project's tasks
///
/// Implementations handle persistence (TOML files, in-memory fixtures in
/// tests). A repository instance is already scoped to one project.
pub trait TaskRepository {
    /// List every task in the project
    fn list(&self) -> anyhow::Result<Vec<TaskNode>>;

    /// Fetch a single task by id
    fn get(&self, id: &str) -> anyhow::Result<Option<TaskNode>>;

    /// Persist changes to an existing task
    fn save(&self, task: &TaskNode) -> anyhow::Result<()>;

    /// Direct children of the given task, in stored order
    fn children_of(&self, parent_id: &str) -> anyhow::Result<Vec<TaskNode>> {
        let all = self.list()?;
        Ok(all.into_iter().filter(|t| t.parent.as_deref() == Some(parent_id)).collect())
    }
}
