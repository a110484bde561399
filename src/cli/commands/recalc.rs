//! Recalculate parent rollups

use crate::api;
use crate::output::{self, OutputMode};
use crate::storage::ProjectStore;

/// Recalculate one parent, or every parent in the project when no id is
/// given (deepest-first, so nested groups settle before their parents)
pub fn recalc(project: &str, parent: Option<&str>, mode: OutputMode) -> anyhow::Result<()> {
    let root = std::env::current_dir()?;
    let store = ProjectStore::open(&root, project)?;

    match parent {
        Some(parent_id) => {
            let data = api::recalculate_parent_task(&store, parent_id)
                .map_err(|e| anyhow::anyhow!("{}", e.message))?;
            output::render_recalc(&data, mode);
        },
        None => {
            let data = api::recalculate_all_parents(&store)
                .map_err(|e| anyhow::anyhow!("{}", e.message))?;
            output::render_bulk_recalc(&data, mode);
        },
    }

    Ok(())
}
