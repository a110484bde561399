//! Parent task rollups
//!
//! A group task's planned/actual dates and hours are a pure function of its
//! direct children (min start, max end, summed hours). Recomputation never
//! cascades upward on its own: callers re-invoke one level up, and the bulk
//! pass orders parents deepest-first so each level is settled before its
//! own parent consumes it.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::core::models::{TaskNode, TaskStatus};
use crate::core::ports::TaskRepository;

/// Result of one parent recomputation
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    /// The parent task id
    pub parent: String,
    /// Number of direct children aggregated
    pub children_count: usize,
    /// The parent's planned hours after the rollup
    pub total_planned_hours: f64,
}

/// Result of a bulk recompute pass over a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkAggregateResult {
    /// Parents recomputed successfully
    pub updated_count: usize,
    /// Parents whose recomputation failed (logged, not fatal)
    pub failed_count: usize,
    /// Total parents found in the project
    pub total_parents: usize,
}

/// Fold the children's values into the parent, in place
///
/// Returns false when there are no children: a parent with no children
/// keeps its last manually-set values. Status only ever advances toward
/// `Completed`/`Working`; a `Cancelled` parent's status is left alone.
pub fn apply_rollup(parent: &mut TaskNode, children: &[TaskNode]) -> bool {
    if children.is_empty() {
        return false;
    }

    parent.planned_start = children.iter().filter_map(|c| c.planned_start).min();
    parent.planned_end = children.iter().filter_map(|c| c.planned_end).max();
    parent.planned_hours = children.iter().map(|c| c.planned_hours).sum();

    parent.actual_start = children.iter().filter_map(|c| c.actual_start).min();
    parent.actual_end = children.iter().filter_map(|c| c.actual_end).max();

    if parent.status != TaskStatus::Cancelled {
        if children.iter().all(|c| c.status == TaskStatus::Completed) {
            parent.status = TaskStatus::Completed;
        } else if children.iter().any(|c| c.status == TaskStatus::Working) {
            parent.status = TaskStatus::Working;
        }
    }

    true
}

/// Recompute one parent from its direct children and persist it
///
/// Fetches the parent and its direct children only (not the full subtree).
/// A parent with no children is left untouched and reported with a zero
/// child count. Does not cascade upward.
pub fn recompute_parent<R: TaskRepository>(
    repo: &R,
    parent_id: &str,
) -> anyhow::Result<AggregateResult> {
    let mut parent = repo
        .get(parent_id)?
        .ok_or_else(|| anyhow::anyhow!("Task not found: {parent_id}"))?;

    let children = repo.children_of(parent_id)?;
    if !apply_rollup(&mut parent, &children) {
        debug!("task {parent_id} has no children, skipping rollup");
        return Ok(AggregateResult {
            parent: parent.id,
            children_count: 0,
            total_planned_hours: parent.planned_hours,
        });
    }

    repo.save(&parent)?;

    Ok(AggregateResult {
        parent: parent.id,
        children_count: children.len(),
        total_planned_hours: parent.planned_hours,
    })
}

/// Recompute every parent in the project, deepest-first
///
/// One bad parent does not abort the batch: its failure is logged and
/// counted, and the loop continues.
pub fn recompute_all<R: TaskRepository>(repo: &R) -> anyhow::Result<BulkAggregateResult> {
    let tasks = repo.list()?;

    let parent_of: HashMap<&str, Option<&str>> =
        tasks.iter().map(|t| (t.id.as_str(), t.parent.as_deref())).collect();

    let parent_ids: HashSet<&str> = tasks.iter().filter_map(|t| t.parent.as_deref()).collect();

    let mut ordered: Vec<&str> = parent_ids.into_iter().collect();
    ordered.sort_by_key(|id| std::cmp::Reverse((depth_of(id, &parent_of), *id)));
    // Reverse on (depth, id) keeps deepest-first while staying deterministic

    let mut updated_count = 0;
    let mut failed_count = 0;
    let total_parents = ordered.len();

    for parent_id in ordered {
        match recompute_parent(repo, parent_id) {
            Ok(_) => updated_count += 1,
            Err(e) => {
                warn!("failed to recompute parent {parent_id}: {e:#}");
                failed_count += 1;
            },
        }
    }

    Ok(BulkAggregateResult {
        updated_count,
        failed_count,
        total_parents,
    })
}

/// Depth of a node below the roots, following parent links
///
/// Bounded by the map size so a corrupt parent cycle cannot spin forever.
fn depth_of(id: &str, parent_of: &HashMap<&str, Option<&str>>) -> usize {
    let mut depth = 0;
    let mut current = id;
    while let Some(Some(parent)) = parent_of.get(current) {
        depth += 1;
        if depth > parent_of.len() {
            break;
        }
        current = parent;
    }
    depth
}
