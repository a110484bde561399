//! Work-breakdown tree building
//!
//! Turns a flat task collection into a depth-first ordered sequence with
//! dotted WBS position codes ("1", "1.2", "1.2.1"). The output order and
//! codes determine display order and indentation for every consumer.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::core::models::TaskNode;

/// A task placed in the tree with its derived display attributes
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedTask {
    /// Dotted 1-based position code, e.g. "1.2.1"
    pub wbs: String,

    /// Depth below the roots (root = 0); equals the number of dots
    pub depth: usize,

    /// Planned span in days, inclusive of both endpoints
    pub duration_days: Option<i64>,

    /// Actual span in days, inclusive of both endpoints
    pub actual_duration_days: Option<i64>,

    /// The underlying task
    pub task: TaskNode,
}

/// Inclusive day count between two optional dates
///
/// A period starting and ending on the same day spans 1 day.
#[must_use]
pub fn duration_days_inclusive(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<i64> {
    match (start, end) {
        (Some(s), Some(e)) => Some((e - s).num_days() + 1),
        _ => None,
    }
}

/// Build the ordered work-breakdown sequence for a task collection
///
/// Tasks are grouped by parent (roots under None), each sibling group is
/// sorted by `(order, subject)`, and a depth-first pre-order walk assigns
/// 1-based dotted position codes. Nodes whose parent id is not present in
/// the collection are unreachable from the roots and are omitted.
///
/// Given identical input, the output order and codes are deterministic.
#[must_use]
pub fn build_tree(tasks: Vec<TaskNode>) -> Vec<PositionedTask> {
    let mut children: HashMap<Option<String>, Vec<TaskNode>> = HashMap::new();
    for task in tasks {
        children.entry(task.parent.clone()).or_default().push(task);
    }

    for bucket in children.values_mut() {
        bucket.sort_by(|a, b| (a.order, &a.subject).cmp(&(b.order, &b.subject)));
    }

    let mut ordered = Vec::new();
    walk(&children, None, None, &mut ordered);
    ordered
}

fn walk(
    children: &HashMap<Option<String>, Vec<TaskNode>>,
    node: Option<&str>,
    prefix: Option<&str>,
    ordered: &mut Vec<PositionedTask>,
) {
    let key = node.map(String::from);
    let Some(bucket) = children.get(&key) else {
        return;
    };

    for (idx, child) in bucket.iter().enumerate() {
        let wbs = prefix.map_or_else(|| (idx + 1).to_string(), |p| format!("{p}.{}", idx + 1));
        let positioned = PositionedTask {
            depth: wbs.matches('.').count(),
            duration_days: duration_days_inclusive(child.planned_start, child.planned_end),
            actual_duration_days: duration_days_inclusive(child.actual_start, child.actual_end),
            wbs: wbs.clone(),
            task: child.clone(),
        };
        ordered.push(positioned);
        walk(children, Some(&child.id), Some(&wbs), ordered);
    }
}
