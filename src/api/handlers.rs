//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic. They take
//! an opened store plus typed input and return `Result<T, ApiError>`.

use chrono::NaiveDate;

use crate::core::models::{EmployeeRecord, Priority, TaskNode, TaskStatus};
use crate::core::ports::TaskRepository;
use crate::core::services::{rollup, tree};
use crate::storage::{EmployeeStore, ProjectStore};

use super::error::ApiError;
use super::types::{
    BulkRecalcData, CreateTaskRequest, EmployeeCheckData, ProjectTasksData, RecalcData,
    TaskCreateData, TaskItem, TaskMutationData, UpdateTaskRequest,
};

// =============================================================================
// PROJECT TASKS
// =============================================================================

/// Ordered task listing for a project, with WBS codes, durations, the
/// project currency, and the selectable status/priority options
pub fn get_project_tasks(store: &ProjectStore) -> Result<ProjectTasksData, ApiError> {
    let tasks = store.list().map_err(|e| ApiError::internal(e.to_string()))?;
    let currency = store.currency().map_err(|e| ApiError::internal(e.to_string()))?;

    let ordered = tree::build_tree(tasks);
    let items = ordered
        .into_iter()
        .map(|p| TaskItem {
            id: p.task.id,
            wbs: p.wbs,
            depth: p.depth,
            subject: p.task.subject,
            status: p.task.status.to_string(),
            priority: p.task.priority.to_string(),
            parent: p.task.parent,
            is_group: p.task.is_group,
            planned_start: p.task.planned_start,
            planned_end: p.task.planned_end,
            duration_days: p.duration_days,
            planned_hours: p.task.planned_hours,
            actual_start: p.task.actual_start,
            actual_end: p.task.actual_end,
            actual_duration_days: p.actual_duration_days,
            actual_hours: p.task.actual_hours,
            total_cost: p.task.total_cost,
            description: p.task.description,
        })
        .collect();

    Ok(ProjectTasksData {
        tasks: items,
        currency,
        status_options: TaskStatus::ALL.iter().map(ToString::to_string).collect(),
        priority_options: Priority::ALL.iter().map(ToString::to_string).collect(),
    })
}

/// Create a new task in the project
///
/// Subject is required. A group task takes no parent.
pub fn create_task(
    store: &ProjectStore,
    req: &CreateTaskRequest,
) -> Result<TaskCreateData, ApiError> {
    if req.subject.trim().is_empty() {
        return Err(ApiError::bad_request("Subject is required"));
    }

    let mut task = TaskNode::new(String::new(), req.subject.trim().to_string());
    task.is_group = req.is_group;
    task.parent = if req.is_group { None } else { req.parent.clone() };
    task.status = parse_status(req.status.as_deref())?.unwrap_or_default();
    task.priority = parse_priority(req.priority.as_deref())?.unwrap_or_default();
    task.planned_start = req.planned_start;
    task.planned_end = req.planned_end;
    task.planned_hours = req.planned_hours.unwrap_or(0.0);
    task.actual_start = req.actual_start;
    task.actual_end = req.actual_end;
    task.description = req.description.clone();

    let status = task.status.to_string();
    let priority = task.priority.to_string();
    let id = store.insert(task).map_err(|e| ApiError::bad_request(e.to_string()))?;

    Ok(TaskCreateData {
        id,
        subject: req.subject.trim().to_string(),
        status,
        priority,
    })
}

/// Apply a partial update to a task
///
/// Persists only when something changed; when the updated task has a
/// parent, that parent is recomputed one level up.
pub fn update_task(
    store: &ProjectStore,
    id: &str,
    req: &UpdateTaskRequest,
) -> Result<TaskMutationData, ApiError> {
    let mut task = match store.get(id) {
        Ok(Some(task)) => task,
        Ok(None) => return Err(ApiError::not_found(format!("Task '{id}' not found"))),
        Err(e) => return Err(ApiError::internal(e.to_string())),
    };

    let before = task.clone();

    if let Some(subject) = &req.subject {
        if subject.trim().is_empty() {
            return Err(ApiError::bad_request("Subject cannot be empty"));
        }
        task.subject = subject.trim().to_string();
    }
    if let Some(status) = parse_status(req.status.as_deref())? {
        task.status = status;
    }
    if let Some(priority) = parse_priority(req.priority.as_deref())? {
        task.priority = priority;
    }
    if let Some(parent) = &req.parent {
        if parent.is_empty() {
            task.parent = None;
        } else {
            if parent == id {
                return Err(ApiError::bad_request("Task cannot be its own parent"));
            }
            match store.get(parent) {
                Ok(Some(_)) => task.parent = Some(parent.clone()),
                Ok(None) => {
                    return Err(ApiError::bad_request(format!("Parent task not found: {parent}")))
                },
                Err(e) => return Err(ApiError::internal(e.to_string())),
            }
        }
    }
    if let Some(is_group) = req.is_group {
        task.is_group = is_group;
    }
    if let Some(value) = parse_date_field("planned_start", req.planned_start.as_deref())? {
        task.planned_start = value;
    }
    if let Some(value) = parse_date_field("planned_end", req.planned_end.as_deref())? {
        task.planned_end = value;
    }
    if let Some(hours) = req.planned_hours {
        task.planned_hours = hours;
    }
    if let Some(value) = parse_date_field("actual_start", req.actual_start.as_deref())? {
        task.actual_start = value;
    }
    if let Some(value) = parse_date_field("actual_end", req.actual_end.as_deref())? {
        task.actual_end = value;
    }
    if let Some(description) = &req.description {
        task.description =
            if description.is_empty() { None } else { Some(description.clone()) };
    }

    let changed = task != before;
    if changed {
        store.save(&task).map_err(|e| ApiError::internal(e.to_string()))?;

        if let Some(parent_id) = &task.parent {
            rollup::recompute_parent(store, parent_id)
                .map_err(|e| ApiError::internal(e.to_string()))?;
        }
    }

    Ok(TaskMutationData {
        id: id.to_string(),
        changed,
    })
}

/// Remove a task and refresh its former parent's rollup
///
/// Removal is refused while the task still has children. When the removed
/// task had a parent, that parent is recomputed one level up so it does not
/// keep dates and hours rolled up from a child that no longer exists.
pub fn delete_task(store: &ProjectStore, id: &str) -> Result<TaskMutationData, ApiError> {
    let task = match store.get(id) {
        Ok(Some(task)) => task,
        Ok(None) => return Err(ApiError::not_found(format!("Task '{id}' not found"))),
        Err(e) => return Err(ApiError::internal(e.to_string())),
    };

    let removed = store.remove(id).map_err(|e| ApiError::bad_request(e.to_string()))?;
    if removed {
        if let Some(parent_id) = &task.parent {
            rollup::recompute_parent(store, parent_id)
                .map_err(|e| ApiError::internal(e.to_string()))?;
        }
    }

    Ok(TaskMutationData {
        id: id.to_string(),
        changed: removed,
    })
}

// =============================================================================
// ROLLUPS
// =============================================================================

/// Recompute one parent's rolled-up values from its direct children
pub fn recalculate_parent_task(
    store: &ProjectStore,
    parent_id: &str,
) -> Result<RecalcData, ApiError> {
    if parent_id.trim().is_empty() {
        return Err(ApiError::bad_request("Parent task is required"));
    }

    match rollup::recompute_parent(store, parent_id) {
        Ok(result) => Ok(RecalcData {
            parent: result.parent,
            children_count: result.children_count,
            total_planned_hours: result.total_planned_hours,
        }),
        Err(e) if store_misses(store, parent_id) => Err(ApiError::not_found(e.to_string())),
        Err(e) => Err(ApiError::internal(e.to_string())),
    }
}

/// Recompute every parent in the project, deepest-first
pub fn recalculate_all_parents(store: &ProjectStore) -> Result<BulkRecalcData, ApiError> {
    let result = rollup::recompute_all(store).map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(BulkRecalcData {
        updated_count: result.updated_count,
        failed_count: result.failed_count,
        total_parents: result.total_parents,
    })
}

// =============================================================================
// EMPLOYEES
// =============================================================================

/// Validate an employee record without persisting it
pub fn check_employee(record: &mut EmployeeRecord) -> Result<EmployeeCheckData, ApiError> {
    EmployeeStore::validate(record)?;
    Ok(EmployeeCheckData {
        id: record.id.clone(),
        total_cost: record.total_cost,
        sponsorship_rows: record.sponsorships.len(),
    })
}

/// Validate and persist an employee record
pub fn save_employee(
    store: &EmployeeStore,
    record: &mut EmployeeRecord,
) -> Result<EmployeeCheckData, ApiError> {
    use crate::storage::EmployeeSaveError;

    store.save(record).map_err(|e| match e {
        EmployeeSaveError::Invalid(err) => ApiError::from(err),
        EmployeeSaveError::Storage(err) => ApiError::internal(err.to_string()),
    })?;

    Ok(EmployeeCheckData {
        id: record.id.clone(),
        total_cost: record.total_cost,
        sponsorship_rows: record.sponsorships.len(),
    })
}

// =============================================================================
// HELPERS
// =============================================================================

fn parse_status(s: Option<&str>) -> Result<Option<TaskStatus>, ApiError> {
    s.map(|v| v.parse().map_err(ApiError::bad_request)).transpose()
}

fn parse_priority(s: Option<&str>) -> Result<Option<Priority>, ApiError> {
    s.map(|v| v.parse().map_err(ApiError::bad_request)).transpose()
}

/// Parse an optional date field of an update request
///
/// `None` means no change, `Some("")` clears the stored date, anything
/// else must be a `YYYY-MM-DD` date.
fn parse_date_field(
    field: &str,
    value: Option<&str>,
) -> Result<Option<Option<NaiveDate>>, ApiError> {
    match value {
        None => Ok(None),
        Some("") => Ok(Some(None)),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|d| Some(Some(d)))
            .map_err(|_| ApiError::bad_request(format!("Invalid date for {field}: {raw}"))),
    }
}

fn store_misses(store: &ProjectStore, id: &str) -> bool {
    matches!(store.get(id), Ok(None))
}
