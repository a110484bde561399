//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ApiErrorData;

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for creating a task
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    /// Task subject (required, non-empty)
    pub subject: String,
    /// Parent task id; ignored for group tasks
    #[serde(default)]
    pub parent: Option<String>,
    /// Whether this task groups children
    #[serde(default)]
    pub is_group: bool,
    /// Initial status (defaults to open)
    #[serde(default)]
    pub status: Option<String>,
    /// Priority (defaults to medium)
    #[serde(default)]
    pub priority: Option<String>,
    /// Planned start date
    #[serde(default)]
    pub planned_start: Option<NaiveDate>,
    /// Planned end date
    #[serde(default)]
    pub planned_end: Option<NaiveDate>,
    /// Planned effort in hours
    #[serde(default)]
    pub planned_hours: Option<f64>,
    /// Actual start date
    #[serde(default)]
    pub actual_start: Option<NaiveDate>,
    /// Actual end date
    #[serde(default)]
    pub actual_end: Option<NaiveDate>,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for updating a task
///
/// Every field is optional; absent fields are left unchanged. Date fields
/// accept an empty string to clear the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    /// New subject
    #[serde(default)]
    pub subject: Option<String>,
    /// New status
    #[serde(default)]
    pub status: Option<String>,
    /// New priority
    #[serde(default)]
    pub priority: Option<String>,
    /// New parent task id ("" to detach)
    #[serde(default)]
    pub parent: Option<String>,
    /// New group flag
    #[serde(default)]
    pub is_group: Option<bool>,
    /// New planned start ("" clears)
    #[serde(default)]
    pub planned_start: Option<String>,
    /// New planned end ("" clears)
    #[serde(default)]
    pub planned_end: Option<String>,
    /// New planned hours
    #[serde(default)]
    pub planned_hours: Option<f64>,
    /// New actual start ("" clears)
    #[serde(default)]
    pub actual_start: Option<String>,
    /// New actual end ("" clears)
    #[serde(default)]
    pub actual_end: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Project task listing response data
#[derive(Debug, Serialize)]
pub struct ProjectTasksData {
    /// Tasks in display order with WBS codes attached
    pub tasks: Vec<TaskItem>,
    /// Currency for cost columns
    pub currency: String,
    /// Selectable status values
    pub status_options: Vec<String>,
    /// Selectable priority values
    pub priority_options: Vec<String>,
}

/// Single task in the ordered listing
#[derive(Debug, Serialize)]
pub struct TaskItem {
    /// Task id
    pub id: String,
    /// Dotted WBS position code (e.g. "1.2.1")
    pub wbs: String,
    /// Depth below the roots (for indentation)
    pub depth: usize,
    /// Subject
    pub subject: String,
    /// Status
    pub status: String,
    /// Priority
    pub priority: String,
    /// Parent task id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Whether this task groups children
    pub is_group: bool,
    /// Planned start date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_start: Option<NaiveDate>,
    /// Planned end date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_end: Option<NaiveDate>,
    /// Planned span in days, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i64>,
    /// Planned effort in hours
    pub planned_hours: f64,
    /// Actual start date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_start: Option<NaiveDate>,
    /// Actual end date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_end: Option<NaiveDate>,
    /// Actual span in days, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_duration_days: Option<i64>,
    /// Actual effort in hours
    pub actual_hours: f64,
    /// Total costing amount
    pub total_cost: f64,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Response for task creation
#[derive(Debug, Serialize)]
pub struct TaskCreateData {
    /// Created task id
    pub id: String,
    /// Subject
    pub subject: String,
    /// Initial status
    pub status: String,
    /// Priority
    pub priority: String,
}

/// Task update response
#[derive(Debug, Serialize)]
pub struct TaskMutationData {
    /// Task id
    pub id: String,
    /// Whether anything actually changed
    pub changed: bool,
}

/// Single parent recalculation response
#[derive(Debug, Serialize)]
pub struct RecalcData {
    /// Parent task id
    pub parent: String,
    /// Number of direct children aggregated
    pub children_count: usize,
    /// Parent planned hours after the rollup
    pub total_planned_hours: f64,
}

/// Bulk recalculation response
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BulkRecalcData {
    /// Parents recomputed successfully
    pub updated_count: usize,
    /// Parents whose recomputation failed
    pub failed_count: usize,
    /// Total parents found
    pub total_parents: usize,
}

/// Employee validation / save response
#[derive(Debug, Serialize)]
pub struct EmployeeCheckData {
    /// Employee id
    pub id: String,
    /// Residence cost total after recomputation
    pub total_cost: f64,
    /// Number of sponsorship rows checked
    pub sponsorship_rows: usize,
}
