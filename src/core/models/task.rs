//! Task model
//!
//! A task is one work item in a project. Tasks reference an optional parent
//! (`parent`) and so form a forest; a group task's dates and hours are
//! derived from its direct children by the rollup service, never edited
//! independently while children exist.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A task - one node in a project's work-breakdown forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskNode {
    /// Unique identifier (auto-generated: PREFIX-N)
    pub id: String,

    /// What the task is about
    pub subject: String,

    /// Current status
    pub status: TaskStatus,

    /// Priority level
    pub priority: Priority,

    /// Parent task ID (None for a root task)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Whether this task groups children (rollup target)
    #[serde(default)]
    pub is_group: bool,

    /// Sibling ordering key; ties are broken by subject
    #[serde(default)]
    pub order: u32,

    /// Planned start date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_start: Option<NaiveDate>,

    /// Planned end date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_end: Option<NaiveDate>,

    /// Planned effort in hours
    #[serde(default)]
    pub planned_hours: f64,

    /// Actual start date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_start: Option<NaiveDate>,

    /// Actual end date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_end: Option<NaiveDate>,

    /// Actual effort in hours
    #[serde(default)]
    pub actual_hours: f64,

    /// Total costing amount booked against this task
    #[serde(default)]
    pub total_cost: f64,

    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When this task was created (RFC3339)
    pub created_at: String,
}

impl TaskNode {
    /// Create a new root task with defaults
    #[must_use]
    pub fn new(id: String, subject: String) -> Self {
        Self {
            id,
            subject,
            status: TaskStatus::default(),
            priority: Priority::default(),
            parent: None,
            is_group: false,
            order: 0,
            planned_start: None,
            planned_end: None,
            planned_hours: 0.0,
            actual_start: None,
            actual_end: None,
            actual_hours: 0.0,
            total_cost: 0.0,
            description: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Task status
///
/// `Open -> Working -> Completed` is the expected forward path. The rollup
/// service only ever advances a parent toward `Working`/`Completed` and
/// never assigns `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Open,
    /// Currently being worked on
    Working,
    /// Finished, awaiting review
    PendingReview,
    /// Past its planned end date
    Overdue,
    /// Completed
    Completed,
    /// Cancelled - excluded from forward progress
    Cancelled,
}

impl TaskStatus {
    /// All selectable statuses, in display order
    pub const ALL: [Self; 6] = [
        Self::Open,
        Self::Working,
        Self::PendingReview,
        Self::Overdue,
        Self::Completed,
        Self::Cancelled,
    ];
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Working => write!(f, "working"),
            Self::PendingReview => write!(f, "pending_review"),
            Self::Overdue => write!(f, "overdue"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "open" => Ok(Self::Open),
            "working" | "in_progress" => Ok(Self::Working),
            "pending_review" | "review" => Ok(Self::PendingReview),
            "overdue" => Ok(Self::Overdue),
            "completed" | "done" | "complete" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!(
                "Invalid status: {s}. Use: open, working, pending_review, overdue, completed, cancelled"
            )),
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority
    Low,
    /// Medium priority (default)
    #[default]
    Medium,
    /// High priority
    High,
    /// Urgent - drop everything
    Urgent,
}

impl Priority {
    /// All selectable priorities, in display order
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Urgent => write!(f, "urgent"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" | "critical" => Ok(Self::Urgent),
            _ => Err(format!("Invalid priority: {s}. Use: low, medium, high, urgent")),
        }
    }
}
