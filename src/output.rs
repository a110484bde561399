//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::api::{BulkRecalcData, EmployeeCheckData, ProjectTasksData, RecalcData};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => render_json(self),
        }
    }
}

/// Render a project task listing
pub fn render_task_list(data: &ProjectTasksData, project: &str, mode: OutputMode) {
    match mode {
        OutputMode::Json => render_json(data),
        OutputMode::Human => {
            if data.tasks.is_empty() {
                println!("No tasks in project '{project}'.");
                return;
            }

            println!("Tasks in '{project}' ({}):\n", data.currency);
            for item in &data.tasks {
                let indent = "  ".repeat(item.depth);
                let status = color_status(&item.status);
                let dates = match (item.planned_start, item.planned_end) {
                    (Some(s), Some(e)) => format!("  {s} -> {e}"),
                    (Some(s), None) => format!("  {s} ->"),
                    (None, Some(e)) => format!("  -> {e}"),
                    (None, None) => String::new(),
                };
                let hours = if item.planned_hours > 0.0 {
                    format!("  {}h", item.planned_hours)
                } else {
                    String::new()
                };
                let marker = if item.is_group { "+" } else { "-" };
                println!(
                    "{indent}{marker} {} [{}] {} ({status}){dates}{hours}",
                    item.wbs.bold(),
                    item.id.dimmed(),
                    item.subject,
                );
            }
        },
    }
}

/// Render a single parent recalculation result
pub fn render_recalc(data: &RecalcData, mode: OutputMode) {
    match mode {
        OutputMode::Json => render_json(data),
        OutputMode::Human => {
            if data.children_count == 0 {
                println!("{} has no children; nothing to roll up.", data.parent);
            } else {
                println!(
                    "Recalculated {} from {} child(ren): {}h planned.",
                    data.parent.bold(),
                    data.children_count,
                    data.total_planned_hours,
                );
            }
        },
    }
}

/// Render a bulk recalculation result
pub fn render_bulk_recalc(data: &BulkRecalcData, mode: OutputMode) {
    match mode {
        OutputMode::Json => render_json(data),
        OutputMode::Human => {
            if data.total_parents == 0 {
                println!("No parent tasks found.");
                return;
            }
            let summary = format!(
                "Recalculated {}/{} parent task(s).",
                data.updated_count, data.total_parents
            );
            if data.failed_count > 0 {
                println!("{summary} {}", format!("{} failed.", data.failed_count).red());
            } else {
                println!("{}", summary.green());
            }
        },
    }
}

/// Render an employee check/save result
pub fn render_employee_check(data: &EmployeeCheckData, saved: bool, mode: OutputMode) {
    match mode {
        OutputMode::Json => render_json(data),
        OutputMode::Human => {
            let verb = if saved { "Saved" } else { "Checked" };
            println!(
                "{} {}: {} sponsorship row(s) valid, residence costs total {:.2}.",
                verb.green(),
                data.id.bold(),
                data.sponsorship_rows,
                data.total_cost,
            );
        },
    }
}

fn color_status(status: &str) -> String {
    match status {
        "completed" => status.green().to_string(),
        "working" => status.yellow().to_string(),
        "overdue" => status.red().to_string(),
        "cancelled" => status.dimmed().to_string(),
        _ => status.to_string(),
    }
}

fn render_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}
