//! Task management command - add, list, update, remove tasks

use chrono::NaiveDate;

use crate::api::{self, CreateTaskRequest, UpdateTaskRequest};
use crate::cli::app::TaskAction;
use crate::output::{self, OperationResult, OutputMode};
use crate::storage::ProjectStore;

/// Handle task subcommands
pub fn task(project: &str, action: TaskAction, mode: OutputMode) -> anyhow::Result<()> {
    let root = std::env::current_dir()?;
    let store = ProjectStore::open(&root, project)?;

    match action {
        TaskAction::Add {
            subject,
            parent,
            group,
            status,
            priority,
            start,
            end,
            hours,
            description,
        } => {
            let req = CreateTaskRequest {
                subject,
                parent,
                is_group: group,
                status,
                priority,
                planned_start: parse_date(start.as_deref())?,
                planned_end: parse_date(end.as_deref())?,
                planned_hours: hours,
                actual_start: None,
                actual_end: None,
                description,
            };
            let data = api::create_task(&store, &req).map_err(to_anyhow)?;
            OperationResult {
                success: true,
                message: format!("Added {} ({})", data.id, data.subject),
            }
            .render(mode);
            Ok(())
        },

        TaskAction::List => {
            let data = api::get_project_tasks(&store).map_err(to_anyhow)?;
            output::render_task_list(&data, project, mode);
            Ok(())
        },

        TaskAction::Update {
            id,
            subject,
            status,
            priority,
            parent,
            start,
            end,
            hours,
            actual_start,
            actual_end,
        } => {
            let req = UpdateTaskRequest {
                subject,
                status,
                priority,
                parent,
                is_group: None,
                planned_start: start,
                planned_end: end,
                planned_hours: hours,
                actual_start,
                actual_end,
                description: None,
            };
            let data = api::update_task(&store, &id, &req).map_err(to_anyhow)?;
            let message = if data.changed {
                format!("Updated {id}")
            } else {
                format!("{id} unchanged")
            };
            OperationResult {
                success: true,
                message,
            }
            .render(mode);
            Ok(())
        },

        TaskAction::Remove { id } => {
            api::delete_task(&store, &id).map_err(to_anyhow)?;
            OperationResult {
                success: true,
                message: format!("Removed {id}"),
            }
            .render(mode);
            Ok(())
        },
    }
}

fn parse_date(value: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
    value
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| anyhow::anyhow!("Invalid date: {raw} (expected YYYY-MM-DD)"))
        })
        .transpose()
}

fn to_anyhow(e: api::ApiError) -> anyhow::Error {
    anyhow::anyhow!("{}", e.message)
}
