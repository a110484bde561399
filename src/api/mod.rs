//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and pure business
//! logic handlers that can be used by any HTTP server implementation
//! (`tiny_http`, axum, etc.) or directly by clients (the CLI does).
//!
//! ## Design
//!
//! - **Handlers are pure functions**: Take typed input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ErrorCode};
pub use handlers::{
    check_employee, create_task, delete_task, get_project_tasks, recalculate_all_parents,
    recalculate_parent_task, save_employee, update_task,
};
pub use types::{
    ApiResponse, BulkRecalcData, CreateTaskRequest, EmployeeCheckData, ProjectTasksData,
    RecalcData, TaskCreateData, TaskItem, TaskMutationData, UpdateTaskRequest,
};
