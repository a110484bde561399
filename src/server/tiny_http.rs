//! tiny_http server adapter
//!
//! Handles routing, body parsing, and response conversion for tiny_http.

use std::io::Cursor;
use std::io::Read as _;
use std::path::Path;

use log::info;
use serde::{de::DeserializeOwned, Serialize};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::api::{
    self, ApiError, ApiResponse, CreateTaskRequest, UpdateTaskRequest,
};
use crate::core::models::EmployeeRecord;
use crate::storage::{EmployeeStore, ProjectStore};

/// Run the API server until the process is stopped
///
/// Stores are opened per request against the given workspace root, so the
/// server always reflects the current on-disk state.
pub fn serve(root: &Path, addr: &str) -> anyhow::Result<()> {
    let server = tiny_http::Server::http(addr)
        .map_err(|e| anyhow::anyhow!("Failed to bind {addr}: {e}"))?;
    info!("planroll API listening on http://{addr}");

    let root = root.to_path_buf();
    for mut request in server.incoming_requests() {
        let response = handle_api_request(&root, &mut request);
        if let Err(e) = request.respond(response) {
            log::warn!("failed to send response: {e}");
        }
    }
    Ok(())
}

/// Handle an API request and return a response
///
/// This is the main routing function that maps URL paths to handlers.
/// Routes:
/// - `GET  /projects/{project}/tasks`
/// - `POST /projects/{project}/tasks`
/// - `PATCH /projects/{project}/tasks/{id}`
/// - `DELETE /projects/{project}/tasks/{id}`
/// - `POST /projects/{project}/tasks/{id}/recalculate`
/// - `POST /projects/{project}/recalculate`
/// - `POST /employees/check`
/// - `POST /employees`
pub fn handle_api_request(root: &Path, request: &mut Request) -> Response<Cursor<Vec<u8>>> {
    let path = request.url().to_string();
    let method = request.method().clone();

    // Supports both /api/v1/... (versioned) and /api/... (legacy)
    let api_path = path
        .strip_prefix("/api/v1")
        .or_else(|| path.strip_prefix("/api"))
        .unwrap_or(&path);

    let segments: Vec<&str> = api_path.trim_matches('/').split('/').collect();

    match (&method, segments.as_slice()) {
        (&Method::Get, ["projects", project, "tasks"]) => {
            handle_result(open_project(root, project).and_then(|s| api::get_project_tasks(&s)))
        },

        (&Method::Post, ["projects", project, "tasks"]) => {
            match read_json_body::<CreateTaskRequest>(request) {
                Ok(req) => handle_result(
                    open_project(root, project).and_then(|s| api::create_task(&s, &req)),
                ),
                Err(e) => error_response(&e),
            }
        },

        (&Method::Patch, ["projects", project, "tasks", id]) => {
            match read_json_body::<UpdateTaskRequest>(request) {
                Ok(req) => handle_result(
                    open_project(root, project).and_then(|s| api::update_task(&s, id, &req)),
                ),
                Err(e) => error_response(&e),
            }
        },

        (&Method::Delete, ["projects", project, "tasks", id]) => handle_result(
            open_project(root, project).and_then(|s| api::delete_task(&s, id)),
        ),

        (&Method::Post, ["projects", project, "tasks", id, "recalculate"]) => handle_result(
            open_project(root, project).and_then(|s| api::recalculate_parent_task(&s, id)),
        ),

        (&Method::Post, ["projects", project, "recalculate"]) => handle_result(
            open_project(root, project).and_then(|s| api::recalculate_all_parents(&s)),
        ),

        (&Method::Post, ["employees", "check"]) => {
            match read_json_body::<EmployeeRecord>(request) {
                Ok(mut record) => handle_result(api::check_employee(&mut record)),
                Err(e) => error_response(&e),
            }
        },

        (&Method::Post, ["employees"]) => match read_json_body::<EmployeeRecord>(request) {
            Ok(mut record) => {
                let store = EmployeeStore::new(root);
                handle_result(api::save_employee(&store, &mut record))
            },
            Err(e) => error_response(&e),
        },

        // 404 for unknown API routes
        _ => not_found_response(&format!("API endpoint not found: {method} {api_path}")),
    }
}

fn open_project(root: &Path, project: &str) -> Result<ProjectStore, ApiError> {
    ProjectStore::open(root, project).map_err(|e| ApiError::bad_request(e.to_string()))
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Read and parse JSON body from request
fn read_json_body<T: DeserializeOwned>(request: &mut Request) -> Result<T, ApiError> {
    let mut body = String::new();
    request
        .as_reader()
        .read_to_string(&mut body)
        .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {e}")))?;

    serde_json::from_str(&body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a handler result to an HTTP response
fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> Response<Cursor<Vec<u8>>> {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_response(&e),
    }
}

/// Create a successful JSON response
fn success_response<T: Serialize>(data: T) -> Response<Cursor<Vec<u8>>> {
    let response = ApiResponse::success(data);
    json_response(&response, 200)
}

/// Create an error JSON response with appropriate status code
fn error_response(error: &ApiError) -> Response<Cursor<Vec<u8>>> {
    let response = ApiResponse::<()>::error(error.code.as_str(), &error.message);
    json_response(&response, error.status_code())
}

/// Create a 404 not found response
fn not_found_response(message: &str) -> Response<Cursor<Vec<u8>>> {
    let response = ApiResponse::<()>::error("NOT_FOUND", message);
    json_response(&response, 404)
}

/// Serialize data to JSON response with status code
fn json_response<T: Serialize>(data: &T, status: u16) -> Response<Cursor<Vec<u8>>> {
    let json = serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    Response::from_data(json.into_bytes())
        .with_header(
            Header::from_bytes("Content-Type", "application/json")
                .unwrap_or_else(|()| unreachable!("static header is valid")),
        )
        .with_status_code(StatusCode(status))
}
