//! Tests for project task storage

use planroll::core::models::{TaskNode, TaskStatus};
use planroll::core::ports::TaskRepository;
use planroll::storage::ProjectStore;

use crate::common::TestWorkspace;

// =============================================================================
// OPEN / FILE LAYOUT TESTS
// =============================================================================

#[test]
fn test_open_requires_project_name() {
    let ws = TestWorkspace::new();
    let result = ProjectStore::open(ws.path(), "  ");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Project is required"));
}

#[test]
fn test_file_path_sanitizes_project_name() {
    let ws = TestWorkspace::new();
    let store = ws.project("Tower B/Phase 2");
    assert!(store.file_path().ends_with(".planroll/projects/tower-b-phase-2.toml"));
}

#[test]
fn test_store_does_not_create_file_until_first_write() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");
    assert!(!store.exists());
    assert!(store.list().unwrap().is_empty());
    assert!(!store.exists());

    store.insert(TaskNode::new(String::new(), "First".to_string())).unwrap();
    assert!(store.exists());
}

// =============================================================================
// INSERT TESTS
// =============================================================================

#[test]
fn test_insert_assigns_sequential_ids() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let first = store.insert(TaskNode::new(String::new(), "First".to_string())).unwrap();
    let second = store.insert(TaskNode::new(String::new(), "Second".to_string())).unwrap();

    assert_eq!(first, "TSK-1");
    assert_eq!(second, "TSK-2");
}

#[test]
fn test_insert_uses_configured_prefix() {
    let ws = TestWorkspace::with_config("[defaults]\nprefix = \"JOB\"\ncurrency = \"USD\"\n");
    let store = ws.project("alpha");

    let id = store.insert(TaskNode::new(String::new(), "First".to_string())).unwrap();
    assert_eq!(id, "JOB-1");
}

#[test]
fn test_insert_keeps_explicit_id() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let id = store.insert(TaskNode::new("TSK-9".to_string(), "Ninth".to_string())).unwrap();
    assert_eq!(id, "TSK-9");

    // Generated ids continue after the highest existing number
    let next = store.insert(TaskNode::new(String::new(), "Tenth".to_string())).unwrap();
    assert_eq!(next, "TSK-10");
}

#[test]
fn test_insert_rejects_duplicate_id() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    store.insert(TaskNode::new("TSK-1".to_string(), "First".to_string())).unwrap();
    let result = store.insert(TaskNode::new("TSK-1".to_string(), "Again".to_string()));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("already exists"));
}

#[test]
fn test_insert_rejects_unknown_parent() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let mut task = TaskNode::new(String::new(), "Orphan".to_string());
    task.parent = Some("TSK-404".to_string());

    let result = store.insert(task);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Parent task not found"));
}

#[test]
fn test_insert_assigns_sibling_order() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    store.insert(TaskNode::new(String::new(), "First".to_string())).unwrap();
    store.insert(TaskNode::new(String::new(), "Second".to_string())).unwrap();

    let tasks = store.list().unwrap();
    assert_eq!(tasks[0].order, 1);
    assert_eq!(tasks[1].order, 2);
}

// =============================================================================
// REPOSITORY TESTS
// =============================================================================

#[test]
fn test_get_returns_stored_task() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    store.insert(TaskNode::new("TSK-1".to_string(), "First".to_string())).unwrap();

    let found = store.get("TSK-1").unwrap();
    assert_eq!(found.unwrap().subject, "First");

    assert!(store.get("TSK-404").unwrap().is_none());
}

#[test]
fn test_save_persists_changes() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    store.insert(TaskNode::new("TSK-1".to_string(), "First".to_string())).unwrap();

    let mut task = store.get("TSK-1").unwrap().unwrap();
    task.status = TaskStatus::Working;
    task.planned_hours = 12.5;
    store.save(&task).unwrap();

    let reloaded = store.get("TSK-1").unwrap().unwrap();
    assert_eq!(reloaded.status, TaskStatus::Working);
    assert!((reloaded.planned_hours - 12.5).abs() < f64::EPSILON);
}

#[test]
fn test_save_unknown_task_errors() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let ghost = TaskNode::new("TSK-404".to_string(), "Ghost".to_string());
    let result = store.save(&ghost);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Task not found"));
}

#[test]
fn test_projects_are_isolated() {
    let ws = TestWorkspace::new();
    let alpha = ws.project("alpha");
    let beta = ws.project("beta");

    alpha.insert(TaskNode::new(String::new(), "Alpha task".to_string())).unwrap();

    assert_eq!(alpha.list().unwrap().len(), 1);
    assert!(beta.list().unwrap().is_empty());
}

// =============================================================================
// REMOVE TESTS
// =============================================================================

#[test]
fn test_remove_task() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    store.insert(TaskNode::new("TSK-1".to_string(), "First".to_string())).unwrap();

    assert!(store.remove("TSK-1").unwrap());
    assert!(store.get("TSK-1").unwrap().is_none());
}

#[test]
fn test_remove_missing_task_returns_false() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");
    assert!(!store.remove("TSK-404").unwrap());
}

#[test]
fn test_remove_refuses_task_with_children() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    store.insert(TaskNode::new("TSK-1".to_string(), "Parent".to_string())).unwrap();
    let mut child = TaskNode::new("TSK-2".to_string(), "Child".to_string());
    child.parent = Some("TSK-1".to_string());
    store.insert(child).unwrap();

    let result = store.remove("TSK-1");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("still has children"));

    // Removing the child first unblocks the parent
    assert!(store.remove("TSK-2").unwrap());
    assert!(store.remove("TSK-1").unwrap());
}

// =============================================================================
// CURRENCY TESTS
// =============================================================================

#[test]
fn test_currency_falls_back_to_config_default() {
    let ws = TestWorkspace::with_config("[defaults]\nprefix = \"TSK\"\ncurrency = \"SAR\"\n");
    let store = ws.project("alpha");
    assert_eq!(store.currency().unwrap(), "SAR");
}

#[test]
fn test_currency_project_override_wins() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    store.set_currency("EUR").unwrap();
    assert_eq!(store.currency().unwrap(), "EUR");

    // Other projects keep the default
    assert_eq!(ws.project("beta").currency().unwrap(), "USD");
}
