//! Tests for the pure API handlers

use planroll::api::{self, CreateTaskRequest, ErrorCode, UpdateTaskRequest};
use planroll::core::models::{EmployeeRecord, SponsorshipPeriod, TaskStatus};
use planroll::core::ports::TaskRepository;
use planroll::storage::EmployeeStore;

use crate::common::{child_task, d, TestWorkspace};

fn add_task(store: &planroll::storage::ProjectStore, subject: &str, parent: Option<&str>) -> String {
    let req = CreateTaskRequest {
        subject: subject.to_string(),
        parent: parent.map(String::from),
        ..CreateTaskRequest::default()
    };
    api::create_task(store, &req).unwrap().id
}

// =============================================================================
// TASK LISTING TESTS
// =============================================================================

#[test]
fn test_listing_assigns_wbs_codes() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let root = add_task(&store, "Structure", None);
    let child = add_task(&store, "Foundations", Some(&root));
    add_task(&store, "Columns", Some(&root));
    add_task(&store, "Excavation", Some(&child));

    let data = api::get_project_tasks(&store).unwrap();
    let codes: Vec<(&str, usize)> =
        data.tasks.iter().map(|t| (t.wbs.as_str(), t.depth)).collect();

    assert_eq!(codes, vec![("1", 0), ("1.1", 1), ("1.1.1", 2), ("1.2", 1)]);
}

#[test]
fn test_listing_orders_siblings_by_order_then_subject() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    add_task(&store, "Zeta", None);
    add_task(&store, "Alpha", None);

    let data = api::get_project_tasks(&store).unwrap();
    // Insertion order wins while order keys differ
    assert_eq!(data.tasks[0].subject, "Zeta");
    assert_eq!(data.tasks[1].subject, "Alpha");
}

#[test]
fn test_listing_includes_currency_and_options() {
    let ws = TestWorkspace::with_config("[defaults]\nprefix = \"TSK\"\ncurrency = \"SAR\"\n");
    let store = ws.project("alpha");

    let data = api::get_project_tasks(&store).unwrap();
    assert_eq!(data.currency, "SAR");
    assert_eq!(data.status_options.len(), 6);
    assert!(data.status_options.contains(&"pending_review".to_string()));
    assert_eq!(data.priority_options.len(), 4);
}

#[test]
fn test_listing_computes_inclusive_durations() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let req = CreateTaskRequest {
        subject: "Pour slab".to_string(),
        planned_start: Some(d(2024, 3, 1)),
        planned_end: Some(d(2024, 3, 10)),
        ..CreateTaskRequest::default()
    };
    api::create_task(&store, &req).unwrap();

    let data = api::get_project_tasks(&store).unwrap();
    assert_eq!(data.tasks[0].duration_days, Some(10));
    assert_eq!(data.tasks[0].actual_duration_days, None);
}

// =============================================================================
// TASK CREATION TESTS
// =============================================================================

#[test]
fn test_create_requires_subject() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let req = CreateTaskRequest {
        subject: "   ".to_string(),
        ..CreateTaskRequest::default()
    };
    let err = api::create_task(&store, &req).unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
    assert!(err.message.contains("Subject is required"));
}

#[test]
fn test_create_group_drops_parent() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");
    let root = add_task(&store, "Structure", None);

    let req = CreateTaskRequest {
        subject: "Phase 2".to_string(),
        parent: Some(root),
        is_group: true,
        ..CreateTaskRequest::default()
    };
    let created = api::create_task(&store, &req).unwrap();

    let task = store.get(&created.id).unwrap().unwrap();
    assert!(task.is_group);
    assert!(task.parent.is_none());
}

#[test]
fn test_create_rejects_bad_status() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let req = CreateTaskRequest {
        subject: "Task".to_string(),
        status: Some("paused".to_string()),
        ..CreateTaskRequest::default()
    };
    let err = api::create_task(&store, &req).unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
}

#[test]
fn test_create_defaults_status_and_priority() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let created = api::create_task(
        &store,
        &CreateTaskRequest {
            subject: "Task".to_string(),
            ..CreateTaskRequest::default()
        },
    )
    .unwrap();

    assert_eq!(created.status, "open");
    assert_eq!(created.priority, "medium");
}

// =============================================================================
// TASK UPDATE TESTS
// =============================================================================

#[test]
fn test_update_unknown_task_is_not_found() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let err = api::update_task(&store, "TSK-404", &UpdateTaskRequest::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[test]
fn test_update_noop_reports_unchanged() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");
    let id = add_task(&store, "Task", None);

    let data = api::update_task(&store, &id, &UpdateTaskRequest::default()).unwrap();
    assert!(!data.changed);

    // Setting the same subject again is also a no-op
    let req = UpdateTaskRequest {
        subject: Some("Task".to_string()),
        ..UpdateTaskRequest::default()
    };
    assert!(!api::update_task(&store, &id, &req).unwrap().changed);
}

#[test]
fn test_update_empty_string_clears_date() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let req = CreateTaskRequest {
        subject: "Task".to_string(),
        planned_start: Some(d(2024, 3, 1)),
        planned_end: Some(d(2024, 3, 10)),
        ..CreateTaskRequest::default()
    };
    let id = api::create_task(&store, &req).unwrap().id;

    let update = UpdateTaskRequest {
        planned_end: Some(String::new()),
        ..UpdateTaskRequest::default()
    };
    assert!(api::update_task(&store, &id, &update).unwrap().changed);

    let task = store.get(&id).unwrap().unwrap();
    assert_eq!(task.planned_start, Some(d(2024, 3, 1)));
    assert!(task.planned_end.is_none());
}

#[test]
fn test_update_rejects_malformed_date() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");
    let id = add_task(&store, "Task", None);

    let update = UpdateTaskRequest {
        planned_start: Some("03/01/2024".to_string()),
        ..UpdateTaskRequest::default()
    };
    let err = api::update_task(&store, &id, &update).unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
    assert!(err.message.contains("planned_start"));
}

#[test]
fn test_update_unknown_parent_rejected_without_write() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");
    let id = add_task(&store, "Task", None);

    let update = UpdateTaskRequest {
        parent: Some("TSK-404".to_string()),
        ..UpdateTaskRequest::default()
    };
    let err = api::update_task(&store, &id, &update).unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
    assert!(err.message.contains("Parent task not found"));

    // Nothing was written and the task is still reachable in the listing
    let task = store.get(&id).unwrap().unwrap();
    assert!(task.parent.is_none());
    let data = api::get_project_tasks(&store).unwrap();
    assert_eq!(data.tasks.len(), 1);
}

#[test]
fn test_update_rejects_self_parent() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");
    let id = add_task(&store, "Task", None);

    let update = UpdateTaskRequest {
        parent: Some(id.clone()),
        ..UpdateTaskRequest::default()
    };
    let err = api::update_task(&store, &id, &update).unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
    assert!(err.message.contains("own parent"));
    assert!(store.get(&id).unwrap().unwrap().parent.is_none());
}

#[test]
fn test_update_reparents_under_existing_task() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");
    let first = add_task(&store, "First", None);
    let second = add_task(&store, "Second", None);

    let update = UpdateTaskRequest {
        parent: Some(first.clone()),
        ..UpdateTaskRequest::default()
    };
    assert!(api::update_task(&store, &second, &update).unwrap().changed);

    let data = api::get_project_tasks(&store).unwrap();
    let moved = data.tasks.iter().find(|t| t.id == second).unwrap();
    assert_eq!(moved.wbs, "1.1");
}

#[test]
fn test_update_recomputes_parent_rollup() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let parent = add_task(&store, "Structure", None);
    let child = add_task(&store, "Foundations", Some(&parent));

    let update = UpdateTaskRequest {
        planned_hours: Some(40.0),
        status: Some("working".to_string()),
        ..UpdateTaskRequest::default()
    };
    api::update_task(&store, &child, &update).unwrap();

    let parent_task = store.get(&parent).unwrap().unwrap();
    assert!((parent_task.planned_hours - 40.0).abs() < f64::EPSILON);
    assert_eq!(parent_task.status, TaskStatus::Working);
}

// =============================================================================
// TASK DELETION TESTS
// =============================================================================

#[test]
fn test_delete_leaf_refreshes_parent_rollup() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    store
        .insert(planroll::core::models::TaskNode::new("G-1".to_string(), "Group".to_string()))
        .unwrap();
    store
        .insert(child_task("T-1", "G-1", Some(d(2024, 1, 1)), Some(d(2024, 1, 10)), 10.0))
        .unwrap();
    store
        .insert(child_task("T-2", "G-1", Some(d(2024, 1, 5)), Some(d(2024, 1, 20)), 20.0))
        .unwrap();
    api::recalculate_parent_task(&store, "G-1").unwrap();

    let data = api::delete_task(&store, "T-2").unwrap();
    assert!(data.changed);
    assert!(store.get("T-2").unwrap().is_none());

    // The parent no longer carries the removed child's span and hours
    let parent = store.get("G-1").unwrap().unwrap();
    assert!((parent.planned_hours - 10.0).abs() < f64::EPSILON);
    assert_eq!(parent.planned_end, Some(d(2024, 1, 10)));
}

#[test]
fn test_delete_unknown_task_is_not_found() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let err = api::delete_task(&store, "TSK-404").unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[test]
fn test_delete_refuses_task_with_children() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let parent = add_task(&store, "Parent", None);
    add_task(&store, "Child", Some(&parent));

    let err = api::delete_task(&store, &parent).unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
    assert!(err.message.contains("still has children"));
}

// =============================================================================
// ROLLUP ENDPOINT TESTS
// =============================================================================

#[test]
fn test_recalculate_parent_aggregates_children() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    store
        .insert(planroll::core::models::TaskNode::new("G-1".to_string(), "Group".to_string()))
        .unwrap();
    store
        .insert(child_task("T-1", "G-1", Some(d(2024, 1, 5)), Some(d(2024, 1, 20)), 16.0))
        .unwrap();
    store
        .insert(child_task("T-2", "G-1", Some(d(2024, 1, 1)), Some(d(2024, 1, 10)), 24.0))
        .unwrap();

    let data = api::recalculate_parent_task(&store, "G-1").unwrap();
    assert_eq!(data.parent, "G-1");
    assert_eq!(data.children_count, 2);
    assert!((data.total_planned_hours - 40.0).abs() < f64::EPSILON);

    let parent = store.get("G-1").unwrap().unwrap();
    assert_eq!(parent.planned_start, Some(d(2024, 1, 1)));
    assert_eq!(parent.planned_end, Some(d(2024, 1, 20)));
}

#[test]
fn test_recalculate_parent_requires_id() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let err = api::recalculate_parent_task(&store, "").unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
}

#[test]
fn test_recalculate_unknown_parent_is_not_found() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let err = api::recalculate_parent_task(&store, "TSK-404").unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[test]
fn test_recalculate_all_counts_parents() {
    let ws = TestWorkspace::new();
    let store = ws.project("alpha");

    let top = add_task(&store, "Top", None);
    let mid = add_task(&store, "Mid", Some(&top));
    add_task(&store, "Leaf", Some(&mid));
    add_task(&store, "Loose", None);

    let data = api::recalculate_all_parents(&store).unwrap();
    assert_eq!(data.total_parents, 2);
    assert_eq!(data.updated_count, 2);
    assert_eq!(data.failed_count, 0);
}

// =============================================================================
// EMPLOYEE ENDPOINT TESTS
// =============================================================================

#[test]
fn test_check_employee_maps_validation_error() {
    let mut rec = EmployeeRecord::new("EMP-1".to_string(), "Sami Hassan".to_string());
    rec.sponsorships.push(SponsorshipPeriod {
        sponsor: "Acme Contracting".to_string(),
        start: Some(d(2024, 5, 1)),
        end: Some(d(2024, 1, 1)),
    });

    let err = api::check_employee(&mut rec).unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(err.status_code(), 422);
    assert!(err.message.contains("cannot be before"));
}

#[test]
fn test_check_employee_reports_totals() {
    let mut rec = EmployeeRecord::new("EMP-1".to_string(), "Sami Hassan".to_string());
    rec.residence_costs.push(planroll::core::models::ResidenceCost {
        description: "Iqama renewal".to_string(),
        amount: 650.0,
    });

    let data = api::check_employee(&mut rec).unwrap();
    assert_eq!(data.id, "EMP-1");
    assert!((data.total_cost - 650.0).abs() < f64::EPSILON);
    assert_eq!(data.sponsorship_rows, 0);
}

#[test]
fn test_save_employee_persists_valid_record() {
    let ws = TestWorkspace::new();
    let store = EmployeeStore::new(ws.path());

    let mut rec = EmployeeRecord::new("EMP-1".to_string(), "Sami Hassan".to_string());
    let data = api::save_employee(&store, &mut rec).unwrap();
    assert_eq!(data.id, "EMP-1");

    assert!(store.get("EMP-1").unwrap().is_some());
}
