mod common;

use common::{records, temp_workspace, Daemon};
use serde_json::json;

fn create_student(daemon: &mut Daemon, name: &str) -> i64 {
    daemon
        .request_ok(
            "registry.students.create",
            json!({ "name": name, "classLabel": "3B" }),
        )
        .get("studentId")
        .and_then(|v| v.as_i64())
        .expect("studentId")
}

#[test]
fn a_new_student_has_no_subject_and_an_unassigned_teacher() {
    let workspace = temp_workspace();
    let mut daemon = Daemon::spawn();
    daemon.select_workspace(workspace.path());

    let id = create_student(&mut daemon, "Ana");

    let rows = records(&daemon.request_ok("registry.list", json!({})));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("studentId").and_then(|v| v.as_i64()), Some(id));
    assert!(rows[0].get("subject").map(|v| v.is_null()).unwrap_or(false));
    assert_eq!(
        rows[0].get("teacher").and_then(|v| v.as_str()),
        Some("Não definido")
    );
}

#[test]
fn assigning_a_mark_overwrites_the_previous_pair() {
    let workspace = temp_workspace();
    let mut daemon = Daemon::spawn();
    daemon.select_workspace(workspace.path());

    let id = create_student(&mut daemon, "Ana");

    let first = daemon.request_ok(
        "registry.marks.assign",
        json!({ "studentId": id, "subject": "Matemática", "value": "8.5" }),
    );
    assert_eq!(first.get("updated").and_then(|v| v.as_bool()), Some(true));

    let _ = daemon.request_ok(
        "registry.marks.assign",
        json!({ "studentId": id, "subject": "História", "value": 6.0 }),
    );

    let rows = records(&daemon.request_ok("registry.list", json!({})));
    assert_eq!(rows.len(), 1, "one subject per student at a time");
    assert_eq!(
        rows[0].get("subject").and_then(|v| v.as_str()),
        Some("História")
    );
    assert_eq!(rows[0].get("value").and_then(|v| v.as_f64()), Some(6.0));
}

#[test]
fn assigning_to_an_absent_student_is_a_reported_noop() {
    let workspace = temp_workspace();
    let mut daemon = Daemon::spawn();
    daemon.select_workspace(workspace.path());

    let outcome = daemon.request_ok(
        "registry.marks.assign",
        json!({ "studentId": 7, "subject": "Matemática", "value": 8.5 }),
    );
    assert_eq!(outcome.get("updated").and_then(|v| v.as_bool()), Some(false));
}

#[test]
fn listing_resolves_the_teacher_for_the_assigned_subject() {
    let workspace = temp_workspace();
    let mut daemon = Daemon::spawn();
    daemon.select_workspace(workspace.path());

    let id = create_student(&mut daemon, "Ana");
    let _ = daemon.request_ok(
        "teachers.create",
        json!({ "name": "Carlos", "subject": "Matemática" }),
    );
    let _ = daemon.request_ok(
        "registry.marks.assign",
        json!({ "studentId": id, "subject": "Matemática", "value": 8.5 }),
    );

    let rows = records(&daemon.request_ok("registry.list", json!({})));
    assert_eq!(
        rows[0].get("teacher").and_then(|v| v.as_str()),
        Some("Carlos")
    );
}

#[test]
fn deleting_a_registry_student_removes_their_row() {
    let workspace = temp_workspace();
    let mut daemon = Daemon::spawn();
    daemon.select_workspace(workspace.path());

    let id = create_student(&mut daemon, "Ana");
    let outcome = daemon.request_ok("registry.students.delete", json!({ "studentId": id }));
    assert_eq!(outcome.get("deleted").and_then(|v| v.as_bool()), Some(true));

    let rows = records(&daemon.request_ok("registry.list", json!({})));
    assert!(rows.is_empty());
}

#[test]
fn registry_and_gradebook_students_are_independent() {
    let workspace = temp_workspace();
    let mut daemon = Daemon::spawn();
    daemon.select_workspace(workspace.path());

    let _ = create_student(&mut daemon, "Ana");

    let gradebook_rows = records(&daemon.request_ok("records.list", json!({})));
    assert!(
        gradebook_rows.is_empty(),
        "registry students must not appear in the gradebook"
    );
}
