//! Gradebook grade rows: create, value update, and the conditional cascade
//! delete that removes a student with no grades left.

use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{id_param, text_param, value_param};
use crate::ipc::types::{AppState, Request};
use crate::store::{gradebook, StoreError};

fn handle_grades_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.gradebook.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    let student_id = match id_param(&req.params, "studentId") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };
    let subject = match text_param(&req.params, "subject") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };
    let value = match value_param(&req.params, "value") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };

    match gradebook::create_grade(conn, student_id, &subject, value) {
        Ok(grade_id) => ok(&req.id, json!({ "gradeId": grade_id })),
        Err(StoreError::Invalid(m)) => err(&req.id, "bad_params", m),
        Err(e) => err(&req.id, "db_insert_failed", e.to_string()),
    }
}

fn handle_grades_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.gradebook.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    let grade_id = match id_param(&req.params, "gradeId") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };
    let value = match value_param(&req.params, "value") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };

    match gradebook::update_grade(conn, grade_id, value) {
        Ok(updated) => ok(&req.id, json!({ "updated": updated })),
        Err(StoreError::Invalid(m)) => err(&req.id, "bad_params", m),
        Err(e) => err(&req.id, "db_update_failed", e.to_string()),
    }
}

fn handle_grades_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.gradebook.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    let grade_id = match id_param(&req.params, "gradeId") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };

    match gradebook::delete_grade(conn, grade_id) {
        Ok(outcome) => ok(&req.id, json!(outcome)),
        Err(StoreError::Invalid(m)) => err(&req.id, "bad_params", m),
        Err(e) => err(&req.id, "db_delete_failed", e.to_string()),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.create" => Some(handle_grades_create(state, req)),
        "grades.update" => Some(handle_grades_update(state, req)),
        "grades.delete" => Some(handle_grades_delete(state, req)),
        _ => None,
    }
}
