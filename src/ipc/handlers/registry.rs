//! Registry variant students: single subject/grade pair on the row, listing
//! joined against the teacher directory.

use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{id_param, text_param, value_param};
use crate::ipc::types::{AppState, Request};
use crate::store::{registry, StoreError};

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.registry.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    let name = match text_param(&req.params, "name") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };
    let class_label = match text_param(&req.params, "classLabel") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };

    match registry::create_student(conn, &name, &class_label) {
        Ok(student_id) => ok(&req.id, json!({ "studentId": student_id })),
        Err(StoreError::Invalid(m)) => err(&req.id, "bad_params", m),
        Err(e) => err(&req.id, "db_insert_failed", e.to_string()),
    }
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.registry.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    let student_id = match id_param(&req.params, "studentId") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };

    match registry::delete_student(conn, student_id) {
        Ok(deleted) => ok(&req.id, json!({ "deleted": deleted })),
        Err(StoreError::Invalid(m)) => err(&req.id, "bad_params", m),
        Err(e) => err(&req.id, "db_delete_failed", e.to_string()),
    }
}

fn handle_marks_assign(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.registry.as_ref() else {
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

    match registry::assign_mark(conn, student_id, &subject, value) {
        Ok(updated) => ok(&req.id, json!({ "updated": updated })),
        Err(StoreError::Invalid(m)) => err(&req.id, "bad_params", m),
        Err(e) => err(&req.id, "db_update_failed", e.to_string()),
    }
}

fn handle_registry_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.registry.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    match registry::list_rows(conn) {
        Ok(records) => ok(&req.id, json!({ "records": records })),
        Err(e) => err(&req.id, "db_query_failed", e.to_string()),
    }
}

fn handle_registry_search(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.registry.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    let name = match text_param(&req.params, "name") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };

    match registry::search_rows(conn, &name) {
        Ok(records) => ok(&req.id, json!({ "records": records })),
        Err(e) => err(&req.id, "db_query_failed", e.to_string()),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "registry.students.create" => Some(handle_students_create(state, req)),
        "registry.students.delete" => Some(handle_students_delete(state, req)),
        "registry.marks.assign" => Some(handle_marks_assign(state, req)),
        "registry.list" => Some(handle_registry_list(state, req)),
        "registry.search" => Some(handle_registry_search(state, req)),
        _ => None,
    }
}
