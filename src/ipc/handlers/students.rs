//! Gradebook students and the joined record listing.

use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{id_param, text_param};
use crate::ipc::types::{AppState, Request};
use crate::store::{gradebook, StoreError};

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.gradebook.as_ref() else {
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

    match gradebook::create_student(conn, &name, &class_label) {
        Ok(student_id) => ok(&req.id, json!({ "studentId": student_id })),
        Err(StoreError::Invalid(m)) => err(&req.id, "bad_params", m),
        Err(e) => err(&req.id, "db_insert_failed", e.to_string()),
    }
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.gradebook.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    let student_id = match id_param(&req.params, "studentId") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };

    match gradebook::delete_student(conn, student_id) {
        Ok(deleted) => ok(&req.id, json!({ "deleted": deleted })),
        Err(StoreError::Invalid(m)) => err(&req.id, "bad_params", m),
        Err(e) => err(&req.id, "db_delete_failed", e.to_string()),
    }
}

fn handle_records_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.gradebook.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    match gradebook::list_records(conn) {
        Ok(records) => ok(&req.id, json!({ "records": records })),
        Err(e) => err(&req.id, "db_query_failed", e.to_string()),
    }
}

fn handle_records_search(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.gradebook.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    // An empty needle is a valid search that matches everything.
    let name = match text_param(&req.params, "name") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };

    match gradebook::search_records(conn, &name) {
        Ok(records) => ok(&req.id, json!({ "records": records })),
        Err(e) => err(&req.id, "db_query_failed", e.to_string()),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.create" => Some(handle_students_create(state, req)),
        "students.delete" => Some(handle_students_delete(state, req)),
        "records.list" => Some(handle_records_list(state, req)),
        "records.search" => Some(handle_records_search(state, req)),
        _ => None,
    }
}
