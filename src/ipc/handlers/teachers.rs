//! Teacher directory of the registry variant, plus the subject combo data
//! and the teacher-by-subject lookup the form binds to.

use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::text_param;
use crate::ipc::types::{AppState, Request};
use crate::store::{registry, StoreError};

fn handle_teachers_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.registry.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    let name = match text_param(&req.params, "name") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };
    let subject = match text_param(&req.params, "subject") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };

    match registry::create_teacher(conn, &name, &subject) {
        Ok(teacher_id) => ok(&req.id, json!({ "teacherId": teacher_id })),
        Err(StoreError::Invalid(m)) => err(&req.id, "bad_params", m),
        Err(e) => err(&req.id, "db_insert_failed", e.to_string()),
    }
}

fn handle_teachers_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.registry.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    match registry::list_teachers(conn) {
        Ok(teachers) => ok(&req.id, json!({ "teachers": teachers })),
        Err(e) => err(&req.id, "db_query_failed", e.to_string()),
    }
}

fn handle_subjects_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.registry.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    match registry::list_subjects(conn) {
        Ok(subjects) => ok(&req.id, json!({ "subjects": subjects })),
        Err(e) => err(&req.id, "db_query_failed", e.to_string()),
    }
}

fn handle_teacher_for_subject(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.registry.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    let subject = match text_param(&req.params, "subject") {
        Ok(v) => v,
        Err(m) => return err(&req.id, "bad_params", m),
    };

    // An unmatched subject answers with the sentinel, never an error.
    match registry::teacher_for_subject(conn, &subject) {
        Ok(teacher) => ok(&req.id, json!({ "teacher": teacher })),
        Err(e) => err(&req.id, "db_query_failed", e.to_string()),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "teachers.create" => Some(handle_teachers_create(state, req)),
        "teachers.list" => Some(handle_teachers_list(state, req)),
        "subjects.list" => Some(handle_subjects_list(state, req)),
        "teachers.forSubject" => Some(handle_teacher_for_subject(state, req)),
        _ => None,
    }
}
