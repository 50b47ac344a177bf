use crate::calc;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{require_admin, roster_ref};
use crate::ipc::types::{AppState, Request};
use crate::roster::StudentRecord;
use serde_json::json;

fn record_view(index: usize, rec: &StudentRecord) -> serde_json::Value {
    let percent = rec.percent();
    json!({
        "index": index,
        "id": rec.id,
        "name": rec.name,
        "course": rec.course,
        "totalClasses": rec.total_classes,
        "attendedClasses": rec.attended_classes,
        "percent": calc::round_off_1_decimal(percent),
        "defaulter": rec.is_defaulter,
    })
}

/// Commits the add form from the field buffers. Success stays on the form
/// with cleared buffers; every validation failure maps to one error code
/// and a notice, roster untouched.
fn handle_submit_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(resp) = require_admin(state, req) {
        return resp;
    }
    let Some(roster) = state.roster.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    let added = roster.add(
        &state.buffers.id,
        &state.buffers.name,
        &state.buffers.course,
        &state.buffers.password,
    );
    match added {
        Ok(index) => {
            state.persist();
            state.buffers.clear_all();
            state.notice.show("Student added successfully!");
            ok(
                &req.id,
                json!({
                    "index": index,
                    "studentCount": state.roster.as_ref().map(|r| r.len()).unwrap_or(0),
                }),
            )
        }
        Err(e) => {
            state.notice.show(e.message());
            err(&req.id, e.code(), e.message())
        }
    }
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let roster = match roster_ref(state, req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let students: Vec<serde_json::Value> = roster
        .records()
        .iter()
        .enumerate()
        .map(|(i, rec)| record_view(i, rec))
        .collect();
    ok(&req.id, json!({ "students": students }))
}

/// The bound record for the student self-view screen.
fn handle_me(state: &mut AppState, req: &Request) -> serde_json::Value {
    let roster = match roster_ref(state, req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(index) = state.session.current_student else {
        return err(&req.id, "not_found", "no student bound to this session");
    };
    let Some(rec) = roster.get(index) else {
        return err(&req.id, "not_found", "bound student record missing");
    };
    ok(
        &req.id,
        json!({
            "student": record_view(index, rec),
            "threshold": calc::DEFAULTER_THRESHOLD,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.submitAdd" => Some(handle_submit_add(state, req)),
        "students.list" => Some(handle_list(state, req)),
        "students.me" => Some(handle_me(state, req)),
        _ => None,
    }
}
