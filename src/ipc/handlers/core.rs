use crate::ipc::error::{err, ok};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use crate::session::DEMO_LOGIN_PASSWORD;
use crate::store;
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string())
        }),
    )
}

fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let path = match required_str(req, "path") {
        Ok(v) => PathBuf::from(v),
        Err(resp) => return resp,
    };
    if let Err(e) = std::fs::create_dir_all(&path) {
        return err(&req.id, "workspace_open_failed", format!("{e}"));
    }

    let mut roster = store::load(&path.join(store::DATA_FILE));
    let seeded = roster.seed_demo_if_empty(DEMO_LOGIN_PASSWORD);

    state.workspace = Some(path.clone());
    state.roster = Some(roster);
    if seeded {
        state.persist();
    }

    ok(
        &req.id,
        json!({
            "workspacePath": path.to_string_lossy(),
            "studentCount": state.roster.as_ref().map(|r| r.len()).unwrap_or(0),
            "seeded": seeded
        }),
    )
}

/// One call per render frame; drives the transient-notice countdown.
fn handle_tick(state: &mut AppState, req: &Request) -> serde_json::Value {
    let elapsed_ms = req.params.get("elapsedMs").and_then(|v| v.as_u64());
    let Some(elapsed_ms) = elapsed_ms else {
        return err(&req.id, "bad_params", "missing elapsedMs");
    };
    state.notice.tick(elapsed_ms);
    ok(
        &req.id,
        json!({ "noticeRemainingMs": state.notice.remaining_ms }),
    )
}

/// Everything the shell needs to render the current frame.
fn handle_state_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "screen": state.session.screen.as_str(),
            "role": state.session.role.map(|r| r.as_str()),
            "currentStudent": state.session.current_student,
            "activeField": state.buffers.active.map(|f| f.as_str()),
            "buffers": {
                "id": state.buffers.id,
                "name": state.buffers.name,
                "course": state.buffers.course,
                "password": state.buffers.password,
            },
            "notice": {
                "text": if state.notice.is_visible() { state.notice.text.as_str() } else { "" },
                "remainingMs": state.notice.remaining_ms,
            },
            "studentCount": state.roster.as_ref().map(|r| r.len()).unwrap_or(0)
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        "tick" => Some(handle_tick(state, req)),
        "state.get" => Some(handle_state_get(state, req)),
        _ => None,
    }
}
