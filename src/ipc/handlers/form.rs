use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::session::Field;
use serde_json::json;

fn active_view(state: &AppState) -> serde_json::Value {
    match state.buffers.active {
        Some(field) => json!({
            "activeField": field.as_str(),
            "value": state.buffers.get(field),
        }),
        None => json!({ "activeField": null, "value": "" }),
    }
}

/// `field: null` drops focus; otherwise one of id/name/course/password.
fn handle_focus(state: &mut AppState, req: &Request) -> serde_json::Value {
    let param = req.params.get("field");
    let field = match param {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => match Field::parse(s) {
            Some(f) => Some(f),
            None => return err(&req.id, "bad_params", format!("unknown field: {s}")),
        },
        Some(_) => return err(&req.id, "bad_params", "field must be a string or null"),
    };
    state.buffers.active = field;
    ok(&req.id, active_view(state))
}

fn handle_append(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(s) = req.params.get("char").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing char");
    };
    let mut chars = s.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return err(&req.id, "bad_params", "char must be a single character");
    };
    state.buffers.append(c);
    ok(&req.id, active_view(state))
}

fn handle_backspace(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.buffers.backspace();
    ok(&req.id, active_view(state))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "form.focus" => Some(handle_focus(state, req)),
        "form.append" => Some(handle_append(state, req)),
        "form.backspace" => Some(handle_backspace(state, req)),
        _ => None,
    }
}
