use crate::ipc::error::{err, ok};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use crate::session::{can_navigate, Screen};
use serde_json::json;

fn handle_goto(state: &mut AppState, req: &Request) -> serde_json::Value {
    let target = match required_str(req, "screen") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(target) = Screen::parse(&target) else {
        return err(&req.id, "bad_params", format!("unknown screen: {target}"));
    };

    if !can_navigate(state.session.role, state.session.screen, target) {
        return err(
            &req.id,
            "bad_transition",
            format!(
                "cannot navigate {} -> {}",
                state.session.screen.as_str(),
                target.as_str()
            ),
        );
    }

    state.session.screen = target;
    // Entering the add form starts from blank fields; any navigation drops focus.
    if target == Screen::AddStudent {
        state.buffers.clear_all();
    } else {
        state.buffers.active = None;
    }
    ok(&req.id, json!({ "screen": target.as_str() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "nav.goto" => Some(handle_goto(state, req)),
        _ => None,
    }
}
