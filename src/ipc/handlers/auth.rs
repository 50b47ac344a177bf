use crate::ipc::error::{err, ok};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use crate::session::Role;
use serde_json::json;

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let identifier = match required_str(req, "id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let password = match required_str(req, "password") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(roster) = state.roster.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    let outcome = state.session.login(roster, &identifier, &password);
    // Credential buffers are wiped after every attempt, success or not.
    state.buffers.clear_credentials();

    match outcome {
        Ok(role) => {
            state.notice.show(match role {
                Role::Admin => "Admin login successful!",
                Role::Student => "Student login successful!",
            });
            ok(
                &req.id,
                json!({
                    "role": role.as_str(),
                    "screen": state.session.screen.as_str(),
                    "currentStudent": state.session.current_student,
                }),
            )
        }
        Err(_) => {
            state.notice.show("Invalid credentials!");
            err(&req.id, "invalid_credentials", "Invalid credentials!")
        }
    }
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.session.logout();
    state.buffers.clear_all();
    ok(&req.id, json!({ "screen": state.session.screen.as_str() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.login" => Some(handle_login(state, req)),
        "auth.logout" => Some(handle_logout(state, req)),
        _ => None,
    }
}
