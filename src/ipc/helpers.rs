use crate::ipc::error::err;
use crate::ipc::types::{AppState, Request};
use crate::roster::Roster;
use crate::session::Role;

pub fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key)))
}

pub fn required_u64(req: &Request, key: &str) -> Result<u64, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_u64())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key)))
}

pub fn roster_ref<'a>(state: &'a AppState, req: &Request) -> Result<&'a Roster, serde_json::Value> {
    state
        .roster
        .as_ref()
        .ok_or_else(|| err(&req.id, "no_workspace", "select a workspace first"))
}

pub fn require_admin(state: &AppState, req: &Request) -> Result<(), serde_json::Value> {
    if state.session.role == Some(Role::Admin) {
        Ok(())
    } else {
        Err(err(&req.id, "forbidden", "admin role required"))
    }
}
