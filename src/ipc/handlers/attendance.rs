use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{require_admin, required_u64};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Present,
    Absent,
}

/// The shell only offers rows of the current roster snapshot, so the index
/// is trusted once its shape checks out; an out-of-range value is a
/// frontend defect and panics in the roster rather than round-tripping as
/// a user error.
fn handle_mark(state: &mut AppState, req: &Request, mark: Mark) -> serde_json::Value {
    if let Err(resp) = require_admin(state, req) {
        return resp;
    }
    let index = match required_u64(req, "index") {
        Ok(v) => v as usize,
        Err(resp) => return resp,
    };
    let Some(roster) = state.roster.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };

    match mark {
        Mark::Present => roster.mark_present(index),
        Mark::Absent => roster.mark_absent(index),
    }
    let rec = &roster.records()[index];
    let (total, attended, defaulter) = (rec.total_classes, rec.attended_classes, rec.is_defaulter);
    state.persist();
    state.notice.show(match mark {
        Mark::Present => "Marked Present!",
        Mark::Absent => "Marked Absent!",
    });

    ok(
        &req.id,
        json!({
            "index": index,
            "totalClasses": total,
            "attendedClasses": attended,
            "defaulter": defaulter,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.markPresent" => Some(handle_mark(state, req, Mark::Present)),
        "attendance.markAbsent" => Some(handle_mark(state, req, Mark::Absent)),
        _ => None,
    }
}
