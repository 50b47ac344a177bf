use crate::calc;
use crate::ipc::error::ok;
use crate::ipc::helpers::roster_ref;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

/// Roster totals plus the defaulter list, one row per student below the
/// attendance threshold, in roster order.
fn handle_summary(state: &mut AppState, req: &Request) -> serde_json::Value {
    let roster = match roster_ref(state, req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let defaulters: Vec<serde_json::Value> = roster
        .defaulters()
        .enumerate()
        .map(|(rank, (index, rec))| {
            json!({
                "rank": rank + 1,
                "index": index,
                "id": rec.id,
                "name": rec.name,
                "percent": calc::round_off_1_decimal(rec.percent()),
            })
        })
        .collect();

    ok(
        &req.id,
        json!({
            "totalStudents": roster.len(),
            "defaulterCount": defaulters.len(),
            "threshold": calc::DEFAULTER_THRESHOLD,
            "defaulters": defaulters,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "reports.summary" => Some(handle_summary(state, req)),
        _ => None,
    }
}
