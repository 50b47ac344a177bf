use std::path::PathBuf;

use serde::Deserialize;

use crate::roster::Roster;
use crate::session::{FieldBuffers, Notice, Session};
use crate::store;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// All process state, owned by the single stdin loop. No globals; every
/// handler receives this aggregate.
pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub roster: Option<Roster>,
    pub session: Session,
    pub buffers: FieldBuffers,
    pub notice: Notice,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            workspace: None,
            roster: None,
            session: Session::default(),
            buffers: FieldBuffers::default(),
            notice: Notice::default(),
        }
    }

    pub fn data_path(&self) -> Option<PathBuf> {
        self.workspace.as_ref().map(|w| w.join(store::DATA_FILE))
    }

    /// Full-roster rewrite after a mutation. Best effort: a save failure
    /// leaves the change in memory and is not reported.
    pub fn persist(&self) {
        if let (Some(path), Some(roster)) = (self.data_path(), self.roster.as_ref()) {
            let _ = store::save(&path, roster);
        }
    }
}
