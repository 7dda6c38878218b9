use std::path::PathBuf;

use rusqlite::Connection;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// All process state: the selected workspace and one open connection per
/// variant database. Owned by the request loop, handed to handlers by
/// reference; nothing else is shared.
pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub gradebook: Option<Connection>,
    pub registry: Option<Connection>,
}
