use std::env;
use std::path::PathBuf;

/// Startup configuration, read from the environment exactly once. The
/// frontend can still switch workspaces at runtime via `workspace.select`.
#[derive(Debug, Clone)]
pub struct Config {
    /// When set, this workspace is opened before serving and an open
    /// failure is fatal. Unset leaves the daemon waiting for
    /// `workspace.select`.
    pub workspace: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        // A .env beside the working directory is honored when present.
        dotenv::dotenv().ok();
        Config {
            workspace: env::var("NOTASD_WORKSPACE").ok().map(PathBuf::from),
        }
    }
}
