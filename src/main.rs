mod config;
mod db;
mod ipc;
mod store;

use std::io::{self, BufRead, Write};

use serde_json::json;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = config::Config::from_env();

    let mut state = ipc::AppState {
        workspace: None,
        gradebook: None,
        registry: None,
    };

    // A workspace configured at startup must open cleanly before any request
    // is served; a half-initialized schema must not be reachable.
    if let Some(path) = cfg.workspace {
        match db::open_workspace(&path) {
            Ok(open) => {
                log::info!("workspace {} opened from environment", path.display());
                state.workspace = Some(path);
                state.gradebook = Some(open.gradebook);
                state.registry = Some(open.registry);
            }
            Err(e) => {
                log::error!("cannot open workspace {}: {e:#}", path.display());
                std::process::exit(1);
            }
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // No request id to echo back; emit a bare error envelope.
                let _ = writeln!(
                    stdout,
                    "{}",
                    json!({
                        "ok": false,
                        "error": { "code": "bad_json", "message": e.to_string() }
                    })
                );
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
}
