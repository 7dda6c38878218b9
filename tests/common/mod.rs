#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde_json::json;

/// A running notasd sidecar driven over its stdio protocol.
pub struct Daemon {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    next_id: u32,
}

impl Daemon {
    pub fn spawn() -> Self {
        Self::spawn_command(Self::command())
    }

    /// Spawns with the workspace preconfigured through the environment
    /// instead of `workspace.select`.
    pub fn spawn_with_workspace(workspace: &Path) -> Self {
        let mut cmd = Self::command();
        cmd.env("NOTASD_WORKSPACE", workspace);
        Self::spawn_command(cmd)
    }

    pub fn command() -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_notasd"));
        // Keep ambient configuration out of the tests.
        cmd.env_remove("NOTASD_WORKSPACE");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        cmd
    }

    fn spawn_command(mut cmd: Command) -> Self {
        let mut child = cmd.spawn().expect("spawn notasd");
        let stdin = child.stdin.take().expect("child stdin");
        let stdout = child.stdout.take().expect("child stdout");
        Daemon {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            next_id: 0,
        }
    }

    pub fn request(&mut self, method: &str, params: serde_json::Value) -> serde_json::Value {
        self.next_id += 1;
        let id = self.next_id.to_string();
        let payload = json!({ "id": id, "method": method, "params": params });
        writeln!(self.stdin, "{}", payload).expect("write request");
        self.stdin.flush().expect("flush request");

        let mut line = String::new();
        self.stdout.read_line(&mut line).expect("read response line");
        assert!(!line.trim().is_empty(), "empty response for {}", method);
        let value: serde_json::Value =
            serde_json::from_str(line.trim()).expect("parse response json");
        assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id.as_str()));
        value
    }

    pub fn request_ok(&mut self, method: &str, params: serde_json::Value) -> serde_json::Value {
        let value = self.request(method, params);
        assert!(
            value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
            "{} failed: {}",
            method,
            value
        );
        value.get("result").cloned().unwrap_or_else(|| json!({}))
    }

    /// Asserts the request fails with the given error code.
    pub fn request_err(
        &mut self,
        method: &str,
        params: serde_json::Value,
        code: &str,
    ) -> serde_json::Value {
        let value = self.request(method, params);
        assert_eq!(
            value.get("ok").and_then(|v| v.as_bool()),
            Some(false),
            "{} unexpectedly succeeded: {}",
            method,
            value
        );
        assert_eq!(
            value
                .get("error")
                .and_then(|e| e.get("code"))
                .and_then(|v| v.as_str()),
            Some(code),
            "unexpected error for {}: {}",
            method,
            value
        );
        value
    }

    pub fn select_workspace(&mut self, workspace: &Path) {
        let _ = self.request_ok(
            "workspace.select",
            json!({ "path": workspace.to_string_lossy() }),
        );
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn temp_workspace() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp workspace")
}

pub fn records(result: &serde_json::Value) -> Vec<serde_json::Value> {
    result
        .get("records")
        .and_then(|v| v.as_array())
        .cloned()
        .expect("records array")
}
