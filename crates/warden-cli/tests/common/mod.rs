//! Shared E2E test helpers for `warden` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::PathBuf;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Environment variables that would leak the host's configuration in.
const WARDEN_VARS: &[&str] = &[
    "WARDEN_DEBUG",
    "WARDEN_ROOT_PATH",
    "WARDEN_LOGIN_PATH",
    "WARDEN_DENIED_MESSAGE",
    "WARDEN_LOG_LEVEL",
    "RUST_LOG",
];

/// Build a Command for the `warden` binary isolated in a tempdir.
///
/// HOME points at the tempdir so no global config is picked up, and the
/// tempdir is the project root. Returns (command, _guard); keep the
/// guard alive for the test's duration.
pub fn warden_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp dir for project");
    let cmd = warden_cmd_in(&tmp);
    (cmd, tmp)
}

/// Build a Command rooted at an existing tempdir.
pub fn warden_cmd_in(dir: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("warden");
    cmd.timeout(TIMEOUT_BASIC);
    for var in WARDEN_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", dir.path());
    cmd.args(["-C", dir.path().to_str().expect("valid utf8")]);
    cmd
}

/// Write a saved login response into `dir` and return its path.
pub fn write_session(dir: &tempfile::TempDir, permissions: &str, superadmin: bool) -> PathBuf {
    let path = dir.path().join("session.json");
    let body = format!(
        r#"{{
  "message_type": "success",
  "user": {{"id": 12, "name": "Dana", "role_id": "R003", "role_name": "Support", "is_superadmin": {superadmin}, "is_active": true}},
  "tokens": {{"access": "access-token", "refresh": "refresh-token"}},
  "permissions": {permissions}
}}"#
    );
    std::fs::write(&path, body).expect("write session file");
    path
}

/// Write `content` as the project config.
pub fn write_project_config(dir: &tempfile::TempDir, content: &str) {
    let config_dir = dir.path().join(".warden");
    std::fs::create_dir_all(&config_dir).expect("create .warden");
    std::fs::write(config_dir.join("config.toml"), content).expect("write config");
}
