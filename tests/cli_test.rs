//! Integration tests for the thamil binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SETUP_NODE: &str = r#"{
  "_id": "65f0c0ffee",
  "keyword": "setup-node",
  "commands": ["echo step-A", "echo step-B"],
  "prerequisites": [{"check": "true", "install": "echo should-not-install"}],
  "__v": 0
}"#;

/// A temp HOME with a config file pointing at `server`.
fn setup_home(server: &MockServer) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("config.yml"),
        format!(
            "api_url: {}\nmin_available_memory_mb: null\n",
            server.base_url()
        ),
    )
    .unwrap();
    temp
}

fn thamil(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("thamil"));
    cmd.env("HOME", home.path())
        .env("THAMIL_CONFIG", home.path().join("config.yml"))
        .env_remove("THAMIL_API_URL")
        .env_remove("THAMIL_COMMAND_TIMEOUT")
        .env_remove("THAMIL_STRICT_CHECKS")
        .env_remove("THAMIL_PROMPT_CONFIRM_RUN")
        .current_dir(home.path())
        .arg("--non-interactive");
    cmd
}

fn serve(server: &MockServer, keyword: &str, body: &str) {
    let path = format!("/commands/{}", keyword);
    let body = body.to_string();
    server.mock(|when, then| {
        when.method(GET).path(path);
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    });
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("thamil"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("KEYWORD"))
        .stdout(predicate::str::contains("--dry-run"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("thamil"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_keyword() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("thamil"));
    cmd.assert().failure().code(2);
    Ok(())
}

#[test]
fn cli_rejects_blank_keyword() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("thamil"));
    cmd.arg("  ");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("must not be blank"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_runs_preset_with_yes() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    serve(&server, "setup-node", SETUP_NODE);
    let home = setup_home(&server);

    thamil(&home)
        .args(["setup-node", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prerequisite check passed: true"))
        .stdout(predicate::str::contains("Running: echo step-A"))
        .stdout(predicate::str::contains("step-B"))
        .stdout(predicate::str::contains("All commands executed successfully!"))
        .stdout(predicate::str::contains("should-not-install").not());
    Ok(())
}

#[test]
fn cli_unknown_keyword_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/commands/missing");
        then.status(404).body(r#"{"error":"Command not found"}"#);
    });
    let home = setup_home(&server);

    thamil(&home)
        .arg("missing")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("\"missing\" not found"))
        .stdout(predicate::str::contains("non-interactive").not());
    Ok(())
}

#[test]
fn cli_server_error_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/commands/setup-node");
        then.status(500).body(r#"{"error":"db down"}"#);
    });
    let home = setup_home(&server);

    thamil(&home)
        .args(["setup-node", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not fetch preset"));
    Ok(())
}

#[test]
fn cli_declines_by_default_when_non_interactive() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    serve(&server, "setup-node", SETUP_NODE);
    let home = setup_home(&server);

    thamil(&home)
        .arg("setup-node")
        .assert()
        .success()
        .stdout(predicate::str::contains("[non-interactive: no]"))
        .stdout(predicate::str::contains("Aborted. Nothing was run."))
        .stdout(predicate::str::contains("Running:").not());
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_prompt_override_grants_consent() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    serve(&server, "setup-node", SETUP_NODE);
    let home = setup_home(&server);

    thamil(&home)
        .arg("setup-node")
        .env("THAMIL_PROMPT_CONFIRM_RUN", "yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("[non-interactive: yes]"))
        .stdout(predicate::str::contains("Running: echo step-B"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_failed_install_stops_before_commands() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    serve(
        &server,
        "setup-go",
        r#"{"commands":["echo never"],"prerequisites":[{"check":"false","install":"exit 7"}]}"#,
    );
    let home = setup_home(&server);

    thamil(&home)
        .args(["setup-go", "--yes"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Installing prerequisite: exit 7"))
        .stdout(predicate::str::contains("Running:").not())
        .stderr(predicate::str::contains("exit code 7"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_stops_at_failing_command() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    serve(
        &server,
        "broken",
        r#"{"commands":["echo first","exit 3","echo third"]}"#,
    );
    let home = setup_home(&server);

    thamil(&home)
        .args(["broken", "--yes"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Running: exit 3"))
        .stdout(predicate::str::contains("Running: echo third").not())
        .stderr(predicate::str::contains("Command #2 failed"));
    Ok(())
}

#[test]
fn cli_dry_run_executes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    serve(&server, "setup-node", SETUP_NODE);
    let home = setup_home(&server);

    thamil(&home)
        .args(["setup-node", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. echo step-A"))
        .stdout(predicate::str::contains("Dry run: nothing was executed."))
        .stdout(predicate::str::contains("Running:").not());
    Ok(())
}

#[test]
fn cli_api_url_flag_beats_config() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/commands/setup-node");
        then.status(200).body(SETUP_NODE);
    });
    let home = TempDir::new()?;
    fs::write(
        home.path().join("config.yml"),
        "api_url: http://127.0.0.1:9\nmin_available_memory_mb: null\n",
    )?;

    thamil(&home)
        .args(["setup-node", "--dry-run", "--api-url", &server.base_url()])
        .assert()
        .success();
    mock.assert();
    Ok(())
}

#[test]
fn cli_missing_config_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;

    thamil(&home)
        .arg("setup-node")
        .env("THAMIL_CONFIG", home.path().join("nope.yml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn cli_rejects_unknown_config_keys() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    fs::write(home.path().join("config.yml"), "api_uri: http://typo\n")?;

    thamil(&home)
        .arg("setup-node")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("api_uri"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_ctrl_c_during_fetch_exits_130() -> Result<(), Box<dyn std::error::Error>> {
    use std::process::Stdio;
    use std::time::{Duration, Instant};

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/commands/setup-node");
        then.status(200)
            .delay(Duration::from_secs(6))
            .body(SETUP_NODE);
    });
    let home = setup_home(&server);

    let mut child = std::process::Command::new(cargo_bin("thamil"))
        .env("HOME", home.path())
        .env("THAMIL_CONFIG", home.path().join("config.yml"))
        .env_remove("THAMIL_API_URL")
        .env_remove("THAMIL_COMMAND_TIMEOUT")
        .current_dir(home.path())
        .args(["--non-interactive", "setup-node", "--yes"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    std::thread::sleep(Duration::from_millis(700));
    let sent = Instant::now();
    unsafe {
        libc::kill(child.id() as libc::pid_t, libc::SIGINT);
    }
    let status = child.wait()?;

    assert_eq!(status.code(), Some(130));
    assert!(sent.elapsed() < Duration::from_secs(3));
    Ok(())
}
