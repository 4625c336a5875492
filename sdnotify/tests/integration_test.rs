//! Integration tests for sdnotify
//!
//! These tests run the `sdnotifytest` binary against a datagram socket that
//! plays the supervisor, and check what it receives.

use std::io;
use std::os::unix::net::UnixDatagram;
use std::path::PathBuf;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Supervisor {
    _temp: TempDir,
    path: PathBuf,
    socket: UnixDatagram,
}

impl Supervisor {
    fn listen() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let path = temp.path().join("notify.sock");
        let socket = UnixDatagram::bind(&path).expect("Failed to bind supervisor socket");
        socket
            .set_read_timeout(Some(Duration::from_secs(5)))
            .expect("Failed to set read timeout");
        Self {
            _temp: temp,
            path,
            socket,
        }
    }

    /// Drain every datagram already queued on the socket
    fn received(&self) -> Vec<String> {
        self.socket.set_nonblocking(true).expect("Failed to set nonblocking");
        let mut datagrams = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            match self.socket.recv(&mut buf) {
                Ok(n) => datagrams.push(String::from_utf8_lossy(&buf[..n]).into_owned()),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => panic!("Failed to read: {e}"),
            }
        }
        datagrams
    }
}

fn sdnotifytest() -> Command {
    let mut cmd = Command::cargo_bin("sdnotifytest").expect("Failed to find sdnotifytest binary");
    cmd.env_remove("NOTIFY_SOCKET").env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// End-to-end notification sequence
// =============================================================================

#[test]
fn test_sequence_received_as_separate_batches() {
    let supervisor = Supervisor::listen();

    sdnotifytest().env("NOTIFY_SOCKET", &supervisor.path).assert().success();

    assert_eq!(
        supervisor.received(),
        vec![
            "STATUS=waiting 0",
            "STATUS=waiting 1",
            "STATUS=waiting 2",
            "READY=1\nSTATUS=done\nSTOPPING=1",
        ]
    );
}

#[test]
fn test_concatenated_stream_only_batches_are_newline_delimited() {
    let supervisor = Supervisor::listen();

    sdnotifytest().env("NOTIFY_SOCKET", &supervisor.path).assert().success();

    let want = "STATUS=waiting 0STATUS=waiting 1STATUS=waiting 2READY=1\nSTATUS=done\nSTOPPING=1";
    assert_eq!(supervisor.received().concat(), want);
}

#[test]
fn test_iterations_flag() {
    let supervisor = Supervisor::listen();

    sdnotifytest()
        .env("NOTIFY_SOCKET", &supervisor.path)
        .args(["--iterations", "1", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(
        supervisor.received(),
        vec!["STATUS=waiting 0", "READY=1\nSTATUS=done\nSTOPPING=1"]
    );
}

#[test]
fn test_echoes_batches_to_stdout() {
    let supervisor = Supervisor::listen();

    sdnotifytest()
        .env("NOTIFY_SOCKET", &supervisor.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("STATUS=waiting 2"))
        .stdout(predicate::str::contains("READY=1 | STATUS=done | STOPPING=1"));
}

#[test]
fn test_socket_from_config_file() {
    let supervisor = Supervisor::listen();
    let config_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = config_dir.path().join("config.yml");
    std::fs::write(&config_path, format!("socket: {}\n", supervisor.path.display())).expect("Failed to write config");

    sdnotifytest()
        .arg("--config")
        .arg(&config_path)
        .args(["-n", "0", "-q"])
        .assert()
        .success();

    assert_eq!(supervisor.received(), vec!["READY=1\nSTATUS=done\nSTOPPING=1"]);
}

#[test]
fn test_notify_socket_wins_over_config_file() {
    let supervisor = Supervisor::listen();
    let elsewhere = Supervisor::listen();
    let config_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = config_dir.path().join("config.yml");
    std::fs::write(&config_path, format!("socket: {}\n", elsewhere.path.display())).expect("Failed to write config");

    sdnotifytest()
        .env("NOTIFY_SOCKET", &supervisor.path)
        .arg("--config")
        .arg(&config_path)
        .args(["-n", "1", "-q"])
        .assert()
        .success();

    assert_eq!(
        supervisor.received(),
        vec!["STATUS=waiting 0", "READY=1\nSTATUS=done\nSTOPPING=1"]
    );
    assert!(elsewhere.received().is_empty());
}

#[test]
fn test_empty_config_socket_does_not_mask_notify_socket() {
    let supervisor = Supervisor::listen();
    let config_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = config_dir.path().join("config.yml");
    std::fs::write(&config_path, "socket: \"\"\n").expect("Failed to write config");

    sdnotifytest()
        .env("NOTIFY_SOCKET", &supervisor.path)
        .arg("--config")
        .arg(&config_path)
        .args(["-n", "0", "-q"])
        .assert()
        .success();

    assert_eq!(supervisor.received(), vec!["READY=1\nSTATUS=done\nSTOPPING=1"]);
}

#[cfg(target_os = "linux")]
#[test]
fn test_default_config_location_does_not_mask_notify_socket() {
    let supervisor = Supervisor::listen();
    let xdg = TempDir::new().expect("Failed to create temp dir");
    std::fs::create_dir_all(xdg.path().join("sdnotify")).expect("Failed to create config dir");
    std::fs::write(xdg.path().join("sdnotify").join("config.yml"), "socket: \"\"\n").expect("Failed to write config");

    sdnotifytest()
        .env("NOTIFY_SOCKET", &supervisor.path)
        .env("XDG_CONFIG_HOME", xdg.path())
        .args(["-n", "0", "-q"])
        .assert()
        .success();

    assert_eq!(supervisor.received(), vec!["READY=1\nSTATUS=done\nSTOPPING=1"]);
}

// =============================================================================
// Failure modes
// =============================================================================

#[test]
fn test_fails_without_notify_socket() {
    let config_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = config_dir.path().join("config.yml");
    std::fs::write(&config_path, "{}\n").expect("Failed to write config");

    sdnotifytest()
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("NOTIFY_SOCKET"));
}

#[test]
fn test_fails_when_socket_missing() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let missing = temp.path().join("missing.sock");

    sdnotifytest()
        .env("NOTIFY_SOCKET", &missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open notifier"));
}
