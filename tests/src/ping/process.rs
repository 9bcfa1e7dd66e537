#![cfg(test)]
//! Runs the real process-backed runner against fake `fping` shell scripts.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use fastping_common::FastPingError;
use fastping_common::config::Config;
use fastping_common::network::status::Status;
use fastping_core::{FastPing, PingReport, PingRequest, system};
use tempfile::TempDir;

const CSV_FPING: &str = r#"#!/bin/sh
if [ "$1" = "-v" ]; then
    echo "fping: Version 3.10-csv"
    exit 0
fi
case "$2" in
    *.invalid) echo "$2,unresolvable"; exit 2 ;;
    10.20.30.0/30) echo "10.20.30.1,alive"; echo "10.20.30.2,unreachable"; exit 1 ;;
    127.0.0.1) echo "$2,alive" ;;
    *) echo "$2,unreachable"; exit 1 ;;
esac
"#;

const PLAIN_FPING: &str = r#"#!/bin/sh
echo "fping: Version 3.10"
"#;

const SLOW_FPING: &str = r#"#!/bin/sh
if [ "$1" = "-v" ]; then
    echo "fping: Version 3.10-csv"
    exit 0
fi
exec sleep 5
"#;

struct FakeFping {
    _dir: TempDir,
    csv: PathBuf,
    plain: PathBuf,
    slow: PathBuf,
}

/// Scripts are written once, before any test spawns a process.
fn fakes() -> &'static FakeFping {
    static FAKES: OnceLock<FakeFping> = OnceLock::new();
    FAKES.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap();
        let csv = write_script(dir.path(), "fping", CSV_FPING);
        let plain = write_script(dir.path(), "fping-plain", PLAIN_FPING);
        let slow = write_script(dir.path(), "fping-slow", SLOW_FPING);
        FakeFping { _dir: dir, csv, plain, slow }
    })
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn config(executable: &Path) -> Config {
    Config {
        executable: Some(executable.to_path_buf()),
        ..Config::default()
    }
}

#[test]
fn inspect_reads_version_banner() {
    let exe = system::inspect(&fakes().csv).unwrap();
    assert!(exe.csv_support);
    assert!(exe.version.contains("3.10"));
}

#[test]
fn executable_without_csv_is_rejected() {
    let result = FastPing::new(config(&fakes().plain));
    assert!(matches!(result, Err(FastPingError::Configuration(_))));
}

#[tokio::test]
async fn failing_processes_still_report() {
    let fp = FastPing::new(config(&fakes().csv)).unwrap();
    let report = fp
        .ping(PingRequest::targets([
            "127.0.0.1",
            "192.0.2.1",
            "ghost.invalid",
            "10.20.30.0 255.255.255.252",
        ]))
        .await
        .unwrap();

    let PingReport::Full(map) = report else {
        panic!("expected the full map");
    };
    assert_eq!(map.get("127.0.0.1"), Some(Status::Alive));
    assert_eq!(map.get("192.0.2.1"), Some(Status::Unreachable));
    assert_eq!(map.get("ghost.invalid"), Some(Status::Unresolvable));
    assert_eq!(map.get("10.20.30.1"), Some(Status::Alive));
    assert_eq!(map.get("10.20.30.2"), Some(Status::Unreachable));
    assert_eq!(map.len(), 5);
}

#[tokio::test]
async fn timed_out_probe_contributes_nothing() {
    let cfg = Config {
        probe_timeout: Some(Duration::from_millis(200)),
        ..config(&fakes().slow)
    };
    let fp = FastPing::new(cfg).unwrap();

    let map = fp
        .status_map(PingRequest::targets(["127.0.0.1"]))
        .await
        .unwrap();
    assert!(map.is_empty());
}

#[tokio::test]
async fn vanished_executable_contributes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let exe = write_script(dir.path(), "fping", CSV_FPING);
    let fp = FastPing::new(config(&exe)).unwrap();
    fs::remove_file(&exe).unwrap();

    let map = fp
        .status_map(PingRequest::targets(["127.0.0.1", "ghost.invalid"]))
        .await
        .unwrap();
    assert!(map.is_empty());
}
