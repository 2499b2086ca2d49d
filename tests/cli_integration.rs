//! Integration tests for the wildwatch binary.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

fn write_frame(dir: &Path, name: &str, value: u8) {
    let mut data = vec![value; (WIDTH * HEIGHT * 4) as usize];
    for alpha in data.iter_mut().skip(3).step_by(4) {
        *alpha = 255;
    }
    std::fs::write(dir.join(name), data).unwrap();
}

/// Black, white, white: one strong change followed by a still frame.
fn frame_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_frame(dir.path(), "frame_000.rgba", 0);
    write_frame(dir.path(), "frame_001.rgba", 255);
    write_frame(dir.path(), "frame_002.rgba", 255);
    dir
}

fn isolated_config(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("missing.toml")
}

#[test]
fn test_analyze_reports_large_animal() {
    let frames = frame_dir();
    let config = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("wildwatch");
    cmd.arg("--config")
        .arg(isolated_config(&config))
        .arg("analyze")
        .arg(frames.path())
        .arg("--width")
        .arg(WIDTH.to_string())
        .arg("--height")
        .arg(HEIGHT.to_string());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("LARGE_ANIMAL"))
        .stdout(predicate::str::contains("\"total_detections\": 1"));
}

#[test]
fn test_analyze_writes_csv_history() {
    let frames = frame_dir();
    let out = TempDir::new().unwrap();
    let csv_path = out.path().join("history.csv");
    let report_path = out.path().join("report.json");

    let mut cmd = cargo_bin_cmd!("wildwatch");
    cmd.arg("--config")
        .arg(isolated_config(&out))
        .arg("-q")
        .arg("analyze")
        .arg(frames.path())
        .arg("--width")
        .arg(WIDTH.to_string())
        .arg("--height")
        .arg(HEIGHT.to_string())
        .arg("--csv")
        .arg(&csv_path)
        .arg("--output")
        .arg(&report_path);

    cmd.assert().success();

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("Timestamp,Hour,Category,Confidence,Intensity"));
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains(",large_animal,"));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["summary"]["frames_analyzed"], 3);
}

#[test]
fn test_zero_stride_is_rejected() {
    let frames = frame_dir();
    let config = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("wildwatch");
    cmd.arg("--config")
        .arg(isolated_config(&config))
        .arg("analyze")
        .arg(frames.path())
        .arg("--width")
        .arg(WIDTH.to_string())
        .arg("--height")
        .arg(HEIGHT.to_string())
        .arg("--stride")
        .arg("0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("sample_stride"));
}

#[test]
fn test_empty_frame_dir_fails() {
    let frames = TempDir::new().unwrap();
    let config = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("wildwatch");
    cmd.arg("--config")
        .arg(isolated_config(&config))
        .arg("analyze")
        .arg(frames.path())
        .arg("--width")
        .arg("8")
        .arg("--height")
        .arg("8");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no .rgba frames"));
}

#[test]
fn test_wrong_geometry_fails() {
    let frames = frame_dir();
    let config = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("wildwatch");
    cmd.arg("--config")
        .arg(isolated_config(&config))
        .arg("analyze")
        .arg(frames.path())
        .arg("--width")
        .arg("100")
        .arg("--height")
        .arg("100");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid frame"));
}

#[test]
fn test_config_path_honors_flag() {
    let config = TempDir::new().unwrap();
    let path = isolated_config(&config);

    let mut cmd = cargo_bin_cmd!("wildwatch");
    cmd.arg("--config").arg(&path).arg("config").arg("path");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(path.display().to_string()));
}

#[test]
fn test_config_init_then_show() {
    let config = TempDir::new().unwrap();
    let path = config.path().join("nested").join("wildwatch.toml");

    cargo_bin_cmd!("wildwatch")
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    assert!(path.exists());

    cargo_bin_cmd!("wildwatch")
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("sample_stride = 8"))
        .stdout(predicate::str::contains("tick_period_ms = 100"));
}

#[test]
fn test_invalid_config_file_fails() {
    let config = TempDir::new().unwrap();
    let path = config.path().join("bad.toml");
    std::fs::write(&path, "[analysis]\nhistory_capacity = 0\n").unwrap();

    let mut cmd = cargo_bin_cmd!("wildwatch");
    cmd.arg("--config").arg(&path).arg("config").arg("show");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("history_capacity"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_init_without_flag_uses_platform_dir() {
    let home = TempDir::new().unwrap();

    cargo_bin_cmd!("wildwatch")
        .env_remove("WILDWATCH_CONFIG")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .arg("config")
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    let written = home.path().join("wildwatch").join("config.toml");
    assert!(written.exists());
    let contents = std::fs::read_to_string(written).unwrap();
    assert!(contents.contains("[analysis]"));
}

#[test]
fn test_monitor_reports_scheduler_stats() {
    let frames = frame_dir();
    let config = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("wildwatch");
    cmd.arg("--config")
        .arg(isolated_config(&config))
        .arg("monitor")
        .arg(frames.path())
        .arg("--width")
        .arg(WIDTH.to_string())
        .arg("--height")
        .arg(HEIGHT.to_string())
        .arg("--fps")
        .arg("20")
        .arg("--tick-ms")
        .arg("5");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"scheduler\""))
        .stdout(predicate::str::contains("\"tick_period_ms\": 5"));
}
