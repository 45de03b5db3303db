#![cfg(feature = "cli")]

use assert_cmd::prelude::*;
use pnmark::{SampleBuffer, SampleFormat};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

fn bin() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("pnmark"))
}

/// 每个用例独立的工作目录
fn workdir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pnmark_cli_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// 带隔离配置和密钥目录的命令
fn cmd_in(dir: &Path) -> Command {
    let mut cmd = bin();
    cmd.arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--key-dir")
        .arg(dir.join("keys"));
    cmd
}

fn write_tone(path: &Path, len: usize) {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let samples = (0..len).map(|i| ((i * 37) % 2000) as i32 - 1000).collect();
    let buffer = SampleBuffer::new(samples, 8000, 1, SampleFormat::Int16).unwrap();
    buffer.to_wav(path).unwrap();
}

fn keygen(dir: &Path) {
    cmd_in(dir)
        .args(["keygen", "--bits", "1024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fingerprint:"));
}

#[test]
fn quiet_verbose_conflict_is_user_facing() {
    let dir = workdir("conflict");
    cmd_in(&dir)
        .args(["--quiet", "--verbose", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "--quiet and --verbose cannot be used together",
        ));
}

#[test]
fn embed_without_inputs_reports_user_message() {
    let dir = workdir("no_inputs");
    cmd_in(&dir)
        .args(["embed", "--message", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input files provided"))
        .stderr(predicate::str::contains("DIAG").not());
}

#[test]
fn embed_without_key_points_to_keygen() {
    let dir = workdir("no_key");
    let input = dir.join("tone.wav");
    write_tone(&input, 4000);
    cmd_in(&dir)
        .args(["embed", "--message", "hello"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pnmark keygen"));
}

#[test]
fn embed_then_verify_roundtrip() {
    let dir = workdir("roundtrip");
    keygen(&dir);
    let input = dir.join("tone.wav");
    write_tone(&input, 8000);

    cmd_in(&dir)
        .args(["embed", "--message", "studio master 2026"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("symbols 1024 stride 7"));

    let marked = dir.join("tone_marked.wav");
    assert!(marked.is_file());
    assert!(dir.join("tone_marked.wav.pnmk").is_file());

    cmd_in(&dir)
        .args(["verify", "--message", "studio master 2026"])
        .arg(&marked)
        .assert()
        .success()
        .stdout(predicate::str::contains("authentic"));

    cmd_in(&dir)
        .args(["verify", "--message", "forged"])
        .arg(&marked)
        .assert()
        .failure()
        .stderr(predicate::str::contains("possible tampering detected"));
}

#[test]
fn extract_without_header_requires_length() {
    let dir = workdir("no_header");
    keygen(&dir);
    let input = dir.join("tone.wav");
    write_tone(&input, 8000);

    cmd_in(&dir)
        .args(["embed", "--no-header", "--message", "m"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("--length 1024"));

    let marked = dir.join("tone_marked.wav");
    cmd_in(&dir)
        .arg("extract")
        .arg(&marked)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass --length"));

    cmd_in(&dir)
        .args(["--quiet", "extract", "--length", "1024"])
        .arg(&marked)
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[0-9a-f]{256}\n$").unwrap());

    cmd_in(&dir)
        .args(["extract", "--length", "1020"])
        .arg(&marked)
        .assert()
        .failure()
        .stderr(predicate::str::contains("multiple of 8"));
}

#[test]
fn reembed_without_header_drops_stale_sidecar() {
    let dir = workdir("stale_header");
    keygen(&dir);
    let input = dir.join("tone.wav");
    let marked = dir.join("tone_marked.wav");
    let sidecar = dir.join("tone_marked.wav.pnmk");

    write_tone(&input, 8000);
    cmd_in(&dir)
        .args(["embed", "--message", "m"])
        .arg(&input)
        .assert()
        .success();
    assert!(sidecar.is_file());

    write_tone(&input, 16_000);
    cmd_in(&dir)
        .args(["embed", "--no-header", "--message", "m"])
        .arg(&input)
        .assert()
        .success();
    assert!(!sidecar.exists());

    cmd_in(&dir)
        .arg("extract")
        .arg(&marked)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass --length"));

    cmd_in(&dir)
        .args(["verify", "--length", "1024", "--message", "m"])
        .arg(&marked)
        .assert()
        .success()
        .stdout(predicate::str::contains("authentic"));
}

#[test]
fn extract_json_report() {
    let dir = workdir("json");
    keygen(&dir);
    let input = dir.join("tone.wav");
    write_tone(&input, 8000);
    cmd_in(&dir)
        .args(["embed", "--message", "m"])
        .arg(&input)
        .assert()
        .success();

    let output = cmd_in(&dir)
        .args(["extract", "--json"])
        .arg(dir.join("tone_marked.wav"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["symbols"], 1024);
    assert_eq!(report["stride"], 7);
    assert_eq!(report["header"], true);
}

#[test]
fn hash_prints_sha256_hex() {
    let dir = workdir("hash");
    let input = dir.join("tone.wav");
    write_tone(&input, 1000);
    cmd_in(&dir)
        .arg("hash")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[0-9a-f]{64}\n$").unwrap());
}

#[test]
fn seal_then_check_detects_modification() {
    let dir = workdir("seal");
    keygen(&dir);
    let input = dir.join("tone.wav");
    write_tone(&input, 2000);

    cmd_in(&dir).arg("seal").arg(&input).assert().success();
    assert!(dir.join("tone.wav.sig").is_file());

    cmd_in(&dir)
        .arg("check")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("no tampering detected"));

    let mut buffer = SampleBuffer::from_wav(&input).unwrap();
    buffer.samples_mut()[500] += 1;
    buffer.to_wav(&input).unwrap();

    cmd_in(&dir)
        .arg("check")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("possible tampering detected"));
}

#[test]
fn status_reports_missing_key() {
    let dir = workdir("status");
    cmd_in(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("key dir:"))
        .stderr(predicate::str::contains("not configured"));
}
