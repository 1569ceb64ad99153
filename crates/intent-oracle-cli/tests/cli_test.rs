//! CLI tests against the real binary.
//!
//! Every run is offline (`--offline` or `--bytes`) and executes inside a
//! temporary directory so no `config/` tree or network is involved.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_SETUP: i32 = 2;

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_intent-oracle"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("ORACLE_ENV")
        .args(args)
        .output()
        .expect("failed to spawn intent-oracle")
}

fn write_artifact(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("ocean.txt");
    fs::write(
        &path,
        "ember 0.9 0.1 0.0 0.1\n\
         tide 0.0 0.8 0.2 0.0\n\
         stone 0.1 0.0 0.9 0.3\n\
         wind 0.2 0.2 0.1 0.9\n",
    )
    .unwrap();
    path
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

#[test]
fn inspect_reports_shape() {
    let dir = TempDir::new().unwrap();
    let artifact = write_artifact(&dir);

    let output = run(dir.path(), &["inspect", "--artifact", artifact.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));

    let json = stdout_json(&output);
    assert_eq!(json["words"], 4);
    assert_eq!(json["dimension"], 4);
    assert_eq!(json["sample"][0], "ember");
}

#[test]
fn manifest_offline_seeded_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let artifact = write_artifact(&dir);
    let args = [
        "manifest",
        "--artifact",
        artifact.to_str().unwrap(),
        "--offline",
        "--seed",
        "7",
        "--json",
        "quiet harbor",
    ];

    let first = run(dir.path(), &args);
    let second = run(dir.path(), &args);
    assert_eq!(first.status.code(), Some(EXIT_SUCCESS));

    let a = stdout_json(&first);
    let b = stdout_json(&second);
    assert_eq!(a["intent"], "quiet harbor");
    assert_eq!(a["entropy_origin"], "fallback");
    assert_eq!(a["crystal"], b["crystal"]);
    assert!(!a["crystal"].as_str().unwrap().is_empty());
}

#[test]
fn manifest_blank_intent_fails() {
    let dir = TempDir::new().unwrap();
    let artifact = write_artifact(&dir);

    let output = run(
        dir.path(),
        &["manifest", "--artifact", artifact.to_str().unwrap(), "--offline", "   "],
    );
    assert_eq!(output.status.code(), Some(EXIT_FAILURE));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Intent text cannot be empty"));
}

#[test]
fn manifest_missing_artifact_is_setup_error() {
    let dir = TempDir::new().unwrap();
    let output = run(
        dir.path(),
        &["manifest", "--artifact", "absent.json", "--offline", "hello"],
    );
    assert_eq!(output.status.code(), Some(EXIT_SETUP));
}

#[test]
fn charge_empty_intent_centered_bytes_is_zero() {
    let dir = TempDir::new().unwrap();
    let output = run(
        dir.path(),
        &["charge", "--dim", "4", "--bytes", "128,128,128,128", ""],
    );
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));

    let json = stdout_json(&output);
    assert_eq!(json["entropy_origin"], "primary");
    assert_eq!(json["stats"]["collapsed"], true);
    let vector: Vec<f64> = json["vector"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    assert_eq!(vector, vec![0.0; 4]);
}

#[test]
fn charge_bytes_length_must_match_dim() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["charge", "--dim", "3", "--bytes", "1,2", "x"]);
    assert_eq!(output.status.code(), Some(EXIT_SETUP));
}

#[test]
fn config_file_is_honored() {
    let dir = TempDir::new().unwrap();
    let artifact = write_artifact(&dir);
    let config_path = dir.path().join("oracle.toml");
    fs::write(
        &config_path,
        format!(
            "[entropy]\nremote_enabled = false\nseed = 3\n\n[artifact]\npath = \"{}\"\n",
            artifact.display()
        ),
    )
    .unwrap();

    let output = run(
        dir.path(),
        &["--config", config_path.to_str().unwrap(), "manifest", "--json", "north"],
    );
    assert_eq!(output.status.code(), Some(EXIT_SUCCESS));
    assert_eq!(stdout_json(&output)["entropy_origin"], "fallback");
}

#[test]
fn invalid_config_file_is_setup_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("oracle.toml");
    fs::write(&config_path, "[crystallize]\nmax_steps = 0\n").unwrap();

    let output = run(
        dir.path(),
        &["--config", config_path.to_str().unwrap(), "inspect"],
    );
    assert_eq!(output.status.code(), Some(EXIT_SETUP));
}
