//! CLI integration tests for muscle-state

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to escape path for TOML on Windows
fn escape_path_for_toml(path: &str) -> String {
    path.replace('\\', "\\\\")
}

/// Helper to create a test environment with a config file pointing at a temp state file
fn setup_test_env() -> (TempDir, String, String) {
    let temp_dir = TempDir::new().unwrap();

    let config_path = temp_dir.path().join("config.toml");
    let state_path = temp_dir.path().join("data").join("state.json");

    let config_content = format!(
        r#"
[storage]
state_file = "{}"

[defaults]
language = "en"
"#,
        escape_path_for_toml(&state_path.to_string_lossy())
    );
    fs::write(&config_path, config_content).unwrap();

    (
        temp_dir,
        config_path.to_string_lossy().to_string(),
        state_path.to_string_lossy().to_string(),
    )
}

fn muscle_state(config_path: &str) -> Command {
    let mut cmd = Command::cargo_bin("muscle-state").unwrap();
    cmd.env("MUSCLEMAP_CONFIG", config_path)
        .env_remove("MUSCLEMAP_STATE_FILE");
    cmd
}

fn saved_state(state_path: &str) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(state_path).unwrap()).unwrap()
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("muscle-state")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("EXIT CODES"))
        .stdout(predicate::str::contains("import"));
}

#[test]
fn test_set_writes_state_file() {
    let (_temp_dir, config_path, state_path) = setup_test_env();

    muscle_state(&config_path)
        .args(["set", "neck", "very-weak"])
        .assert()
        .success()
        .stdout("neck: very_weak\n");

    let state = saved_state(&state_path);
    assert_eq!(state["version"], 1);
    assert_eq!(state["state"]["muscleStates"]["neck"], "very_weak");
}

#[test]
fn test_set_unknown_muscle_exits_3() {
    let (_temp_dir, config_path, state_path) = setup_test_env();

    muscle_state(&config_path)
        .args(["set", "wings", "strong"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown muscle 'wings'"));

    assert!(!std::path::Path::new(&state_path).exists());
}

#[test]
fn test_set_bad_level_exits_3() {
    let (_temp_dir, config_path, _state_path) = setup_test_env();

    muscle_state(&config_path)
        .args(["set", "neck", "mighty"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown strength level 'mighty'"));
}

#[test]
fn test_show_text_and_json() {
    let (_temp_dir, config_path, _state_path) = setup_test_env();

    muscle_state(&config_path).args(["set", "calves", "strong"]).assert().success();
    muscle_state(&config_path).args(["side", "back"]).assert().success();
    muscle_state(&config_path).args(["select", "calves"]).assert().success();

    muscle_state(&config_path)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("view side: back"))
        .stdout(predicate::str::contains("selected:  calves"))
        .stdout(predicate::str::contains("Calves"));

    let output = muscle_state(&config_path)
        .args(["show", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["muscleStates"]["calves"], "strong");
    assert_eq!(json["viewSide"], "back");
    assert_eq!(json["selectedMuscle"], "calves");
}

#[test]
fn test_clear_and_select_none() {
    let (_temp_dir, config_path, state_path) = setup_test_env();

    muscle_state(&config_path).args(["set", "neck", "weak"]).assert().success();
    muscle_state(&config_path).args(["select", "neck"]).assert().success();
    muscle_state(&config_path).args(["clear", "neck"]).assert().success();
    muscle_state(&config_path).args(["select", "--none"]).assert().success();

    let state = saved_state(&state_path);
    assert_eq!(state["state"]["muscleStates"], serde_json::json!({}));
    assert!(state["state"]["selectedMuscle"].is_null());
}

#[test]
fn test_export_import_round_trip() {
    let (temp_dir, config_path, _state_path) = setup_test_env();
    let export_path = temp_dir.path().join("export.json");

    muscle_state(&config_path).args(["set", "gluteus_medius", "very_weak"]).assert().success();
    muscle_state(&config_path).args(["set", "adductors", "very_strong"]).assert().success();
    muscle_state(&config_path)
        .args(["export", "--output", export_path.to_str().unwrap()])
        .assert()
        .success();

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(document["muscleStates"]["adductors"], "very_strong");
    assert!(document["exportDate"].as_str().unwrap().ends_with('Z'));

    muscle_state(&config_path).arg("reset").assert().success();
    muscle_state(&config_path)
        .args(["import", export_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 muscle states"));

    muscle_state(&config_path)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("gluteus_medius"));
}

#[test]
fn test_import_from_stdin() {
    let (_temp_dir, config_path, state_path) = setup_test_env();

    muscle_state(&config_path)
        .args(["import", "-"])
        .write_stdin(r#"{"muscleStates": {"neck": "weak"}, "exportDate": "2025-03-01T09:30:00.000Z"}"#)
        .assert()
        .success();

    assert_eq!(saved_state(&state_path)["state"]["muscleStates"]["neck"], "weak");
}

#[test]
fn test_malformed_import_keeps_state() {
    let (_temp_dir, config_path, state_path) = setup_test_env();

    muscle_state(&config_path).args(["set", "neck", "weak"]).assert().success();
    let before = fs::read_to_string(&state_path).unwrap();

    muscle_state(&config_path)
        .args(["import", "-"])
        .write_stdin(r#"{"exportDate": "2025-03-01T09:30:00.000Z"}"#)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("muscleStates"));

    muscle_state(&config_path)
        .args(["import", "-"])
        .write_stdin("not json at all")
        .assert()
        .code(3);

    assert_eq!(fs::read_to_string(&state_path).unwrap(), before);
}

#[test]
fn test_reset_recovers_corrupt_state_file() {
    let (_temp_dir, config_path, state_path) = setup_test_env();
    fs::create_dir_all(std::path::Path::new(&state_path).parent().unwrap()).unwrap();
    fs::write(&state_path, "{ broken").unwrap();

    muscle_state(&config_path)
        .arg("show")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unreadable"));

    muscle_state(&config_path).arg("reset").assert().success();
    muscle_state(&config_path).arg("show").assert().success();
}

#[test]
fn test_state_file_env_override() {
    let (temp_dir, config_path, state_path) = setup_test_env();
    let override_path = temp_dir.path().join("elsewhere.json");

    Command::cargo_bin("muscle-state")
        .unwrap()
        .env("MUSCLEMAP_CONFIG", &config_path)
        .env("MUSCLEMAP_STATE_FILE", &override_path)
        .args(["set", "biceps", "strong"])
        .assert()
        .success();

    assert!(override_path.exists());
    assert!(!std::path::Path::new(&state_path).exists());
}

#[test]
fn test_invalid_side_exits_3() {
    let (_temp_dir, config_path, _state_path) = setup_test_env();

    muscle_state(&config_path)
        .args(["side", "left"])
        .assert()
        .code(3);
}
