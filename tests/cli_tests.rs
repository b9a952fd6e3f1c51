// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! Tests run the `roswire` binary and check:
//! - Schema listing, display and validation
//! - Decoding hex and raw files to JSON
//! - Encoding JSON, including a full encode/decode cycle
//! - Reproducible random instances
//! - Decode limits loaded with `--config` or `ROSWIRE_*` variables

mod common;

use std::fs;
use std::process::{Command, Output};

use common::temp_path;
use roswire::message::RosMessage;
use roswire::msgs::geometry_msgs::Point;
use roswire::msgs::sensor_msgs::JointState;
use roswire::msgs::std_msgs::Header;
use roswire::Time;

fn roswire(args: &[&str]) -> Output {
    roswire_with_env(args, &[])
}

fn roswire_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_roswire"))
        .args(args)
        .env_remove("ROSWIRE_MAX_ARRAY_LENGTH")
        .env_remove("ROSWIRE_MAX_STRING_LENGTH")
        .env_remove("ROSWIRE_MAX_DEPTH")
        .envs(env.iter().copied())
        .output()
        .expect("failed to run roswire")
}

/// Run and return stdout, failing the test on a non-zero exit.
fn run_ok(args: &[&str]) -> String {
    let output = roswire(args);
    assert!(
        output.status.success(),
        "roswire {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

/// Run and return stderr, failing the test on success.
fn run_err(args: &[&str]) -> String {
    let output = roswire(args);
    assert!(!output.status.success(), "roswire {args:?} succeeded");
    String::from_utf8(output.stderr).unwrap()
}

fn sample_joint_state() -> JointState {
    JointState {
        header: Header::new(3, Time::new(12, 500), "base"),
        name: vec!["j1".into(), "j2".into(), "j3".into()],
        position: vec![0.1, 0.2, 0.3],
        velocity: vec![],
        effort: vec![],
    }
}

// ============================================================================
// Help and schema
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let out = run_ok(&["--help"]);
    for command in ["schema", "decode", "encode", "random"] {
        assert!(out.contains(command), "missing {command} in:\n{out}");
    }
}

#[test]
fn test_schema_list() {
    let out = run_ok(&["schema", "list"]);
    let names: Vec<&str> = out.lines().collect();
    assert!(names.contains(&"geometry_msgs/Pose"));
    assert!(names.contains(&"sensor_msgs/JointState"));
    assert!(names.contains(&"motion_msgs/PlanCartesianPathRequest"));

    let json: Vec<String> = serde_json::from_str(&run_ok(&["schema", "list", "--json"])).unwrap();
    assert_eq!(json.len(), names.len());
}

#[test]
fn test_schema_show() {
    let out = run_ok(&["schema", "show", "geometry_msgs/Point"]);
    assert_eq!(out, "float64 x\nfloat64 y\nfloat64 z\n");

    let out = run_ok(&["schema", "show", "PoseStamped", "--json"]);
    let info: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(info["type_name"], "geometry_msgs/PoseStamped");
    assert_eq!(info["fields"][0]["name"], "header");
    assert_eq!(info["fields"][0]["type"], "std_msgs/Header");
    assert_eq!(info["dependencies"].as_array().unwrap().len(), 4);
}

#[test]
fn test_schema_show_unknown_type() {
    let err = run_err(&["schema", "show", "nope_msgs/Missing"]);
    assert!(err.starts_with("Error:"), "{err}");
    assert!(err.contains("nope_msgs/Missing"), "{err}");
}

#[test]
fn test_schema_validate() {
    let (path, _guard) = temp_path("Reading.msg");
    fs::write(&path, "Header header\nfloat32[] samples\nstring unit\n").unwrap();
    let file = path.to_str().unwrap();

    let out = run_ok(&["schema", "validate", file, "--name", "demo_msgs/Reading"]);
    assert!(out.starts_with('✓'), "{out}");
    assert!(out.contains("demo_msgs/Reading"));
    assert!(out.contains("std_msgs/Header"));

    fs::write(&path, "Header header\nunknown_msgs/Thing thing\n").unwrap();
    let output = roswire(&["schema", "validate", file, "--json"]);
    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert!(report["error"].as_str().unwrap().contains("unknown_msgs/Thing"));
}

// ============================================================================
// Decode and encode
// ============================================================================

#[test]
fn test_decode_hex() {
    let bytes = Point::new(1.0, -2.5, 0.0).to_bytes();
    let out = run_ok(&["decode", "geometry_msgs/Point", "--hex", &hex::encode(bytes)]);

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["x"], 1.0);
    assert_eq!(value["y"], -2.5);
    assert_eq!(value["z"], 0.0);
}

#[test]
fn test_decode_compact_output() {
    let bytes = sample_joint_state().to_bytes();
    let out = run_ok(&["decode", "JointState", "--hex", &hex::encode(bytes), "--compact"]);
    assert_eq!(out.trim_end().lines().count(), 1);

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["name"], serde_json::json!(["j1", "j2", "j3"]));
    assert_eq!(value["header"]["frame_id"], "base");
    assert_eq!(value["header"]["stamp"]["nsecs"], 500);
}

#[test]
fn test_decode_truncated_input_fails() {
    let bytes = Point::new(1.0, 2.0, 3.0).to_bytes();
    let err = run_err(&["decode", "geometry_msgs/Point", "--hex", &hex::encode(&bytes[..20])]);
    assert!(err.starts_with("Error:"), "{err}");
}

#[test]
fn test_decode_with_schema_file() {
    let (path, _guard) = temp_path("Flag.msg");
    fs::write(&path, "bool on\nuint16 id\n").unwrap();

    let out = run_ok(&[
        "decode",
        "demo_msgs/Flag",
        "--schema",
        path.to_str().unwrap(),
        "--hex",
        "01 3412",
    ]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["on"], true);
    assert_eq!(value["id"], 0x1234);
}

#[test]
fn test_encode_matches_typed_bytes() {
    let (path, _guard) = temp_path("point.json");
    fs::write(&path, r#"{"x": 1.0, "y": -2.5, "z": 0.0}"#).unwrap();

    let out = run_ok(&["encode", "geometry_msgs/Point", "-i", path.to_str().unwrap()]);
    assert_eq!(out.trim(), hex::encode(Point::new(1.0, -2.5, 0.0).to_bytes()));
}

#[test]
fn test_encode_then_decode_file() {
    let (json_path, _json_guard) = temp_path("joints.json");
    let (bin_path, _bin_guard) = temp_path("joints.bin");
    fs::write(
        &json_path,
        r#"{"header": {"seq": 3, "stamp": {"secs": 12, "nsecs": 500}, "frame_id": "base"},
            "name": ["j1", "j2", "j3"],
            "position": [0.1, 0.2, 0.3]}"#,
    )
    .unwrap();

    let output = roswire(&[
        "encode",
        "sensor_msgs/JointState",
        "-i",
        json_path.to_str().unwrap(),
        "-o",
        bin_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let bytes = fs::read(&bin_path).unwrap();
    assert_eq!(bytes, sample_joint_state().to_bytes());

    let out = run_ok(&["decode", "sensor_msgs/JointState", "-i", bin_path.to_str().unwrap()]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["position"], serde_json::json!([0.1, 0.2, 0.3]));
    assert_eq!(value["velocity"], serde_json::json!([]));
}

#[test]
fn test_encode_rejects_wrong_json_type() {
    let (path, _guard) = temp_path("bad.json");
    fs::write(&path, r#"{"x": "one"}"#).unwrap();
    let err = run_err(&["encode", "geometry_msgs/Point", "-i", path.to_str().unwrap()]);
    assert!(err.contains('x'), "{err}");
}

// ============================================================================
// Random
// ============================================================================

#[test]
fn test_random_is_reproducible() {
    let a = run_ok(&["random", "sensor_msgs/JointState", "--seed", "7"]);
    let b = run_ok(&["random", "sensor_msgs/JointState", "--seed", "7"]);
    let c = run_ok(&["random", "sensor_msgs/JointState", "--seed", "8"]);
    assert_eq!(a, b);
    assert_ne!(a, c);

    let bytes = hex::decode(a.trim()).unwrap();
    assert!(JointState::from_bytes(&bytes).is_ok());
}

#[test]
fn test_random_json_and_schema_file() {
    let out = run_ok(&["random", "geometry_msgs/Twist", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(value["linear"]["x"].is_number());

    let (path, _guard) = temp_path("Blob.msg");
    fs::write(&path, "uint8[] data\nstring label\n").unwrap();
    let schema = path.to_str().unwrap();
    let a = run_ok(&["random", "demo_msgs/Blob", "-s", schema, "--seed", "3"]);
    let b = run_ok(&["random", "demo_msgs/Blob", "-s", schema, "--seed", "3"]);
    assert_eq!(a, b);
    assert!(hex::decode(a.trim()).unwrap().len() >= 8);
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_limits_apply_to_decode() {
    let hex_bytes = hex::encode(sample_joint_state().to_bytes());
    run_ok(&["decode", "JointState", "--hex", &hex_bytes]);

    let (config, _guard) = temp_path("roswire.toml");
    fs::write(&config, "[decode]\nmax_array_length = 2\n").unwrap();
    let err = run_err(&[
        "--config",
        config.to_str().unwrap(),
        "decode",
        "JointState",
        "--hex",
        &hex_bytes,
    ]);
    assert!(err.starts_with("Error:"), "{err}");
}

#[test]
fn test_invalid_config_is_reported() {
    let (config, _guard) = temp_path("roswire.toml");
    fs::write(&config, "[decode]\nmax_depth = 0\n").unwrap();
    let err = run_err(&["--config", config.to_str().unwrap(), "schema", "list"]);
    assert!(err.contains("max_depth"), "{err}");
}

#[test]
fn test_env_limits_apply_without_config() {
    let hex_bytes = hex::encode(sample_joint_state().to_bytes());
    let output = roswire_with_env(
        &["decode", "JointState", "--hex", &hex_bytes],
        &[("ROSWIRE_MAX_ARRAY_LENGTH", "2")],
    );
    assert!(!output.status.success());

    let output = roswire_with_env(&["schema", "list"], &[("ROSWIRE_MAX_DEPTH", "64")]);
    assert!(!output.status.success());
    let err = String::from_utf8(output.stderr).unwrap();
    assert!(err.contains("nesting ceiling"), "{err}");
}
