//! Integration tests for the JSON command protocol.
//!
//! Tests the full command pipeline: JSON string -> parse -> execute -> response.

use configurator_lib::command::{execute_json, execute_json_batch};
use configurator_lib::harness::ConfiguratorHarness;
use configurator_lib::persistence::STORAGE_KEY;
use shared::{Rgb, SceneId};

#[test]
fn test_command_select_scene() {
    let mut h = ConfiguratorHarness::new();

    let resp = execute_json(&mut h, r#"{"command": "select_scene", "scene": "racetrack"}"#).unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.unwrap()["scene"], "racetrack");
    assert_eq!(h.config().current_scene, SceneId::Racetrack);
}

#[test]
fn test_command_rejects_unknown_scene() {
    let mut h = ConfiguratorHarness::new();
    assert!(execute_json(&mut h, r#"{"command": "select_scene", "scene": "moon"}"#).is_err());
    assert_eq!(h.config().current_scene, SceneId::Default);
}

#[test]
fn test_command_full_workflow_via_json_batch() {
    let mut h = ConfiguratorHarness::new();

    let json = r##"[
        {"command": "update", "patch": {"bodyColor": "#ffffff", "bodyMaterial": "matte"}},
        {"command": "update", "patch": {"backLampsOn": true, "backLampsIntensity": 0.1}},
        {"command": "select_scene", "scene": "garage"},
        {"command": "frame", "count": 30},
        {"command": "inspect"}
    ]"##;

    let responses = execute_json_batch(&mut h, json).unwrap();
    assert_eq!(responses.len(), 5);
    assert!(responses.iter().all(|r| r.success));

    let data = responses[4].data.as_ref().unwrap();
    assert_eq!(data["config"]["currentScene"], "garage");
    assert_eq!(data["appearance"]["body"]["roughness"], 0.9f32 as f64);
    assert_eq!(data["appearance"]["back_lamps"]["emissive"]["intensity"], 0.5);
    assert_eq!(data["version"], 3);
    assert_eq!(h.config().body_color, Rgb::WHITE);

    assert!(h.storage().raw(STORAGE_KEY).unwrap().contains("garage"));
}

#[test]
fn test_command_reset_then_export() {
    let mut h = ConfiguratorHarness::new();
    let json = r##"[
        {"command": "update", "patch": {"spoilerVisible": false}},
        {"command": "reset"},
        {"command": "export"}
    ]"##;

    let responses = execute_json_batch(&mut h, json).unwrap();
    let exported = responses[2].data.as_ref().unwrap()["config_json"].as_str().unwrap();
    let value: serde_json::Value = serde_json::from_str(exported).unwrap();
    assert_eq!(value["spoilerVisible"], true);
    assert_eq!(value["bodyColor"], "#ff0000");
}

#[test]
fn test_command_partial_failure_reports_rejections() {
    let mut h = ConfiguratorHarness::new();
    let resp = execute_json(
        &mut h,
        r#"{"command": "update", "patch": {"metalRoughness": -1, "metalType": "brushed"}}"#,
    )
    .unwrap();

    assert!(resp.success);
    let data = resp.data.unwrap();
    let rejected = data["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 1);
    assert!(rejected[0].as_str().unwrap().contains("metalRoughness"));
    assert_eq!(data["version"], 1);
}

#[test]
fn test_command_batch_invalid_json() {
    let mut h = ConfiguratorHarness::new();
    assert!(execute_json_batch(&mut h, r#"{"command": "reset"}"#).is_err());
    assert!(execute_json_batch(&mut h, "[").is_err());
}
