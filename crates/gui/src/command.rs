//! JSON command protocol for driving the configurator headlessly.

use serde::{Deserialize, Serialize};
use shared::{scene_preset, SceneId};

use crate::harness::ConfiguratorHarness;

/// A command understood by [`execute_json`]
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ConfigCommand {
    /// Merge a partial configuration (camelCase keys)
    Update { patch: serde_json::Value },
    /// Restore the default configuration
    Reset,
    /// Switch the scene preset
    SelectScene { scene: SceneId },
    /// Report configuration, derived appearance and scene state
    Inspect,
    /// Export the configuration as JSON
    Export,
    /// Advance render ticks
    Frame {
        #[serde(default = "one")]
        count: u32,
    },
}

fn one() -> u32 {
    1
}

/// Upper bound on `frame.count` in a single command
pub const MAX_FRAMES_PER_COMMAND: u32 = 10_000;

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut ConfiguratorHarness, cmd: ConfigCommand) -> CommandResponse {
    match cmd {
        ConfigCommand::Update { patch } => match harness.update_json(&patch) {
            Ok(rejected) => {
                let rejected: Vec<String> = rejected.iter().map(ToString::to_string).collect();
                CommandResponse::ok_with_data(serde_json::json!({
                    "rejected": rejected,
                    "version": harness.store.version(),
                }))
            }
            Err(e) => CommandResponse::err(e.to_string()),
        },

        ConfigCommand::Reset => {
            harness.reset();
            CommandResponse::ok()
        }

        ConfigCommand::SelectScene { scene } => {
            harness.select_scene(scene);
            CommandResponse::ok_with_data(serde_json::json!({ "scene": scene }))
        }

        ConfigCommand::Inspect => {
            let config = harness.config();
            CommandResponse::ok_with_data(serde_json::json!({
                "config": config,
                "appearance": harness.appearance(),
                "preset": scene_preset(config.current_scene),
                "version": harness.store.version(),
                "composition": harness.last_report(),
            }))
        }

        ConfigCommand::Export => {
            CommandResponse::ok_with_data(serde_json::json!({ "config_json": harness.export_json() }))
        }

        ConfigCommand::Frame { count } if count > MAX_FRAMES_PER_COMMAND => CommandResponse::err(
            format!("Frame count {count} exceeds {MAX_FRAMES_PER_COMMAND}"),
        ),

        ConfigCommand::Frame { count } => {
            let animating = harness.frames(count);
            CommandResponse::ok_with_data(serde_json::json!({ "animating": animating }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut ConfiguratorHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: ConfigCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut ConfiguratorHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<ConfigCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_reset() {
        let cmd: ConfigCommand = serde_json::from_str(r#"{"command": "reset"}"#).unwrap();
        assert!(matches!(cmd, ConfigCommand::Reset));
    }

    #[test]
    fn test_command_serde_select_scene() {
        let cmd: ConfigCommand =
            serde_json::from_str(r#"{"command": "select_scene", "scene": "garage"}"#).unwrap();
        match cmd {
            ConfigCommand::SelectScene { scene } => assert_eq!(scene, SceneId::Garage),
            _ => panic!("Expected SelectScene"),
        }
    }

    #[test]
    fn test_command_serde_frame_default_count() {
        let cmd: ConfigCommand = serde_json::from_str(r#"{"command": "frame"}"#).unwrap();
        assert!(matches!(cmd, ConfigCommand::Frame { count: 1 }));
    }

    #[test]
    fn test_execute_update() {
        let mut h = ConfiguratorHarness::new();
        let resp = execute_json(
            &mut h,
            r##"{"command": "update", "patch": {"bodyColor": "#00ff00", "turbo": 1}}"##,
        )
        .unwrap();
        assert!(resp.success);
        let data = resp.data.unwrap();
        assert_eq!(data["rejected"].as_array().unwrap().len(), 1);
        assert_eq!(data["version"], 1);
        assert_eq!(h.config().body_color.to_hex(), "#00ff00");
    }

    #[test]
    fn test_execute_update_requires_object() {
        let mut h = ConfiguratorHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "update", "patch": [1]}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.is_some());
    }

    #[test]
    fn test_execute_inspect() {
        let mut h = ConfiguratorHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["config"]["currentScene"], "default");
        assert_eq!(data["appearance"]["body"]["roughness"], 0.2f32 as f64);
        assert_eq!(data["preset"]["backgroundColor"], "#1a1a2e");
        assert_eq!(data["composition"]["missing"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_execute_export() {
        let mut h = ConfiguratorHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "export"}"#).unwrap();
        let data = resp.data.unwrap();
        assert!(data["config_json"].as_str().unwrap().contains("\"metalType\": \"chrome\""));
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = ConfiguratorHarness::new();
        assert!(execute_json(&mut h, "not valid json").is_err());
        assert!(execute_json(&mut h, r#"{"command": "fly"}"#).is_err());
    }

    #[test]
    fn test_frame_count_is_capped() {
        let mut h = ConfiguratorHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "frame", "count": 4294967295}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("10000"));

        let resp = execute_json(&mut h, r#"{"command": "frame", "count": 10000}"#).unwrap();
        assert!(resp.success);
    }
}
