//! Fixed environment presets, one per [`SceneId`].

use serde::Serialize;

use crate::{Rgb, SceneId};

/// Background, lighting and camera parameters of a scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenePreset {
    pub background_color: Rgb,
    pub ambient_light_intensity: f32,
    pub directional_light_intensity: f32,
    pub ground_color: Rgb,
    pub camera_position: [f32; 3],
}

const DEFAULT: ScenePreset = ScenePreset {
    background_color: Rgb::from_u32(0x1a1a2e),
    ambient_light_intensity: 0.5,
    directional_light_intensity: 1.0,
    ground_color: Rgb::from_u32(0x2a2a2a),
    camera_position: [5.0, 2.0, 5.0],
};

// The garage is lit by its own ceiling fixtures
const GARAGE: ScenePreset = ScenePreset {
    background_color: Rgb::from_u32(0x0f0f0f),
    ambient_light_intensity: 0.3,
    directional_light_intensity: 0.0,
    ground_color: Rgb::from_u32(0x3a3a3a),
    camera_position: [6.0, 3.0, 6.0],
};

const RACETRACK: ScenePreset = ScenePreset {
    background_color: Rgb::from_u32(0x87ceeb),
    ambient_light_intensity: 0.6,
    directional_light_intensity: 2.0,
    ground_color: Rgb::from_u32(0x2d5016),
    camera_position: [8.0, 3.0, 8.0],
};

/// Preset for `scene`. Total over [`SceneId`].
pub fn scene_preset(scene: SceneId) -> &'static ScenePreset {
    match scene {
        SceneId::Default => &DEFAULT,
        SceneId::Garage => &GARAGE,
        SceneId::Racetrack => &RACETRACK,
    }
}
