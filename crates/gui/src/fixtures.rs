//! Test doubles and factory functions for configurations.
//!
//! Used by unit tests, the headless harness and integration tests.

use std::collections::HashMap;

use glam::Vec3;
use shared::*;

use crate::appearance::MaterialParams;
use crate::compose::{Environment, Renderer};
use crate::model::MeshHandle;
use crate::persistence::{KeyValueStorage, PersistError};
use crate::sound::SoundEffects;

// ── Renderer ────────────────────────────────────────────────────

/// Renderer that records what it was asked to draw
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub background: Option<Rgb>,
    pub environment: Option<Environment>,
    /// Number of environment replacements
    pub environment_swaps: usize,
    pub camera_resets: Vec<[f32; 3]>,
    /// Material currently attached to each mesh
    pub materials: HashMap<MeshHandle, MaterialParams>,
    /// Per-tick base color overrides, cleared when a material is re-attached
    pub base_colors: HashMap<MeshHandle, Vec3>,
}

impl RecordingRenderer {
    pub fn material(&self, mesh: MeshHandle) -> Option<&MaterialParams> {
        self.materials.get(&mesh)
    }
}

impl Renderer for RecordingRenderer {
    fn set_background(&mut self, color: Rgb) {
        self.background = Some(color);
    }

    fn replace_environment(&mut self, environment: &Environment) {
        self.environment = Some(environment.clone());
        self.environment_swaps += 1;
    }

    fn reset_camera(&mut self, position: [f32; 3]) {
        self.camera_resets.push(position);
    }

    fn attach(&mut self, mesh: MeshHandle, material: &MaterialParams) {
        self.materials.insert(mesh, *material);
        self.base_colors.remove(&mesh);
    }

    fn detach(&mut self, mesh: MeshHandle) {
        self.materials.remove(&mesh);
        self.base_colors.remove(&mesh);
    }

    fn set_base_color(&mut self, mesh: MeshHandle, color: Vec3) {
        self.base_colors.insert(mesh, color);
    }
}

// ── Sound ───────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSound {
    pub effects: Vec<String>,
    pub ambient: HashMap<String, bool>,
}

impl RecordingSound {
    pub fn is_ambient_playing(&self, name: &str) -> bool {
        self.ambient.get(name).copied().unwrap_or(false)
    }
}

impl SoundEffects for RecordingSound {
    fn play_effect(&mut self, name: &str) {
        self.effects.push(name.to_string());
    }

    fn set_ambient_loop(&mut self, name: &str, playing: bool) {
        self.ambient.insert(name.to_string(), playing);
    }
}

// ── Storage ─────────────────────────────────────────────────────

/// Storage whose every access fails
pub struct UnavailableStorage;

impl KeyValueStorage for UnavailableStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, PersistError> {
        Err(PersistError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), PersistError> {
        Err(PersistError::Unavailable)
    }
}

// ── Configuration factories ─────────────────────────────────────

/// Matte blue body on the racetrack
pub fn racetrack_matte() -> Configuration {
    Configuration {
        current_scene: SceneId::Racetrack,
        body_color: Rgb::from_u32(0x1e40af),
        body_material: BodyMaterial::Matte,
        ..Default::default()
    }
}

/// Both lamp pairs lit, tinted windows, in the garage
pub fn garage_night() -> Configuration {
    Configuration {
        current_scene: SceneId::Garage,
        front_lamps_on: true,
        front_lamps_intensity: 4.0,
        back_lamps_on: true,
        back_lamps_intensity: 0.2,
        window_tint: WindowTint::Tinted,
        window_transparency: 0.6,
        ..Default::default()
    }
}

/// Carbon spoiler with black trim
pub fn carbon_pack() -> Configuration {
    Configuration {
        spoiler_color: SpoilerColor::Carbon,
        metal_type: MetalType::Black,
        metal_roughness: 0.5,
        metal_metalness: 0.7,
        ..Default::default()
    }
}

/// Persisted JSON for a configuration
pub fn config_json(config: &Configuration) -> String {
    serde_json::to_string(config).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factories_are_valid() {
        for config in [racetrack_matte(), garage_night(), carbon_pack()] {
            assert!(config.validate().is_empty(), "{:?}", config);
            assert_ne!(config, Configuration::default());
        }
    }

    #[test]
    fn test_config_json_is_flat_object() {
        let value: serde_json::Value = serde_json::from_str(&config_json(&garage_night())).unwrap();
        assert_eq!(value["currentScene"], "garage");
        assert_eq!(value["frontLampsOn"], true);
    }

    #[test]
    fn test_unavailable_storage_fails() {
        let mut storage = UnavailableStorage;
        assert!(matches!(storage.get("k"), Err(PersistError::Unavailable)));
        assert!(matches!(storage.set("k", "v"), Err(PersistError::Unavailable)));
    }
}
