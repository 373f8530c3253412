//! Applies derived appearance to the model and keeps the renderer's scene in
//! step with the active preset.

mod environment;

pub use environment::{Environment, EnvironmentObject, Light, LightKind};

use glam::Vec3;
use serde::Serialize;
use shared::{scene_preset, Rgb, SceneId};

use crate::appearance::{DerivedAppearance, MaterialParams, SmoothedColor};
use crate::model::{MeshHandle, ModelPart, ModelProvider};

/// What the composer needs from a rendering backend
pub trait Renderer {
    fn set_background(&mut self, color: Rgb);
    /// Replace everything around the car (props and lights)
    fn replace_environment(&mut self, environment: &Environment);
    fn reset_camera(&mut self, position: [f32; 3]);
    fn attach(&mut self, mesh: MeshHandle, material: &MaterialParams);
    fn detach(&mut self, mesh: MeshHandle);
    /// Per-tick base color override, linear RGB in 0..=1
    fn set_base_color(&mut self, mesh: MeshHandle, color: Vec3);
}

/// Outcome of one [`SceneComposer::compose`] call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompositionReport {
    pub attached: Vec<ModelPart>,
    pub detached: Vec<ModelPart>,
    /// Parts the model provider has no node for
    pub missing: Vec<ModelPart>,
    pub scene_changed: bool,
}

#[derive(Default)]
pub struct SceneComposer {
    active_scene: Option<SceneId>,
    body_color: Option<SmoothedColor>,
    body_target: Rgb,
    body_meshes: Vec<MeshHandle>,
}

impl SceneComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_scene(&self) -> Option<SceneId> {
        self.active_scene
    }

    /// Color currently shown on the body, if anything was composed yet
    pub fn displayed_body_color(&self) -> Option<Rgb> {
        self.body_color.map(|c| c.current_rgb())
    }

    pub fn compose(
        &mut self,
        appearance: &DerivedAppearance,
        scene: SceneId,
        model: &dyn ModelProvider,
        renderer: &mut dyn Renderer,
    ) -> CompositionReport {
        let mut report = CompositionReport::default();

        if self.active_scene != Some(scene) {
            let preset = scene_preset(scene);
            renderer.set_background(preset.background_color);
            renderer.replace_environment(&Environment::for_scene(scene));
            renderer.reset_camera(preset.camera_position);
            tracing::info!("Switched to scene '{}'", scene.key());
            self.active_scene = Some(scene);
            report.scene_changed = true;
        }

        self.body_target = appearance.body.base_color;
        let smoothed = *self
            .body_color
            .get_or_insert_with(|| SmoothedColor::new(appearance.body.base_color));

        for part in ModelPart::ALL {
            let Some(node) = model.sub_object(part) else {
                tracing::debug!("Model has no sub-object for {:?}", part);
                report.missing.push(part);
                continue;
            };
            let meshes = node.meshes();

            match appearance.material_for(part) {
                Some(material) => {
                    let mut material = *material;
                    if part == ModelPart::Body {
                        material.base_color = smoothed.current_rgb();
                        self.body_meshes = meshes.clone();
                    }
                    for mesh in &meshes {
                        renderer.attach(*mesh, &material);
                    }
                    report.attached.push(part);
                }
                None => {
                    for mesh in &meshes {
                        renderer.detach(*mesh);
                    }
                    report.detached.push(part);
                }
            }
        }

        report
    }

    /// Advance body color smoothing by one frame. Returns `true` while the
    /// displayed color is still moving.
    pub fn tick(&mut self, renderer: &mut dyn Renderer) -> bool {
        let Some(color) = &mut self.body_color else {
            return false;
        };
        if color.is_settled(self.body_target) {
            return false;
        }
        let current = color.step(self.body_target);
        for mesh in &self.body_meshes {
            renderer.set_base_color(*mesh, current);
        }
        true
    }
}
