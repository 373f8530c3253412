//! Headless configurator: store, composer and model wired to recording
//! doubles, for tests and the JSON command protocol.

use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use shared::{ConfigPatch, Configuration, FieldError, SceneId};

use crate::appearance::{derive, DerivedAppearance};
use crate::compose::{CompositionReport, SceneComposer};
use crate::controls::{apply_action, ControlAction};
use crate::fixtures::{RecordingRenderer, RecordingSound};
use crate::model::ProceduralCarModel;
use crate::persistence::{KeyValueStorage, MemoryStorage, PersistError, Persistence};
use crate::sound::{ambient_wanted, SoundEffects, GARAGE_AMBIENT};
use crate::state::{ConfigChange, ConfigStore};

/// Headless test harness: one store, one composer, one model
pub struct ConfiguratorHarness {
    pub store: ConfigStore,
    pub composer: SceneComposer,
    pub model: ProceduralCarModel,
    pub renderer: RecordingRenderer,
    pub sound: RecordingSound,
    pub audio_enabled: bool,
    storage: MemoryStorage,
    changes: Receiver<ConfigChange>,
    last_report: Option<CompositionReport>,
    /// Simulated time offset applied to store ticks
    elapsed: Duration,
}

impl ConfiguratorHarness {
    /// Fresh harness on empty in-memory storage
    pub fn new() -> Self {
        Self::with_storage(MemoryStorage::new())
    }

    /// Harness that starts by loading whatever `storage` holds
    pub fn with_storage(storage: MemoryStorage) -> Self {
        Self::with_model(storage, ProceduralCarModel::coupe())
    }

    pub fn with_model(storage: MemoryStorage, model: ProceduralCarModel) -> Self {
        let store = ConfigStore::new(Persistence::new(Box::new(storage.clone())));
        Self::assemble(store, storage, model)
    }

    /// Harness whose store writes to `backend` instead of the shared memory storage
    pub fn with_backend(backend: Box<dyn KeyValueStorage>) -> Self {
        let store = ConfigStore::new(Persistence::new(backend));
        Self::assemble(store, MemoryStorage::new(), ProceduralCarModel::coupe())
    }

    fn assemble(mut store: ConfigStore, storage: MemoryStorage, model: ProceduralCarModel) -> Self {
        let changes = store.subscribe();
        store.load();
        let mut harness = Self {
            store,
            composer: SceneComposer::new(),
            model,
            renderer: RecordingRenderer::default(),
            sound: RecordingSound::default(),
            audio_enabled: true,
            storage,
            changes,
            last_report: None,
            elapsed: Duration::ZERO,
        };
        harness.sync();
        harness
    }

    // ── Configuration ─────────────────────────────────────────

    pub fn config(&self) -> &Configuration {
        self.store.get()
    }

    pub fn update(&mut self, patch: &ConfigPatch) -> Vec<FieldError> {
        let errors = self.store.update(patch);
        self.sync();
        errors
    }

    pub fn update_json(&mut self, value: &serde_json::Value) -> Result<Vec<FieldError>, FieldError> {
        let errors = self.store.update_json(value)?;
        self.sync();
        Ok(errors)
    }

    /// Simulate a user interaction
    pub fn apply(&mut self, action: ControlAction) -> Vec<FieldError> {
        let errors = apply_action(&mut self.store, &mut self.sound, action);
        self.sync();
        errors
    }

    pub fn reset(&mut self) {
        self.store.reset();
        self.sync();
    }

    pub fn select_scene(&mut self, scene: SceneId) {
        self.update(&ConfigPatch {
            current_scene: Some(scene),
            ..Default::default()
        });
    }

    pub fn import_json(&mut self, value: &serde_json::Value) -> Result<Vec<FieldError>, PersistError> {
        let errors = self.store.import_json(value)?;
        self.sync();
        Ok(errors)
    }

    /// Current configuration as pretty JSON
    pub fn export_json(&self) -> String {
        serde_json::to_string_pretty(self.store.get()).unwrap_or_default()
    }

    // ── Frames & persistence ──────────────────────────────────

    /// Advance one render tick of `dt`. Returns `true` while the body
    /// color is still easing.
    pub fn frame(&mut self, dt: Duration) -> bool {
        self.elapsed += dt;
        self.sync();
        let moving = self.composer.tick(&mut self.renderer);
        self.store.tick(Instant::now() + self.elapsed);
        moving
    }

    /// Run `count` frames at 60 fps
    pub fn frames(&mut self, count: u32) -> bool {
        let mut moving = false;
        for _ in 0..count {
            moving = self.frame(Duration::from_millis(16));
        }
        moving
    }

    /// Simulate an application restart against the same storage
    pub fn reload(&mut self) {
        self.store.flush();
        let model = std::mem::take(&mut self.model);
        *self = Self::with_model(self.storage.clone(), model);
    }

    /// Shared handle to the backing storage
    pub fn storage(&self) -> &MemoryStorage {
        &self.storage
    }

    // ── Derived state ─────────────────────────────────────────

    pub fn appearance(&self) -> DerivedAppearance {
        derive(self.store.get())
    }

    pub fn last_report(&self) -> Option<&CompositionReport> {
        self.last_report.as_ref()
    }

    /// Recompose if the store announced a change (always on first call)
    fn sync(&mut self) {
        self.sound.set_ambient_loop(
            GARAGE_AMBIENT,
            ambient_wanted(self.store.get().current_scene, self.audio_enabled),
        );

        let mut changed = self.last_report.is_none();
        while self.changes.try_recv().is_ok() {
            changed = true;
        }
        if !changed {
            return;
        }
        let config = self.store.get();
        let report = self.composer.compose(
            &derive(config),
            config.current_scene,
            &self.model,
            &mut self.renderer,
        );
        self.last_report = Some(report);
    }
}

impl Default for ConfiguratorHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelPart, ModelProvider};
    use crate::persistence::STORAGE_KEY;
    use shared::{BodyMaterial, Rgb};

    #[test]
    fn test_new_harness_composes_defaults() {
        let h = ConfiguratorHarness::new();
        let report = h.last_report().unwrap();
        assert!(report.scene_changed);
        assert_eq!(report.attached.len(), ModelPart::ALL.len());
        assert_eq!(h.renderer.background, Some(Rgb::from_u32(0x1a1a2e)));
    }

    #[test]
    fn test_update_recomposes() {
        let mut h = ConfiguratorHarness::new();
        h.update(&ConfigPatch {
            wheel_color: Some(Rgb::from_u32(0xabcdef)),
            ..Default::default()
        });
        let wheel = h.model.sub_object_meshes(ModelPart::Wheels)[0];
        assert_eq!(h.renderer.material(wheel).unwrap().base_color, Rgb::from_u32(0xabcdef));
    }

    #[test]
    fn test_frames_flush_debounced_save() {
        let mut h = ConfiguratorHarness::new();
        h.update(&ConfigPatch {
            body_material: Some(BodyMaterial::Matte),
            ..Default::default()
        });
        assert!(h.storage().raw(STORAGE_KEY).is_none());
        h.frames(10);
        assert!(h.storage().raw(STORAGE_KEY).unwrap().contains("matte"));
    }

    #[test]
    fn test_reload_restores_configuration() {
        let mut h = ConfiguratorHarness::new();
        h.select_scene(SceneId::Racetrack);
        h.reload();
        assert_eq!(h.config().current_scene, SceneId::Racetrack);
        assert_eq!(h.renderer.camera_resets, vec![[8.0, 3.0, 8.0]]);
    }
}
