//! Main application module

mod keyboard;
mod menus;
mod styles;

use std::time::Instant;

use crossbeam_channel::Receiver;
use eframe::egui;

use crate::appearance::derive;
use crate::compose::SceneComposer;
use crate::i18n;
use crate::model::ProceduralCarModel;
use crate::sound::{ambient_wanted, SoundEffects, TracingSound, GARAGE_AMBIENT};
use crate::state::{AppState, ConfigChange};
use crate::ui::{config_panel, status_bar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct ConfiguratorApp {
    state: AppState,
    composer: SceneComposer,
    model: ProceduralCarModel,
    viewport: ViewportPanel,
    sound: TracingSound,
    changes: Receiver<ConfigChange>,
    /// Set until the first frame has composed the scene
    needs_compose: bool,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

impl ConfiguratorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_config: Option<serde_json::Value>) -> Self {
        let mut state = AppState::open();
        let changes = state.store.subscribe();

        // CLI argument takes priority over the stored configuration
        match initial_config {
            Some(value) => {
                if let Err(e) = state.store.import_json(&value) {
                    tracing::error!("Ignoring --config: {e}");
                    state.store.load();
                }
            }
            None => {
                state.store.load();
            }
        }

        i18n::set_lang(state.settings.ui.language);
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let model = ProceduralCarModel::coupe();
        let viewport = ViewportPanel::new(&model);
        let last_font_size = state.settings.ui.font_size;

        Self {
            state,
            composer: SceneComposer::new(),
            model,
            viewport,
            sound: TracingSound::default(),
            changes,
            needs_compose: true,
            last_font_size,
        }
    }

    /// Push store changes into the scene. The ambient loop is re-checked
    /// every frame since the audio setting lives outside the store.
    fn sync_scene(&mut self) {
        self.sound.set_ambient_loop(
            GARAGE_AMBIENT,
            ambient_wanted(self.state.store.get().current_scene, self.state.settings.audio.enabled),
        );

        let mut changed = std::mem::take(&mut self.needs_compose);
        while self.changes.try_recv().is_ok() {
            changed = true;
        }
        if !changed {
            return;
        }

        let config = self.state.store.get();
        let report = self.composer.compose(
            &derive(config),
            config.current_scene,
            &self.model,
            self.viewport.renderer_mut(),
        );
        if !report.missing.is_empty() {
            tracing::warn!("Model is missing parts: {:?}", report.missing);
        }
    }
}

impl eframe::App for ConfiguratorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport, &mut self.sound);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state, &mut self.sound);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::scene_menu(ui, &mut self.state, &mut self.sound);
            });
        });

        // ── Status bar ───────────────────────────────────────
        if self.state.panels.status_bar {
            egui::TopBottomPanel::bottom("status_bar")
                .exact_height(22.0)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
                )
                .show(ctx, |ui| {
                    status_bar::show(ui, &self.state);
                });
        }

        // ── Left panel: Configuration ────────────────────────
        if self.state.panels.config_panel {
            egui::SidePanel::left("config_panel")
                .default_width(290.0)
                .width_range(240.0..=420.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(8)),
                )
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .id_salt("config_scroll")
                        .show(ui, |ui| {
                            config_panel::show(ui, &mut self.state.store, &mut self.sound);
                        });
                });
        }

        self.sync_scene();
        let easing = self.composer.tick(self.viewport.renderer_mut());

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &self.state.settings.viewport);
            });

        self.state.store.tick(Instant::now());

        if easing || self.viewport.is_animating(&self.state.settings.viewport) {
            ctx.request_repaint();
        } else if self.state.store.has_pending_save() {
            ctx.request_repaint_after(crate::state::SAVE_DELAY);
        }
    }
}
