//! Application menu bar

use eframe::egui;
use shared::SceneId;

use crate::controls::{apply_action, ControlAction};
use crate::i18n::{lang, scene_name, set_lang, t};
use crate::sound::SoundEffects;
use crate::state::{AppState, Language};
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState, sound: &mut dyn SoundEffects) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.import")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.import_title"))
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                match std::fs::read_to_string(&path) {
                    Ok(json) => match serde_json::from_str::<serde_json::Value>(&json) {
                        Ok(value) => match state.store.import_json(&value) {
                            Ok(rejected) => {
                                tracing::info!(
                                    "Imported configuration from {} ({} fields rejected)",
                                    path.display(),
                                    rejected.len()
                                );
                            }
                            Err(e) => tracing::error!("Failed to import configuration: {e}"),
                        },
                        Err(e) => tracing::error!("Failed to parse configuration: {e}"),
                    },
                    Err(e) => tracing::error!("Failed to read file: {e}"),
                }
            }
        }
        if ui.button(t("menu.export")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.export_title"))
                .add_filter("JSON", &["json"])
                .set_file_name("car-configuration.json")
                .save_file()
            {
                match serde_json::to_string_pretty(state.store.get()) {
                    Ok(json) => {
                        if let Err(e) = std::fs::write(&path, json) {
                            tracing::error!("Failed to write configuration: {e}");
                        } else {
                            tracing::info!("Exported configuration to {}", path.display());
                        }
                    }
                    Err(e) => tracing::error!("Failed to serialize configuration: {e}"),
                }
            }
        }
        ui.separator();
        if ui.button(t("menu.reset")).clicked() {
            apply_action(&mut state.store, sound, ControlAction::Reset);
            ui.close_menu();
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.config_panel, t("menu.config_panel"));
        ui.checkbox(&mut state.panels.status_bar, t("menu.status_bar"));
        if ui.button(t("menu.fullscreen")).clicked() {
            let fullscreen = ui.ctx().input(|i| i.viewport().fullscreen.unwrap_or(false));
            ui.ctx()
                .send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
            ui.close_menu();
        }
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        ui.separator();

        let mut settings_changed = false;
        let viewport_settings = &mut state.settings.viewport;
        settings_changed |= ui
            .checkbox(&mut viewport_settings.auto_rotate, t("menu.auto_rotate"))
            .changed();
        ui.add_enabled_ui(viewport_settings.auto_rotate, |ui| {
            ui.horizontal(|ui| {
                ui.label(t("menu.rotate_speed"));
                settings_changed |= ui
                    .add(egui::Slider::new(&mut viewport_settings.auto_rotate_speed, 0.1..=5.0))
                    .changed();
            });
        });
        settings_changed |= ui
            .checkbox(&mut state.settings.audio.enabled, t("menu.audio"))
            .changed();
        ui.horizontal(|ui| {
            ui.label(t("menu.font_size"));
            settings_changed |= ui
                .add(egui::Slider::new(&mut state.settings.ui.font_size, 10.0..=24.0).step_by(1.0))
                .changed();
        });
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            for &language in Language::all() {
                if ui
                    .selectable_label(lang() == language, language.display_name())
                    .clicked()
                {
                    set_lang(language);
                    state.settings.ui.language = language;
                    settings_changed = true;
                    ui.close_menu();
                }
            }
        });

        if settings_changed {
            state.settings.save();
        }
    });
}

/// Show the scene menu
pub fn scene_menu(ui: &mut egui::Ui, state: &mut AppState, sound: &mut dyn SoundEffects) {
    ui.menu_button(t("menu.scene"), |ui| {
        let current = state.store.get().current_scene;
        for (index, scene) in SceneId::ALL.into_iter().enumerate() {
            let label = format!("{}  {}", scene_name(scene), index + 1);
            if ui.selectable_label(current == scene, label).clicked() {
                apply_action(&mut state.store, sound, ControlAction::SelectScene(scene));
                ui.close_menu();
            }
        }
    });
}
