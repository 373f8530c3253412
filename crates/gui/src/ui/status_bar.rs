use egui::Ui;
use shared::Configuration;

use crate::i18n::{scene_name, t};
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let config = state.store.get();
        ui.weak(format!("{}: {}", t("status.scene"), scene_name(config.current_scene)));

        ui.separator();

        let changed = Configuration::default().diff(config).len();
        if changed > 0 {
            ui.label(format!("{}: {changed}", t("status.changed")));
        } else {
            ui.weak(t("status.defaults"));
        }

        ui.separator();
        ui.weak(format!("{}: {}", t("status.version"), state.store.version()));

        if state.store.has_pending_save() {
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(255, 200, 100), "●");
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(concat!("Car Configurator v", env!("CARGO_PKG_VERSION")));
        });
    });
}
