//! Configuration panel: one section per part of the car.
//!
//! Widgets read from a snapshot of the configuration and collect
//! [`ControlAction`]s, which are applied once the panel is laid out.

use egui::Ui;
use shared::{BodyMaterial, ConfigField, MetalType, Rgb, SceneId, SpoilerColor, WindowTint};

use crate::controls::{apply_action, is_control_visible, slider_spec, ControlAction};
use crate::i18n::{scene_name, t};
use crate::sound::SoundEffects;
use crate::state::ConfigStore;

pub fn show(ui: &mut Ui, store: &mut ConfigStore, sound: &mut dyn SoundEffects) {
    let config = store.get().clone();
    let mut actions = Vec::new();

    ui.heading(t("panel.title"));
    ui.weak(t("panel.subtitle"));
    ui.add_space(4.0);
    if ui.button(t("panel.reset")).clicked() {
        actions.push(ControlAction::Reset);
    }
    ui.separator();

    section(ui, "section.scene", |ui| {
        ui.horizontal_wrapped(|ui| {
            for scene in SceneId::ALL {
                choice(ui, config.current_scene == scene, scene_name(scene), || {
                    ControlAction::SelectScene(scene)
                }, &mut actions);
            }
        });
    });

    section(ui, "section.body", |ui| {
        color_row(ui, "label.paint_color", config.body_color, ControlAction::SetBodyColor, &mut actions);
        ui.horizontal(|ui| {
            ui.label(t("label.material"));
            for (material, key) in [(BodyMaterial::Glossy, "mat.glossy"), (BodyMaterial::Matte, "mat.matte")] {
                choice(ui, config.body_material == material, t(key), || {
                    ControlAction::SetBodyMaterial(material)
                }, &mut actions);
            }
        });
    });

    section(ui, "section.wheels", |ui| {
        color_row(ui, "label.wheel_color", config.wheel_color, ControlAction::SetWheelColor, &mut actions);
    });

    section(ui, "section.front_lamps", |ui| {
        toggle(ui, config.front_lamps_on, ControlAction::ToggleFrontLamps, &mut actions);
        if is_control_visible(ConfigField::FrontLampsIntensity, &config) {
            slider_row(
                ui,
                "label.intensity",
                ConfigField::FrontLampsIntensity,
                config.front_lamps_intensity,
                ControlAction::SetFrontLampsIntensity,
                &mut actions,
            );
        }
        if is_control_visible(ConfigField::FrontLampsColor, &config) {
            color_row(ui, "label.light_color", config.front_lamps_color, ControlAction::SetFrontLampsColor, &mut actions);
        }
    });

    section(ui, "section.back_lamps", |ui| {
        toggle(ui, config.back_lamps_on, ControlAction::ToggleBackLamps, &mut actions);
        if is_control_visible(ConfigField::BackLampsIntensity, &config) {
            slider_row(
                ui,
                "label.intensity",
                ConfigField::BackLampsIntensity,
                config.back_lamps_intensity,
                ControlAction::SetBackLampsIntensity,
                &mut actions,
            );
        }
        if is_control_visible(ConfigField::BackLampsColor, &config) {
            color_row(ui, "label.light_color", config.back_lamps_color, ControlAction::SetBackLampsColor, &mut actions);
        }
    });

    section(ui, "section.windows", |ui| {
        slider_row(
            ui,
            "label.transparency",
            ConfigField::WindowTransparency,
            config.window_transparency,
            ControlAction::SetWindowTransparency,
            &mut actions,
        );
        ui.horizontal(|ui| {
            ui.label(t("label.tint"));
            for (tint, key) in [(WindowTint::Clear, "tint.clear"), (WindowTint::Tinted, "tint.tinted")] {
                choice(ui, config.window_tint == tint, t(key), || ControlAction::SetWindowTint(tint), &mut actions);
            }
        });
    });

    section(ui, "section.spoiler", |ui| {
        toggle_labeled(ui, "label.visible", config.spoiler_visible, ControlAction::ToggleSpoiler, &mut actions);
        if is_control_visible(ConfigField::SpoilerColor, &config) {
            ui.horizontal_wrapped(|ui| {
                ui.label(t("label.spoiler_color"));
                for (color, key) in [
                    (SpoilerColor::Body, "spoiler.body"),
                    (SpoilerColor::Carbon, "spoiler.carbon"),
                    (SpoilerColor::Black, "spoiler.black"),
                ] {
                    choice(ui, config.spoiler_color == color, t(key), || {
                        ControlAction::SetSpoilerColor(color)
                    }, &mut actions);
                }
            });
        }
    });

    section(ui, "section.metal", |ui| {
        ui.horizontal_wrapped(|ui| {
            ui.label(t("label.metal_type"));
            for (metal, key) in [
                (MetalType::Chrome, "metal.chrome"),
                (MetalType::Brushed, "metal.brushed"),
                (MetalType::Black, "metal.black"),
            ] {
                choice(ui, config.metal_type == metal, t(key), || ControlAction::SetMetalType(metal), &mut actions);
            }
        });
        slider_row(
            ui,
            "label.roughness",
            ConfigField::MetalRoughness,
            config.metal_roughness,
            ControlAction::SetMetalRoughness,
            &mut actions,
        );
        slider_row(
            ui,
            "label.metalness",
            ConfigField::MetalMetalness,
            config.metal_metalness,
            ControlAction::SetMetalMetalness,
            &mut actions,
        );
    });

    for action in actions {
        let rejected = apply_action(store, sound, action);
        for error in rejected {
            tracing::warn!("{action:?} rejected: {error}");
        }
    }
}

fn section(ui: &mut Ui, title_key: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::CollapsingHeader::new(t(title_key))
        .id_salt(title_key)
        .default_open(true)
        .show(ui, add_contents);
    ui.add_space(2.0);
}

/// Selectable button that emits `action` when picked
fn choice(
    ui: &mut Ui,
    selected: bool,
    label: &str,
    action: impl FnOnce() -> ControlAction,
    actions: &mut Vec<ControlAction>,
) {
    if ui.selectable_label(selected, label).clicked() {
        actions.push(action());
    }
}

fn toggle(ui: &mut Ui, on: bool, action: ControlAction, actions: &mut Vec<ControlAction>) {
    toggle_labeled(ui, "label.lights_on", on, action, actions);
}

fn toggle_labeled(
    ui: &mut Ui,
    label_key: &str,
    on: bool,
    action: ControlAction,
    actions: &mut Vec<ControlAction>,
) {
    let mut value = on;
    if ui.checkbox(&mut value, t(label_key)).changed() {
        actions.push(action);
    }
}

fn color_row(
    ui: &mut Ui,
    label_key: &str,
    color: Rgb,
    action: fn(Rgb) -> ControlAction,
    actions: &mut Vec<ControlAction>,
) {
    ui.horizontal(|ui| {
        ui.label(t(label_key));
        let mut rgb = color.to_array();
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            actions.push(action(Rgb::from_array(rgb)));
        }
        ui.monospace(color.to_hex());
    });
}

fn slider_row(
    ui: &mut Ui,
    label_key: &str,
    field: ConfigField,
    value: f32,
    action: fn(f32) -> ControlAction,
    actions: &mut Vec<ControlAction>,
) {
    let Some(spec) = slider_spec(field) else {
        return;
    };
    ui.horizontal(|ui| {
        ui.label(t(label_key));
        let mut v = value;
        let slider = egui::Slider::new(&mut v, spec.range.clone()).step_by(f64::from(spec.step));
        if ui.add(slider).changed() {
            actions.push(action(v));
        }
    });
}

