//! Keyboard shortcut handling

use eframe::egui;
use shared::SceneId;

use crate::controls::{apply_action, ControlAction};
use crate::sound::SoundEffects;
use crate::state::AppState;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(
    ctx: &egui::Context,
    state: &mut AppState,
    viewport: &mut ViewportPanel,
    sound: &mut dyn SoundEffects,
) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let mut actions = Vec::new();
    let mut toggle_fullscreen = false;
    ctx.input(|i| {
        // R: back to the scene's camera position
        if i.key_pressed(egui::Key::R) && !i.modifiers.command {
            viewport.reset_camera();
        }
        // Tab: show/hide the configuration panel
        if i.key_pressed(egui::Key::Tab) {
            state.panels.config_panel = !state.panels.config_panel;
        }
        if i.key_pressed(egui::Key::F11) {
            toggle_fullscreen = true;
        }
        // 1..3: scene presets
        for (key, scene) in [egui::Key::Num1, egui::Key::Num2, egui::Key::Num3]
            .into_iter()
            .zip(SceneId::ALL)
        {
            if i.key_pressed(key) {
                actions.push(ControlAction::SelectScene(scene));
            }
        }
    });

    if toggle_fullscreen {
        let fullscreen = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
    }
    for action in actions {
        apply_action(&mut state.store, sound, action);
    }
}
