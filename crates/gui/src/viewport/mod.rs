//! 3D viewport panel

mod camera;
mod painter;

use egui::Ui;
use glam::Vec3;

use crate::i18n::t;
use crate::model::ProceduralCarModel;
use crate::state::ViewportSettings;
use camera::ArcBallCamera;
use painter::PainterRenderer;

/// 3D viewport panel with orbit controls
pub struct ViewportPanel {
    camera: ArcBallCamera,
    /// Where the active scene puts the camera
    home: [f32; 3],
    renderer: PainterRenderer,
}

impl ViewportPanel {
    pub fn new(model: &ProceduralCarModel) -> Self {
        let camera = ArcBallCamera::default();
        let eye = camera.eye_position();
        Self {
            camera,
            home: [eye.x, eye.y, eye.z],
            renderer: PainterRenderer::new(model.mesh_table().clone()),
        }
    }

    /// Renderer the scene composer writes into
    pub fn renderer_mut(&mut self) -> &mut PainterRenderer {
        &mut self.renderer
    }

    pub fn reset_camera(&mut self) {
        self.camera = ArcBallCamera::from_position(self.home, Vec3::ZERO);
    }

    /// Whether the camera will move without input next frame
    pub fn is_animating(&self, settings: &ViewportSettings) -> bool {
        settings.auto_rotate && settings.auto_rotate_speed != 0.0
    }

    pub fn show(&mut self, ui: &mut Ui, settings: &ViewportSettings) {
        if let Some(position) = self.renderer.take_camera_reset() {
            self.home = position;
            self.reset_camera();
        }

        let (rect, response) = ui.allocate_exact_size(
            ui.available_size(),
            egui::Sense::click_and_drag(),
        );

        // ── Camera controls ─────────────────────────────────────
        let dragging = response.dragged();
        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            self.camera.rotate(-delta.x * 0.5, delta.y * 0.5);
        }
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            let delta = response.drag_delta();
            self.camera.pan(-delta.x * 0.01, delta.y * 0.01);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * 0.01);
            }
        }

        if settings.auto_rotate && !dragging {
            let dt = ui.input(|i| i.stable_dt).min(0.1);
            self.camera.auto_rotate(dt, settings.auto_rotate_speed);
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        let painter = ui.painter_at(rect);
        self.renderer.paint(&painter, rect, &self.camera);

        // ── Overlay ─────────────────────────────────────────────
        let button_rect = egui::Rect::from_min_size(
            egui::pos2(rect.left() + 12.0, rect.bottom() - 40.0),
            egui::vec2(150.0, 28.0),
        );
        if ui
            .put(button_rect, egui::Button::new(t("viewport.reset_camera")))
            .clicked()
        {
            self.reset_camera();
        }
    }
}
