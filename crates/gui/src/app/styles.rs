//! Application style configuration

use eframe::egui;

/// Accent used for selected options and slider rails
const ACCENT: egui::Color32 = egui::Color32::from_rgb(74, 144, 226);

/// Configure initial application styles with given font size
pub fn configure_styles(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();

    // Dark theme
    style.visuals = egui::Visuals::dark();

    // Rounding
    style.visuals.window_corner_radius = egui::CornerRadius::same(8);
    style.visuals.menu_corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(4);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(4);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(4);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(4);

    // Spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 4.0);
    style.spacing.menu_margin = egui::Margin::same(4);
    style.spacing.slider_width = 160.0;

    // Translucent dark panels over the scene
    style.visuals.panel_fill = egui::Color32::from_rgb(22, 22, 30);
    style.visuals.window_fill = egui::Color32::from_rgb(28, 28, 38);

    style.visuals.selection.bg_fill = ACCENT;
    style.visuals.slider_trailing_fill = true;

    apply_text_styles(&mut style, font_size);

    ctx.set_style(style);
}

/// Apply font size to all text styles
pub fn apply_font_size(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();
    apply_text_styles(&mut style, font_size);
    ctx.set_style(style);
}

fn apply_text_styles(style: &mut egui::Style, font_size: f32) {
    let sizes = [
        (egui::TextStyle::Body, egui::FontId::proportional(font_size)),
        (egui::TextStyle::Button, egui::FontId::proportional(font_size)),
        (egui::TextStyle::Small, egui::FontId::proportional(font_size * 0.85)),
        (egui::TextStyle::Heading, egui::FontId::proportional(font_size * 1.5)),
        (egui::TextStyle::Monospace, egui::FontId::monospace(font_size)),
    ];
    style.text_styles.extend(sizes);
}
