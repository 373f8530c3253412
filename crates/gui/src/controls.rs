//! Control surface: every UI control maps to exactly one configuration field
//! and issues one update per interaction.

use std::ops::RangeInclusive;

use shared::{
    BodyMaterial, ConfigField, ConfigPatch, Configuration, FieldError, MetalType, Rgb, SceneId,
    SpoilerColor, WindowTint, LAMP_INTENSITY_RANGE, UNIT_RANGE,
};

use crate::sound::{SoundEffects, BUTTON_CLICK};
use crate::state::ConfigStore;

/// One user interaction with a configurator control
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    SelectScene(SceneId),
    SetBodyColor(Rgb),
    SetBodyMaterial(BodyMaterial),
    SetWheelColor(Rgb),
    ToggleFrontLamps,
    SetFrontLampsIntensity(f32),
    SetFrontLampsColor(Rgb),
    ToggleBackLamps,
    SetBackLampsIntensity(f32),
    SetBackLampsColor(Rgb),
    SetWindowTransparency(f32),
    SetWindowTint(WindowTint),
    ToggleSpoiler,
    SetSpoilerColor(SpoilerColor),
    SetMetalType(MetalType),
    SetMetalRoughness(f32),
    SetMetalMetalness(f32),
    Reset,
}

impl ControlAction {
    /// Field driven by this control; `None` for reset
    pub fn field(&self) -> Option<ConfigField> {
        Some(match self {
            ControlAction::SelectScene(_) => ConfigField::CurrentScene,
            ControlAction::SetBodyColor(_) => ConfigField::BodyColor,
            ControlAction::SetBodyMaterial(_) => ConfigField::BodyMaterial,
            ControlAction::SetWheelColor(_) => ConfigField::WheelColor,
            ControlAction::ToggleFrontLamps => ConfigField::FrontLampsOn,
            ControlAction::SetFrontLampsIntensity(_) => ConfigField::FrontLampsIntensity,
            ControlAction::SetFrontLampsColor(_) => ConfigField::FrontLampsColor,
            ControlAction::ToggleBackLamps => ConfigField::BackLampsOn,
            ControlAction::SetBackLampsIntensity(_) => ConfigField::BackLampsIntensity,
            ControlAction::SetBackLampsColor(_) => ConfigField::BackLampsColor,
            ControlAction::SetWindowTransparency(_) => ConfigField::WindowTransparency,
            ControlAction::SetWindowTint(_) => ConfigField::WindowTint,
            ControlAction::ToggleSpoiler => ConfigField::SpoilerVisible,
            ControlAction::SetSpoilerColor(_) => ConfigField::SpoilerColor,
            ControlAction::SetMetalType(_) => ConfigField::MetalType,
            ControlAction::SetMetalRoughness(_) => ConfigField::MetalRoughness,
            ControlAction::SetMetalMetalness(_) => ConfigField::MetalMetalness,
            ControlAction::Reset => return None,
        })
    }

    /// Buttons and toggles, as opposed to sliders and color pickers
    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            ControlAction::SelectScene(_)
                | ControlAction::SetBodyMaterial(_)
                | ControlAction::ToggleFrontLamps
                | ControlAction::ToggleBackLamps
                | ControlAction::SetWindowTint(_)
                | ControlAction::ToggleSpoiler
                | ControlAction::SetSpoilerColor(_)
                | ControlAction::SetMetalType(_)
                | ControlAction::Reset
        )
    }

    /// Single-field patch for this interaction. Toggles flip the current value.
    pub fn to_patch(&self, current: &Configuration) -> Option<ConfigPatch> {
        let mut patch = ConfigPatch::default();
        match *self {
            ControlAction::SelectScene(v) => patch.current_scene = Some(v),
            ControlAction::SetBodyColor(v) => patch.body_color = Some(v),
            ControlAction::SetBodyMaterial(v) => patch.body_material = Some(v),
            ControlAction::SetWheelColor(v) => patch.wheel_color = Some(v),
            ControlAction::ToggleFrontLamps => patch.front_lamps_on = Some(!current.front_lamps_on),
            ControlAction::SetFrontLampsIntensity(v) => patch.front_lamps_intensity = Some(v),
            ControlAction::SetFrontLampsColor(v) => patch.front_lamps_color = Some(v),
            ControlAction::ToggleBackLamps => patch.back_lamps_on = Some(!current.back_lamps_on),
            ControlAction::SetBackLampsIntensity(v) => patch.back_lamps_intensity = Some(v),
            ControlAction::SetBackLampsColor(v) => patch.back_lamps_color = Some(v),
            ControlAction::SetWindowTransparency(v) => patch.window_transparency = Some(v),
            ControlAction::SetWindowTint(v) => patch.window_tint = Some(v),
            ControlAction::ToggleSpoiler => patch.spoiler_visible = Some(!current.spoiler_visible),
            ControlAction::SetSpoilerColor(v) => patch.spoiler_color = Some(v),
            ControlAction::SetMetalType(v) => patch.metal_type = Some(v),
            ControlAction::SetMetalRoughness(v) => patch.metal_roughness = Some(v),
            ControlAction::SetMetalMetalness(v) => patch.metal_metalness = Some(v),
            ControlAction::Reset => return None,
        }
        Some(patch)
    }
}

/// Range and step of a slider control
#[derive(Debug, Clone, PartialEq)]
pub struct SliderSpec {
    pub field: ConfigField,
    pub range: RangeInclusive<f32>,
    pub step: f32,
}

pub fn slider_spec(field: ConfigField) -> Option<SliderSpec> {
    let (range, step) = match field {
        ConfigField::FrontLampsIntensity | ConfigField::BackLampsIntensity => (LAMP_INTENSITY_RANGE, 0.1),
        ConfigField::WindowTransparency | ConfigField::MetalRoughness | ConfigField::MetalMetalness => {
            (UNIT_RANGE, 0.01)
        }
        _ => return None,
    };
    Some(SliderSpec { field, range, step })
}

/// Whether the control for `field` is shown. Lamp details only appear while
/// the lamp is on, spoiler colors only while the spoiler is visible.
pub fn is_control_visible(field: ConfigField, config: &Configuration) -> bool {
    match field {
        ConfigField::FrontLampsIntensity | ConfigField::FrontLampsColor => config.front_lamps_on,
        ConfigField::BackLampsIntensity | ConfigField::BackLampsColor => config.back_lamps_on,
        ConfigField::SpoilerColor => config.spoiler_visible,
        _ => true,
    }
}

/// Run one control interaction against the store
pub fn apply_action(
    store: &mut ConfigStore,
    sound: &mut dyn SoundEffects,
    action: ControlAction,
) -> Vec<FieldError> {
    if action.is_discrete() {
        sound.play_effect(BUTTON_CLICK);
    }
    match action.to_patch(store.get()) {
        Some(patch) => store.update(&patch),
        None => {
            store.reset();
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_actions() -> Vec<ControlAction> {
        vec![
            ControlAction::SelectScene(SceneId::Garage),
            ControlAction::SetBodyColor(Rgb::WHITE),
            ControlAction::SetBodyMaterial(BodyMaterial::Matte),
            ControlAction::SetWheelColor(Rgb::WHITE),
            ControlAction::ToggleFrontLamps,
            ControlAction::SetFrontLampsIntensity(1.0),
            ControlAction::SetFrontLampsColor(Rgb::BLACK),
            ControlAction::ToggleBackLamps,
            ControlAction::SetBackLampsIntensity(1.0),
            ControlAction::SetBackLampsColor(Rgb::WHITE),
            ControlAction::SetWindowTransparency(0.9),
            ControlAction::SetWindowTint(WindowTint::Tinted),
            ControlAction::ToggleSpoiler,
            ControlAction::SetSpoilerColor(SpoilerColor::Black),
            ControlAction::SetMetalType(MetalType::Brushed),
            ControlAction::SetMetalRoughness(0.5),
            ControlAction::SetMetalMetalness(0.5),
        ]
    }

    #[test]
    fn test_each_control_patches_its_own_field() {
        let config = Configuration::default();
        for action in sample_actions() {
            let patch = action.to_patch(&config).unwrap();
            assert_eq!(patch.fields(), vec![action.field().unwrap()], "{:?}", action);
        }
    }

    #[test]
    fn test_every_field_has_a_control() {
        let covered: Vec<_> = sample_actions().iter().filter_map(|a| a.field()).collect();
        for field in ConfigField::ALL {
            assert!(covered.contains(&field), "no control for {}", field);
        }
    }

    #[test]
    fn test_toggle_flips_current_value() {
        let mut config = Configuration::default();
        let patch = ControlAction::ToggleSpoiler.to_patch(&config).unwrap();
        assert_eq!(patch.spoiler_visible, Some(false));
        config.spoiler_visible = false;
        let patch = ControlAction::ToggleSpoiler.to_patch(&config).unwrap();
        assert_eq!(patch.spoiler_visible, Some(true));
    }

    #[test]
    fn test_slider_specs() {
        let lamp = slider_spec(ConfigField::BackLampsIntensity).unwrap();
        assert_eq!(lamp.range, 0.0..=5.0);
        assert_eq!(lamp.step, 0.1);
        assert_eq!(slider_spec(ConfigField::MetalRoughness).unwrap().step, 0.01);
        assert!(slider_spec(ConfigField::BodyColor).is_none());
    }

    #[test]
    fn test_conditional_visibility() {
        let mut config = Configuration::default();
        assert!(!is_control_visible(ConfigField::FrontLampsIntensity, &config));
        assert!(is_control_visible(ConfigField::SpoilerColor, &config));
        config.front_lamps_on = true;
        config.spoiler_visible = false;
        assert!(is_control_visible(ConfigField::FrontLampsColor, &config));
        assert!(!is_control_visible(ConfigField::SpoilerColor, &config));
        assert!(is_control_visible(ConfigField::SpoilerVisible, &config));
    }
}
