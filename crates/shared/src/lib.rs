//! Vehicle configuration schema shared by the configurator crates.
//!
//! The [`Configuration`] is a flat, always complete record. Changes arrive as a
//! [`ConfigPatch`] (typed, from UI controls) or as a loose JSON object (from
//! persistence or the command protocol); both are merged field by field and
//! every rejected field is reported as a [`FieldError`].

mod color;
pub mod presets;

use std::fmt;
use std::ops::RangeInclusive;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use color::{ColorParseError, Rgb};
pub use presets::{scene_preset, ScenePreset};

/// Valid range for lamp intensity sliders
pub const LAMP_INTENSITY_RANGE: RangeInclusive<f32> = 0.0..=5.0;
/// Valid range for window transparency and metal roughness/metalness
pub const UNIT_RANGE: RangeInclusive<f32> = 0.0..=1.0;

// ── Option enums ────────────────────────────────────────────

/// Environment preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneId {
    #[default]
    Default,
    Garage,
    Racetrack,
}

impl SceneId {
    pub const ALL: [SceneId; 3] = [SceneId::Default, SceneId::Garage, SceneId::Racetrack];

    pub fn key(&self) -> &'static str {
        match self {
            SceneId::Default => "default",
            SceneId::Garage => "garage",
            SceneId::Racetrack => "racetrack",
        }
    }
}

/// Body paint finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMaterial {
    Matte,
    #[default]
    Glossy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowTint {
    #[default]
    Clear,
    Tinted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpoilerColor {
    /// Follow the body paint
    #[default]
    Body,
    Carbon,
    Black,
}

/// Finish of chrome trim, grille and mirror caps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetalType {
    #[default]
    Chrome,
    Brushed,
    Black,
}

// ── Configuration ───────────────────────────────────────────

/// Complete vehicle configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub current_scene: SceneId,

    pub body_color: Rgb,
    pub body_material: BodyMaterial,

    pub wheel_color: Rgb,

    pub front_lamps_on: bool,
    pub front_lamps_intensity: f32,
    pub front_lamps_color: Rgb,
    pub back_lamps_on: bool,
    pub back_lamps_intensity: f32,
    pub back_lamps_color: Rgb,

    pub window_transparency: f32,
    pub window_tint: WindowTint,

    pub spoiler_visible: bool,
    pub spoiler_color: SpoilerColor,

    pub metal_type: MetalType,
    pub metal_roughness: f32,
    pub metal_metalness: f32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            current_scene: SceneId::Default,
            body_color: Rgb::from_u32(0xff0000),
            body_material: BodyMaterial::Glossy,
            wheel_color: Rgb::from_u32(0x2c2c2c),
            front_lamps_on: false,
            front_lamps_intensity: 2.0,
            front_lamps_color: Rgb::from_u32(0xffffff),
            back_lamps_on: false,
            back_lamps_intensity: 2.0,
            back_lamps_color: Rgb::from_u32(0xff0000),
            window_transparency: 0.3,
            window_tint: WindowTint::Clear,
            spoiler_visible: true,
            spoiler_color: SpoilerColor::Body,
            metal_type: MetalType::Chrome,
            metal_roughness: 0.2,
            metal_metalness: 1.0,
        }
    }
}

impl Configuration {
    /// Merge a typed patch. Fields that fail validation are left untouched and
    /// returned as errors; all other fields of the patch are applied.
    pub fn apply(&mut self, patch: &ConfigPatch) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if let Some(v) = patch.current_scene {
            self.current_scene = v;
        }
        if let Some(v) = patch.body_color {
            self.body_color = v;
        }
        if let Some(v) = patch.body_material {
            self.body_material = v;
        }
        if let Some(v) = patch.wheel_color {
            self.wheel_color = v;
        }
        if let Some(v) = patch.front_lamps_on {
            self.front_lamps_on = v;
        }
        if let Some(v) = patch.front_lamps_intensity {
            set_ranged(&mut self.front_lamps_intensity, ConfigField::FrontLampsIntensity, v, &mut errors);
        }
        if let Some(v) = patch.front_lamps_color {
            self.front_lamps_color = v;
        }
        if let Some(v) = patch.back_lamps_on {
            self.back_lamps_on = v;
        }
        if let Some(v) = patch.back_lamps_intensity {
            set_ranged(&mut self.back_lamps_intensity, ConfigField::BackLampsIntensity, v, &mut errors);
        }
        if let Some(v) = patch.back_lamps_color {
            self.back_lamps_color = v;
        }
        if let Some(v) = patch.window_transparency {
            set_ranged(&mut self.window_transparency, ConfigField::WindowTransparency, v, &mut errors);
        }
        if let Some(v) = patch.window_tint {
            self.window_tint = v;
        }
        if let Some(v) = patch.spoiler_visible {
            self.spoiler_visible = v;
        }
        if let Some(v) = patch.spoiler_color {
            self.spoiler_color = v;
        }
        if let Some(v) = patch.metal_type {
            self.metal_type = v;
        }
        if let Some(v) = patch.metal_roughness {
            set_ranged(&mut self.metal_roughness, ConfigField::MetalRoughness, v, &mut errors);
        }
        if let Some(v) = patch.metal_metalness {
            set_ranged(&mut self.metal_metalness, ConfigField::MetalMetalness, v, &mut errors);
        }

        errors
    }

    /// Fields whose value differs between `self` and `other`
    pub fn diff(&self, other: &Configuration) -> Vec<ConfigField> {
        ConfigField::ALL
            .iter()
            .copied()
            .filter(|field| field.value_of(self) != field.value_of(other))
            .collect()
    }

    /// Check every ranged field; an empty result means the value is valid
    pub fn validate(&self) -> Vec<FieldError> {
        let ranged = [
            (ConfigField::FrontLampsIntensity, self.front_lamps_intensity),
            (ConfigField::BackLampsIntensity, self.back_lamps_intensity),
            (ConfigField::WindowTransparency, self.window_transparency),
            (ConfigField::MetalRoughness, self.metal_roughness),
            (ConfigField::MetalMetalness, self.metal_metalness),
        ];
        let mut errors = Vec::new();
        for (field, value) in ranged {
            let mut probe = value;
            set_ranged(&mut probe, field, value, &mut errors);
        }
        errors
    }
}

fn set_ranged(slot: &mut f32, field: ConfigField, value: f32, errors: &mut Vec<FieldError>) {
    let range = field.range().unwrap_or(f32::MIN..=f32::MAX);
    if value.is_finite() && range.contains(&value) {
        *slot = value;
    } else {
        errors.push(FieldError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
}

// ── Field catalogue ─────────────────────────────────────────

/// One settable field of the [`Configuration`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    CurrentScene,
    BodyColor,
    BodyMaterial,
    WheelColor,
    FrontLampsOn,
    FrontLampsIntensity,
    FrontLampsColor,
    BackLampsOn,
    BackLampsIntensity,
    BackLampsColor,
    WindowTransparency,
    WindowTint,
    SpoilerVisible,
    SpoilerColor,
    MetalType,
    MetalRoughness,
    MetalMetalness,
}

impl ConfigField {
    pub const ALL: [ConfigField; 17] = [
        ConfigField::CurrentScene,
        ConfigField::BodyColor,
        ConfigField::BodyMaterial,
        ConfigField::WheelColor,
        ConfigField::FrontLampsOn,
        ConfigField::FrontLampsIntensity,
        ConfigField::FrontLampsColor,
        ConfigField::BackLampsOn,
        ConfigField::BackLampsIntensity,
        ConfigField::BackLampsColor,
        ConfigField::WindowTransparency,
        ConfigField::WindowTint,
        ConfigField::SpoilerVisible,
        ConfigField::SpoilerColor,
        ConfigField::MetalType,
        ConfigField::MetalRoughness,
        ConfigField::MetalMetalness,
    ];

    /// Persisted JSON key
    pub fn key(&self) -> &'static str {
        match self {
            ConfigField::CurrentScene => "currentScene",
            ConfigField::BodyColor => "bodyColor",
            ConfigField::BodyMaterial => "bodyMaterial",
            ConfigField::WheelColor => "wheelColor",
            ConfigField::FrontLampsOn => "frontLampsOn",
            ConfigField::FrontLampsIntensity => "frontLampsIntensity",
            ConfigField::FrontLampsColor => "frontLampsColor",
            ConfigField::BackLampsOn => "backLampsOn",
            ConfigField::BackLampsIntensity => "backLampsIntensity",
            ConfigField::BackLampsColor => "backLampsColor",
            ConfigField::WindowTransparency => "windowTransparency",
            ConfigField::WindowTint => "windowTint",
            ConfigField::SpoilerVisible => "spoilerVisible",
            ConfigField::SpoilerColor => "spoilerColor",
            ConfigField::MetalType => "metalType",
            ConfigField::MetalRoughness => "metalRoughness",
            ConfigField::MetalMetalness => "metalMetalness",
        }
    }

    pub fn from_key(key: &str) -> Option<ConfigField> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }

    /// Numeric range for continuous fields
    pub fn range(&self) -> Option<RangeInclusive<f32>> {
        match self {
            ConfigField::FrontLampsIntensity | ConfigField::BackLampsIntensity => {
                Some(LAMP_INTENSITY_RANGE)
            }
            ConfigField::WindowTransparency
            | ConfigField::MetalRoughness
            | ConfigField::MetalMetalness => Some(UNIT_RANGE),
            _ => None,
        }
    }

    /// Current value of this field as JSON
    pub fn value_of(&self, config: &Configuration) -> serde_json::Value {
        fn json<T: Serialize>(value: &T) -> serde_json::Value {
            serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
        }
        match self {
            ConfigField::CurrentScene => json(&config.current_scene),
            ConfigField::BodyColor => json(&config.body_color),
            ConfigField::BodyMaterial => json(&config.body_material),
            ConfigField::WheelColor => json(&config.wheel_color),
            ConfigField::FrontLampsOn => json(&config.front_lamps_on),
            ConfigField::FrontLampsIntensity => json(&config.front_lamps_intensity),
            ConfigField::FrontLampsColor => json(&config.front_lamps_color),
            ConfigField::BackLampsOn => json(&config.back_lamps_on),
            ConfigField::BackLampsIntensity => json(&config.back_lamps_intensity),
            ConfigField::BackLampsColor => json(&config.back_lamps_color),
            ConfigField::WindowTransparency => json(&config.window_transparency),
            ConfigField::WindowTint => json(&config.window_tint),
            ConfigField::SpoilerVisible => json(&config.spoiler_visible),
            ConfigField::SpoilerColor => json(&config.spoiler_color),
            ConfigField::MetalType => json(&config.metal_type),
            ConfigField::MetalRoughness => json(&config.metal_roughness),
            ConfigField::MetalMetalness => json(&config.metal_metalness),
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ── Partial updates ─────────────────────────────────────────

/// Partial configuration; `None` fields are left unchanged by [`Configuration::apply`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_scene: Option<SceneId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_material: Option<BodyMaterial>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wheel_color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_lamps_on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_lamps_intensity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_lamps_color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_lamps_on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_lamps_intensity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_lamps_color: Option<Rgb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_transparency: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_tint: Option<WindowTint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spoiler_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spoiler_color: Option<SpoilerColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metal_type: Option<MetalType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metal_roughness: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metal_metalness: Option<f32>,
}

impl ConfigPatch {
    /// Patch that sets every field to the value in `config`
    pub fn full(config: &Configuration) -> Self {
        Self {
            current_scene: Some(config.current_scene),
            body_color: Some(config.body_color),
            body_material: Some(config.body_material),
            wheel_color: Some(config.wheel_color),
            front_lamps_on: Some(config.front_lamps_on),
            front_lamps_intensity: Some(config.front_lamps_intensity),
            front_lamps_color: Some(config.front_lamps_color),
            back_lamps_on: Some(config.back_lamps_on),
            back_lamps_intensity: Some(config.back_lamps_intensity),
            back_lamps_color: Some(config.back_lamps_color),
            window_transparency: Some(config.window_transparency),
            window_tint: Some(config.window_tint),
            spoiler_visible: Some(config.spoiler_visible),
            spoiler_color: Some(config.spoiler_color),
            metal_type: Some(config.metal_type),
            metal_roughness: Some(config.metal_roughness),
            metal_metalness: Some(config.metal_metalness),
        }
    }

    /// Build a patch from a loose JSON object, one field at a time.
    ///
    /// Unknown keys and values of the wrong type are collected as errors
    /// instead of failing the whole object. Range checks happen later in
    /// [`Configuration::apply`].
    pub fn from_json(value: &serde_json::Value) -> Result<(ConfigPatch, Vec<FieldError>), FieldError> {
        let object = value.as_object().ok_or(FieldError::NotAnObject)?;
        let mut patch = ConfigPatch::default();
        let mut errors = Vec::new();

        for (key, raw) in object {
            let Some(field) = ConfigField::from_key(key) else {
                errors.push(FieldError::UnknownField(key.clone()));
                continue;
            };
            if let Err(err) = patch.set_from_json(field, raw) {
                errors.push(err);
            }
        }

        Ok((patch, errors))
    }

    fn set_from_json(&mut self, field: ConfigField, raw: &serde_json::Value) -> Result<(), FieldError> {
        match field {
            ConfigField::CurrentScene => self.current_scene = Some(parse_field(field, raw)?),
            ConfigField::BodyColor => self.body_color = Some(parse_field(field, raw)?),
            ConfigField::BodyMaterial => self.body_material = Some(parse_field(field, raw)?),
            ConfigField::WheelColor => self.wheel_color = Some(parse_field(field, raw)?),
            ConfigField::FrontLampsOn => self.front_lamps_on = Some(parse_field(field, raw)?),
            ConfigField::FrontLampsIntensity => {
                self.front_lamps_intensity = Some(parse_field(field, raw)?)
            }
            ConfigField::FrontLampsColor => self.front_lamps_color = Some(parse_field(field, raw)?),
            ConfigField::BackLampsOn => self.back_lamps_on = Some(parse_field(field, raw)?),
            ConfigField::BackLampsIntensity => {
                self.back_lamps_intensity = Some(parse_field(field, raw)?)
            }
            ConfigField::BackLampsColor => self.back_lamps_color = Some(parse_field(field, raw)?),
            ConfigField::WindowTransparency => {
                self.window_transparency = Some(parse_field(field, raw)?)
            }
            ConfigField::WindowTint => self.window_tint = Some(parse_field(field, raw)?),
            ConfigField::SpoilerVisible => self.spoiler_visible = Some(parse_field(field, raw)?),
            ConfigField::SpoilerColor => self.spoiler_color = Some(parse_field(field, raw)?),
            ConfigField::MetalType => self.metal_type = Some(parse_field(field, raw)?),
            ConfigField::MetalRoughness => self.metal_roughness = Some(parse_field(field, raw)?),
            ConfigField::MetalMetalness => self.metal_metalness = Some(parse_field(field, raw)?),
        }
        Ok(())
    }

    /// Fields present in this patch
    pub fn fields(&self) -> Vec<ConfigField> {
        let json = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        ConfigField::ALL
            .iter()
            .copied()
            .filter(|field| json.get(field.key()).is_some())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

fn parse_field<T: DeserializeOwned>(field: ConfigField, raw: &serde_json::Value) -> Result<T, FieldError> {
    serde_json::from_value(raw.clone()).map_err(|e| FieldError::InvalidValue {
        field,
        message: e.to_string(),
    })
}

// ── Errors ──────────────────────────────────────────────────

/// A single rejected field of a patch
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Key is not part of the schema
    UnknownField(String),
    /// Value has the wrong JSON type or an unknown enum/color literal
    InvalidValue { field: ConfigField, message: String },
    /// Numeric value outside the field's range (or not finite)
    OutOfRange {
        field: ConfigField,
        value: f32,
        min: f32,
        max: f32,
    },
    /// Payload is not a JSON object at all
    NotAnObject,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::UnknownField(key) => write!(f, "Unknown field '{}'", key),
            FieldError::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{}': {}", field, message)
            }
            FieldError::OutOfRange { field, value, min, max } => {
                write!(f, "Value {} for '{}' is outside {}..={}", value, field, min, max)
            }
            FieldError::NotAnObject => write!(f, "Expected a JSON object"),
        }
    }
}

impl std::error::Error for FieldError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(val: &T) {
        let json = serde_json::to_string(val).expect("serialize");
        let back: T = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*val, back);
    }

    // --- Defaults ---

    #[test]
    fn test_default_is_valid() {
        assert!(Configuration::default().validate().is_empty());
    }

    #[test]
    fn test_default_values() {
        let c = Configuration::default();
        assert_eq!(c.current_scene, SceneId::Default);
        assert_eq!(c.body_color.to_hex(), "#ff0000");
        assert_eq!(c.body_material, BodyMaterial::Glossy);
        assert_eq!(c.wheel_color.to_hex(), "#2c2c2c");
        assert!(!c.front_lamps_on);
        assert!(!c.back_lamps_on);
        assert_eq!(c.window_transparency, 0.3);
        assert!(c.spoiler_visible);
        assert_eq!(c.metal_metalness, 1.0);
    }

    // --- Serialization layout ---

    #[test]
    fn test_configuration_json_layout() {
        let value = serde_json::to_value(Configuration::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), ConfigField::ALL.len());
        for field in ConfigField::ALL {
            assert!(object.contains_key(field.key()), "missing {}", field.key());
        }
        assert_eq!(object["currentScene"], "default");
        assert_eq!(object["bodyMaterial"], "glossy");
        assert_eq!(object["bodyColor"], "#ff0000");
        assert_eq!(object["spoilerVisible"], true);
    }

    #[test]
    fn test_configuration_roundtrip() {
        let mut c = Configuration::default();
        c.current_scene = SceneId::Garage;
        c.metal_type = MetalType::Brushed;
        c.window_transparency = 0.75;
        roundtrip(&c);
    }

    #[test]
    fn test_enum_literals() {
        assert_eq!(serde_json::to_string(&SceneId::Racetrack).unwrap(), r#""racetrack""#);
        assert_eq!(serde_json::to_string(&WindowTint::Tinted).unwrap(), r#""tinted""#);
        assert_eq!(serde_json::to_string(&SpoilerColor::Carbon).unwrap(), r#""carbon""#);
        assert_eq!(serde_json::to_string(&MetalType::Black).unwrap(), r#""black""#);
        assert_eq!(serde_json::to_string(&BodyMaterial::Matte).unwrap(), r#""matte""#);
    }

    // --- Patches ---

    #[test]
    fn test_apply_replaces_only_patched_fields() {
        let before = Configuration::default();
        let mut after = before.clone();
        let patch = ConfigPatch {
            body_material: Some(BodyMaterial::Matte),
            wheel_color: Some(Rgb::from_u32(0x123456)),
            ..Default::default()
        };
        assert!(after.apply(&patch).is_empty());
        assert_eq!(after.body_material, BodyMaterial::Matte);
        assert_eq!(after.wheel_color, Rgb::from_u32(0x123456));
        assert_eq!(
            before.diff(&after),
            vec![ConfigField::BodyMaterial, ConfigField::WheelColor]
        );
    }

    #[test]
    fn test_apply_rejects_out_of_range_but_keeps_rest() {
        let mut c = Configuration::default();
        let patch = ConfigPatch {
            front_lamps_intensity: Some(7.5),
            window_transparency: Some(f32::NAN),
            spoiler_visible: Some(false),
            ..Default::default()
        };
        let errors = c.apply(&patch);
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            errors[0],
            FieldError::OutOfRange { field: ConfigField::FrontLampsIntensity, .. }
        ));
        assert_eq!(c.front_lamps_intensity, 2.0);
        assert_eq!(c.window_transparency, 0.3);
        assert!(!c.spoiler_visible);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let mut c = Configuration::default();
        let patch = ConfigPatch {
            back_lamps_intensity: Some(5.0),
            metal_roughness: Some(0.0),
            metal_metalness: Some(1.0),
            ..Default::default()
        };
        assert!(c.apply(&patch).is_empty());
        assert_eq!(c.back_lamps_intensity, 5.0);
    }

    #[test]
    fn test_patch_from_json_collects_field_errors() {
        let value = json!({
            "bodyColor": "#00ff00",
            "metalType": "gold",
            "frontLampsOn": "yes",
            "turbo": true,
            "backLampsIntensity": 1.5
        });
        let (patch, errors) = ConfigPatch::from_json(&value).unwrap();
        assert_eq!(patch.body_color, Some(Rgb::new(0, 255, 0)));
        assert_eq!(patch.back_lamps_intensity, Some(1.5));
        assert_eq!(patch.metal_type, None);
        assert_eq!(patch.front_lamps_on, None);
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&FieldError::UnknownField("turbo".to_string())));
    }

    #[test]
    fn test_patch_from_json_requires_object() {
        assert_eq!(ConfigPatch::from_json(&json!([1, 2])), Err(FieldError::NotAnObject));
        assert_eq!(ConfigPatch::from_json(&json!("x")), Err(FieldError::NotAnObject));
    }

    #[test]
    fn test_patch_serializes_sparse() {
        let patch = ConfigPatch {
            current_scene: Some(SceneId::Racetrack),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"currentScene":"racetrack"}"#);
        assert_eq!(patch.fields(), vec![ConfigField::CurrentScene]);
        assert!(ConfigPatch::default().is_empty());
    }

    #[test]
    fn test_full_patch_reproduces_configuration() {
        let mut source = Configuration::default();
        source.metal_type = MetalType::Black;
        source.back_lamps_on = true;
        let mut target = Configuration::default();
        assert!(target.apply(&ConfigPatch::full(&source)).is_empty());
        assert_eq!(target, source);
    }

    #[test]
    fn test_field_keys_roundtrip() {
        for field in ConfigField::ALL {
            assert_eq!(ConfigField::from_key(field.key()), Some(field));
        }
        assert_eq!(ConfigField::from_key("nope"), None);
    }
}
