//! Configuration → material/light parameters.
//!
//! [`derive`] is a pure function of the [`Configuration`]; the renderer only
//! ever sees the [`MaterialParams`] it produces.

mod smoothing;

pub use smoothing::{SmoothedColor, BODY_COLOR_SMOOTHING};

use serde::Serialize;
use shared::{BodyMaterial, Configuration, MetalType, Rgb, SpoilerColor, WindowTint};

use crate::model::ModelPart;

/// Lowest emissive intensity of a lit back lamp
pub const BACK_LAMP_MIN_INTENSITY: f32 = 0.5;

const TINTED_GLASS: Rgb = Rgb::from_u32(0x333333);
const CARBON: Rgb = Rgb::from_u32(0x1a1a1a);
const BRUSHED_METAL: Rgb = Rgb::from_u32(0xcccccc);
const BLACK_METAL: Rgb = Rgb::from_u32(0x1a1a1a);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Emission {
    pub color: Rgb,
    pub intensity: f32,
}

/// Physically based material record handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialParams {
    pub base_color: Rgb,
    pub roughness: f32,
    pub metalness: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive: Option<Emission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl MaterialParams {
    pub fn opaque(base_color: Rgb, roughness: f32, metalness: f32) -> Self {
        Self {
            base_color,
            roughness,
            metalness,
            emissive: None,
            transmission: None,
            opacity: None,
        }
    }

    /// Emissive intensity, 0 for non-emissive materials
    pub fn emissive_intensity(&self) -> f32 {
        self.emissive.map_or(0.0, |e| e.intensity)
    }
}

/// Materials for every model part
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedAppearance {
    pub body: MaterialParams,
    pub wheels: MaterialParams,
    pub windows: MaterialParams,
    pub metal: MaterialParams,
    pub front_lamps: MaterialParams,
    pub back_lamps: MaterialParams,
    /// `None` while the spoiler is hidden
    pub spoiler: Option<MaterialParams>,
}

impl DerivedAppearance {
    pub fn material_for(&self, part: ModelPart) -> Option<&MaterialParams> {
        match part {
            ModelPart::Body => Some(&self.body),
            ModelPart::Wheels => Some(&self.wheels),
            ModelPart::Windows => Some(&self.windows),
            ModelPart::MetalElements => Some(&self.metal),
            ModelPart::Spoiler => self.spoiler.as_ref(),
            ModelPart::FrontLamps => Some(&self.front_lamps),
            ModelPart::BackLamps => Some(&self.back_lamps),
        }
    }
}

pub fn derive(config: &Configuration) -> DerivedAppearance {
    let body = MaterialParams::opaque(
        config.body_color,
        match config.body_material {
            BodyMaterial::Matte => 0.9,
            BodyMaterial::Glossy => 0.2,
        },
        0.2,
    );

    let wheels = MaterialParams::opaque(config.wheel_color, 0.8, 0.1);

    let windows = MaterialParams {
        transmission: Some(config.window_transparency),
        opacity: Some(1.0 - config.window_transparency * 0.8),
        ..MaterialParams::opaque(
            match config.window_tint {
                WindowTint::Tinted => TINTED_GLASS,
                WindowTint::Clear => Rgb::WHITE,
            },
            0.1,
            0.0,
        )
    };

    let spoiler = config.spoiler_visible.then(|| match config.spoiler_color {
        SpoilerColor::Body => body,
        SpoilerColor::Carbon => MaterialParams::opaque(CARBON, 0.3, 0.5),
        SpoilerColor::Black => MaterialParams::opaque(Rgb::BLACK, 0.5, 0.3),
    });

    let metal = MaterialParams::opaque(
        match config.metal_type {
            MetalType::Chrome => Rgb::WHITE,
            MetalType::Brushed => BRUSHED_METAL,
            MetalType::Black => BLACK_METAL,
        },
        config.metal_roughness,
        config.metal_metalness,
    );

    let front_lamps = lamp(
        config.front_lamps_color,
        config.front_lamps_on,
        config.front_lamps_intensity,
    );
    // Lit back lamps never drop below the floor
    let back_lamps = lamp(
        config.back_lamps_color,
        config.back_lamps_on,
        config.back_lamps_intensity.max(BACK_LAMP_MIN_INTENSITY),
    );

    DerivedAppearance {
        body,
        wheels,
        windows,
        metal,
        front_lamps,
        back_lamps,
        spoiler,
    }
}

fn lamp(color: Rgb, on: bool, intensity: f32) -> MaterialParams {
    MaterialParams {
        emissive: Some(Emission {
            color,
            intensity: if on { intensity } else { 0.0 },
        }),
        ..MaterialParams::opaque(color, 1.0, 0.0)
    }
}
