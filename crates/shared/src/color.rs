use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 8-bit sRGB color, serialized as a `#rrggbb` hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value
    pub const fn from_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Parse `#rrggbb` or `#rgb` (the leading `#` is optional, case-insensitive)
    pub fn from_hex(text: &str) -> Result<Self, ColorParseError> {
        let digits = text.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(text.to_string()));
        }
        match digits.len() {
            6 => {
                let value = u32::from_str_radix(digits, 16)
                    .map_err(|_| ColorParseError::InvalidDigit(text.to_string()))?;
                Ok(Self::from_u32(value))
            }
            3 => {
                let mut channels = [0u8; 3];
                for (channel, c) in channels.iter_mut().zip(digits.chars()) {
                    let nibble = c
                        .to_digit(16)
                        .ok_or_else(|| ColorParseError::InvalidDigit(text.to_string()))?
                        as u8;
                    *channel = nibble * 17;
                }
                Ok(Self::new(channels[0], channels[1], channels[2]))
            }
            len => Err(ColorParseError::InvalidLength(len)),
        }
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels normalized to 0.0..=1.0
    pub fn to_f32(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Inverse of [`Rgb::to_f32`], clamping and rounding each channel
    pub fn from_f32(rgb: [f32; 3]) -> Self {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(to_u8(rgb[0]), to_u8(rgb[1]), to_u8(rgb[2]))
    }

    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Rgb::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// Error when parsing a hex color string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    InvalidLength(usize),
    InvalidDigit(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::InvalidLength(len) => {
                write!(f, "expected 3 or 6 hex digits, got {}", len)
            }
            ColorParseError::InvalidDigit(text) => write!(f, "invalid hex color '{}'", text),
        }
    }
}

impl std::error::Error for ColorParseError {}
