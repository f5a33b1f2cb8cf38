//! sRGB colors as used by the water shader and the debug panel.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Color with sRGB-encoded channels in `0.0..=1.0`
///
/// Values are passed to the shader as-is; the scene target is a non-sRGB
/// format so no conversion happens on write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseColorError {
    #[error("color must start with '#', got {0:?}")]
    MissingHash(String),

    #[error("color must have 6 hex digits, got {0:?}")]
    Length(String),

    #[error("invalid hex digits in color {0:?}")]
    Digits(String),
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0] as f32 / 255.0,
            g: rgb[1] as f32 / 255.0,
            b: rgb[2] as f32 / 255.0,
        }
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    /// Parse `#rrggbb`
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ParseColorError::MissingHash(hex.to_string()))?;
        if digits.len() != 6 {
            return Err(ParseColorError::Length(hex.to_string()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::Digits(hex.to_string()));
        }
        let value =
            u32::from_str_radix(digits, 16).map_err(|_| ParseColorError::Digits(hex.to_string()))?;
        Ok(Self::from_rgb8([
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ]))
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Padded to a vec4 for the uniform buffer
    pub fn to_vec4(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
