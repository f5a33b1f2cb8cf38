//! Wave and color parameters fed to the water shader.

use crate::color::Color;
use crate::error::ConfigError;

/// Upper bound of the small-wave octave loop in the shader
pub const MAX_SMALL_WAVES_ITERATIONS: u32 = 10;

/// Water surface parameters
#[derive(Debug, Clone, PartialEq)]
pub struct WaterParams {
    // === Big waves (one sine product over the surface) ===
    /// Displacement amplitude of the big waves (sphere radii)
    pub big_waves_elevation: f32,

    /// Spatial frequency along x and z (radians per unit)
    pub big_waves_frequency: [f32; 2],

    /// Propagation speed (radians per second)
    pub big_waves_speed: f32,

    // === Small waves (noise octaves subtracted from the big waves) ===
    /// Displacement amplitude of the first octave
    pub small_waves_elevation: f32,

    /// Spatial frequency of the first octave
    pub small_waves_frequency: f32,

    /// Noise time scale
    pub small_waves_speed: f32,

    /// Number of noise octaves, `0..=MAX_SMALL_WAVES_ITERATIONS`
    pub small_waves_iterations: u32,

    // === Color ===
    /// Tint of the troughs
    pub depth_color: Color,

    /// Tint of the crests
    pub surface_color: Color,

    /// Added to the elevation before scaling into a mix factor
    pub color_offset: f32,

    /// Scales `elevation + color_offset` into a mix factor
    pub color_multiplier: f32,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            big_waves_elevation: 0.083,
            big_waves_frequency: [0.37, 1.062],
            big_waves_speed: 0.149,

            small_waves_elevation: 0.137,
            small_waves_frequency: 11.041,
            small_waves_speed: 1.072,
            small_waves_iterations: 3,

            depth_color: Color::from_rgb8([0x66, 0x18, 0x91]),   // #661891
            surface_color: Color::from_rgb8([0xff, 0x9b, 0xa0]), // #ff9ba0
            color_offset: 0.122,
            color_multiplier: 5.605,
        }
    }
}

impl WaterParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_waves_iterations > MAX_SMALL_WAVES_ITERATIONS {
            return Err(ConfigError::Iterations {
                got: self.small_waves_iterations,
                max: MAX_SMALL_WAVES_ITERATIONS,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = WaterParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.depth_color.to_hex(), "#661891");
        assert_eq!(params.surface_color.to_hex(), "#ff9ba0");
    }

    #[test]
    fn test_iterations_bound() {
        let params = WaterParams {
            small_waves_iterations: 11,
            ..WaterParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::Iterations { got: 11, max: 10 })
        );
    }
}
