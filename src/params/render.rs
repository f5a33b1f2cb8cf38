//! Window, projection and mesh configuration.

use crate::error::ConfigError;

/// Rendering configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Initial window width (logical pixels)
    pub window_width: u32,

    /// Initial window height (logical pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    /// 100° = wide enough to keep the whole sphere in view at distance √3
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Upper bound for the device pixel ratio used for the drawing buffer
    pub max_pixel_ratio: f64,

    /// Sphere radius (world units)
    pub sphere_radius: f32,

    /// Longitudinal segments of the sphere
    pub sphere_width_segments: u32,

    /// Latitudinal segments of the sphere
    pub sphere_height_segments: u32,

    /// Show the debug panel at startup
    pub show_panel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 100.0,
            near_plane: 0.1,
            far_plane: 100.0,
            max_pixel_ratio: 2.0,
            sphere_radius: 1.0,
            sphere_width_segments: 512,
            sphere_height_segments: 512,
            show_panel: true,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::WindowSize {
                width: self.window_width,
                height: self.window_height,
            });
        }
        if self.sphere_width_segments < 3 || self.sphere_height_segments < 2 {
            return Err(ConfigError::Segments {
                width: self.sphere_width_segments,
                height: self.sphere_height_segments,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_aspect_ratio() {
        let config = RenderConfig::default();
        assert!((config.aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_segment_validation() {
        let config = RenderConfig {
            sphere_width_segments: 2,
            ..RenderConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Segments {
                width: 2,
                height: 512
            })
        );
    }
}
