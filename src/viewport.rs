//! Window size tracking and drawing-buffer sizing.

use crate::camera::PerspectiveCamera;

/// Size of the offscreen scene target in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawingBuffer {
    pub width: u32,
    pub height: u32,
}

/// Logical window size plus the capped device pixel ratio
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    pixel_ratio: f64,
    max_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64, max_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio: device_pixel_ratio.min(max_pixel_ratio),
            max_pixel_ratio,
        }
    }

    /// Device pixel ratio after the cap
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn aspect(&self) -> f32 {
        (self.width / self.height) as f32
    }

    pub fn drawing_buffer(&self) -> DrawingBuffer {
        DrawingBuffer {
            width: ((self.width * self.pixel_ratio).floor() as u32).max(1),
            height: ((self.height * self.pixel_ratio).floor() as u32).max(1),
        }
    }

    /// Track a new logical size and update the camera aspect
    ///
    /// Returns `None` for a zero-sized (minimised) window, leaving both the
    /// viewport and the camera untouched.
    pub fn resize(
        &mut self,
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
        camera: &mut PerspectiveCamera,
    ) -> Option<DrawingBuffer> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        self.width = width;
        self.height = height;
        self.pixel_ratio = device_pixel_ratio.min(self.max_pixel_ratio);

        camera.set_aspect(self.aspect());
        Some(self.drawing_buffer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{OrbitConfig, RenderConfig};

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(&RenderConfig::default(), &OrbitConfig::default())
    }

    #[test]
    fn test_resize_updates_aspect_and_buffer() {
        let mut camera = camera();
        let mut viewport = Viewport::new(1280.0, 720.0, 1.0, 2.0);

        let buffer = viewport.resize(800.0, 400.0, 1.5, &mut camera).unwrap();

        assert_eq!(camera.aspect, 2.0);
        assert_eq!(viewport.pixel_ratio(), 1.5);
        assert_eq!(
            buffer,
            DrawingBuffer {
                width: 1200,
                height: 600
            }
        );
    }

    #[test]
    fn test_pixel_ratio_is_capped() {
        let mut camera = camera();
        let mut viewport = Viewport::new(1280.0, 720.0, 3.0, 2.0);
        assert_eq!(viewport.pixel_ratio(), 2.0);

        let buffer = viewport.resize(1000.0, 500.0, 4.0, &mut camera).unwrap();

        assert_eq!(viewport.pixel_ratio(), 2.0);
        assert_eq!(buffer.width, 2000);
        assert_eq!(buffer.height, 1000);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_zero_size_is_ignored() {
        let mut camera = camera();
        let mut viewport = Viewport::new(1280.0, 720.0, 1.0, 2.0);
        let aspect = camera.aspect;

        assert!(viewport.resize(0.0, 720.0, 1.0, &mut camera).is_none());
        assert_eq!(camera.aspect, aspect);
        assert_eq!(
            viewport.drawing_buffer(),
            DrawingBuffer {
                width: 1280,
                height: 720
            }
        );
    }
}
