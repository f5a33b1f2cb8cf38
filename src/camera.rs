//! Perspective camera looking at an orbit target.

use glam::{Mat4, Vec3};

use crate::params::{OrbitConfig, RenderConfig};

/// Perspective camera (right-handed, Y up)
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view (degrees)
    pub fov_degrees: f32,
    /// Width / height of the viewport
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    /// Create a camera from render and orbit configuration
    pub fn new(render_config: &RenderConfig, orbit_config: &OrbitConfig) -> Self {
        Self {
            fov_degrees: render_config.fov_degrees,
            aspect: render_config.aspect_ratio(),
            near: render_config.near_plane,
            far: render_config.far_plane,
            position: Vec3::from_array(orbit_config.position),
            target: Vec3::from_array(orbit_config.target),
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view(&self) -> Mat4 {
        // Always keep Y as up vector (camera never rolls)
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    /// Create view-projection matrix for rendering
    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Camera basis in world space as (right, up, forward)
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position).normalize_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward);
        (right, up, forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_placement() {
        let camera = PerspectiveCamera::new(&RenderConfig::default(), &OrbitConfig::default());
        assert_eq!(camera.position, Vec3::ONE);
        assert_eq!(camera.target, Vec3::ZERO);
        assert_eq!(camera.fov_degrees, 100.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 100.0);
    }

    #[test]
    fn test_view_proj_maps_target_to_screen_center() {
        let camera = PerspectiveCamera::new(&RenderConfig::default(), &OrbitConfig::default());
        let clip = camera.view_proj() * camera.target.extend(1.0);
        let ndc = clip / clip.w;

        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        // wgpu depth range
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = PerspectiveCamera::new(&RenderConfig::default(), &OrbitConfig::default());
        let (right, up, forward) = camera.basis();

        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!((up.length() - 1.0).abs() < 1e-5);
        assert!(right.dot(up).abs() < 1e-5);
        assert!(right.dot(forward).abs() < 1e-5);
        assert!(up.y > 0.0);
    }
}
