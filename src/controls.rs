//! Damped orbit controls: drag to rotate, right-drag to pan, wheel to dolly.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::camera::PerspectiveCamera;
use crate::params::OrbitConfig;

const EPS: f32 = 1e-6;
/// Keeps the camera off the poles where the look-at basis degenerates
const MIN_POLAR: f32 = 1e-3;

/// Which drag gesture is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Pixels of smooth scrolling treated as one wheel notch
const PIXELS_PER_NOTCH: f32 = 50.0;

/// Pointer input relevant to the controls, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(DragMode),
    Up,
    Moved { x: f32, y: f32 },
    Wheel(f32),
    Left,
}

impl PointerEvent {
    /// Translate a window event; `None` for events the controls ignore
    pub fn from_window_event(event: &WindowEvent, scale_factor: f64) -> Option<Self> {
        match event {
            WindowEvent::MouseInput { state, button, .. } => match (state, button) {
                (ElementState::Pressed, MouseButton::Left) => Some(Self::Down(DragMode::Rotate)),
                (ElementState::Pressed, MouseButton::Right) => Some(Self::Down(DragMode::Pan)),
                (ElementState::Released, _) => Some(Self::Up),
                _ => None,
            },
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(scale_factor);
                Some(Self::Moved {
                    x: logical.x,
                    y: logical.y,
                })
            }
            WindowEvent::CursorLeft { .. } => Some(Self::Left),
            WindowEvent::MouseWheel { delta, .. } => Some(Self::Wheel(match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_NOTCH,
            })),
            _ => None,
        }
    }
}

/// Spherical coordinates of the camera offset from the target
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Spherical {
    radius: f32,
    /// Polar angle from +Y
    phi: f32,
    /// Azimuth around +Y, measured from +Z
    theta: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Orbit controls owning the camera they drive
pub struct OrbitControls {
    camera: PerspectiveCamera,
    config: OrbitConfig,
    /// Pending rotation, consumed gradually when damping is enabled
    spherical_delta: Spherical,
    pan_offset: Vec3,
    scale: f32,
    drag: Option<DragMode>,
    pointer: Option<(f32, f32)>,
    /// Logical height of the element receiving pointer input
    element_height: f32,
}

impl OrbitControls {
    pub fn new(camera: PerspectiveCamera, config: OrbitConfig, element_height: f32) -> Self {
        Self {
            camera,
            config,
            spherical_delta: Spherical::default(),
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            drag: None,
            pointer: None,
            element_height: element_height.max(1.0),
        }
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    pub fn set_element_height(&mut self, height: f32) {
        self.element_height = height.max(1.0);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // === Pointer input (logical pixels) ===

    pub fn pointer_down(&mut self, mode: DragMode) {
        self.drag = Some(mode);
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Forget the cursor so re-entering elsewhere does not jump
    pub fn pointer_leave(&mut self) {
        self.pointer = None;
    }

    /// Apply a pointer event; `consumed` events went to the panel
    ///
    /// Presses and wheel steps the panel took are dropped. Releases, moves
    /// and leaves always go through so a drag can neither stick nor jump.
    pub fn handle(&mut self, event: PointerEvent, consumed: bool) {
        match event {
            PointerEvent::Down(mode) if !consumed => self.pointer_down(mode),
            PointerEvent::Wheel(notches) if !consumed => self.wheel(notches),
            PointerEvent::Down(_) | PointerEvent::Wheel(_) => {}
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Moved { x, y } => self.pointer_move(x, y),
            PointerEvent::Left => self.pointer_leave(),
        }
    }

    /// Track the cursor; applies the drag gesture when a button is held
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let previous = self.pointer.replace((x, y));
        let (Some(mode), Some((px, py))) = (self.drag, previous) else {
            return;
        };
        let (dx, dy) = (x - px, y - py);
        match mode {
            DragMode::Rotate => {
                let scale = TAU * self.config.rotate_speed / self.element_height;
                self.rotate_left(dx * scale);
                self.rotate_up(dy * scale);
            }
            DragMode::Pan => self.pan(dx * self.config.pan_speed, dy * self.config.pan_speed),
        }
    }

    /// Wheel notches; positive scrolls away from the user and zooms in
    pub fn wheel(&mut self, notches: f32) {
        if notches == 0.0 {
            return;
        }
        let step = self.zoom_scale().powf(notches.abs());
        if notches > 0.0 {
            self.dolly_in(step);
        } else {
            self.dolly_out(step);
        }
    }

    // === Gestures ===

    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    pub fn dolly_in(&mut self, scale: f32) {
        self.scale *= scale;
    }

    pub fn dolly_out(&mut self, scale: f32) {
        self.scale /= scale;
    }

    /// Pan by a pointer delta, in screen-space
    fn pan(&mut self, dx: f32, dy: f32) {
        let offset = self.camera.position - self.camera.target;
        // Half the visible height at the target distance
        let target_distance = offset.length() * (self.camera.fov_degrees.to_radians() / 2.0).tan();
        let (right, up, _) = self.camera.basis();

        let left_distance = 2.0 * dx * target_distance / self.element_height;
        let up_distance = 2.0 * dy * target_distance / self.element_height;
        self.pan_offset += right * -left_distance + up * up_distance;
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.config.zoom_speed)
    }

    /// Apply pending input to the camera; returns whether the camera moved
    pub fn update(&mut self) -> bool {
        let previous_position = self.camera.position;
        let previous_target = self.camera.target;

        let offset = self.camera.position - self.camera.target;
        let mut spherical = Spherical::from_offset(offset);

        let damping = if self.config.enable_damping {
            self.config.damping_factor
        } else {
            1.0
        };

        spherical.theta += self.spherical_delta.theta * damping;
        spherical.phi += self.spherical_delta.phi * damping;
        spherical.phi = spherical.phi.clamp(MIN_POLAR, PI - MIN_POLAR);
        spherical.radius = (spherical.radius * self.scale)
            .clamp(self.config.min_distance, self.config.max_distance);

        self.camera.target += self.pan_offset * damping;
        self.camera.position = self.camera.target + spherical.to_offset();

        if self.config.enable_damping {
            let decay = 1.0 - self.config.damping_factor;
            self.spherical_delta.theta *= decay;
            self.spherical_delta.phi *= decay;
            self.pan_offset *= decay;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        previous_position.distance_squared(self.camera.position) > EPS
            || previous_target.distance_squared(self.camera.target) > EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RenderConfig;

    fn controls(config: OrbitConfig) -> OrbitControls {
        let camera = PerspectiveCamera::new(&RenderConfig::default(), &config);
        OrbitControls::new(camera, config, 720.0)
    }

    #[test]
    fn test_update_without_input_keeps_camera() {
        let mut controls = controls(OrbitConfig::default());
        let before = controls.camera().position;

        assert!(!controls.update());
        assert!(controls.camera().position.distance(before) < 1e-5);
    }

    #[test]
    fn test_spherical_round_trip() {
        let v = Vec3::new(1.0, 1.0, 1.0);
        let back = Spherical::from_offset(v).to_offset();
        assert!(back.distance(v) < 1e-5);
    }

    #[test]
    fn test_damped_rotation_converges() {
        let mut controls = controls(OrbitConfig::default());
        let radius = controls.camera().position.length();
        controls.rotate_left(0.5);

        let first = controls.camera().position;
        assert!(controls.update());
        let after_one = controls.camera().position;
        assert_ne!(first, after_one);

        for _ in 0..1000 {
            controls.update();
        }
        // Remaining delta decays to nothing
        assert!(!controls.update());
        // Orbit keeps the distance to the target
        assert!((controls.camera().position.length() - radius).abs() < 1e-4);
    }

    #[test]
    fn test_undamped_rotation_applies_fully() {
        let mut controls = controls(OrbitConfig {
            enable_damping: false,
            ..OrbitConfig::default()
        });
        let start = Spherical::from_offset(controls.camera().position);
        controls.rotate_left(0.25);
        controls.update();
        let end = Spherical::from_offset(controls.camera().position);

        assert!((end.theta - (start.theta - 0.25)).abs() < 1e-5);
    }

    #[test]
    fn test_polar_angle_stays_clamped() {
        let mut controls = controls(OrbitConfig {
            enable_damping: false,
            ..OrbitConfig::default()
        });
        controls.rotate_up(10.0);
        controls.update();
        let phi = Spherical::from_offset(controls.camera().position).phi;

        assert!(phi > 0.0);
        assert!(phi < PI);
        assert!(controls.camera().position.is_finite());
    }

    #[test]
    fn test_wheel_dolly() {
        let mut controls = controls(OrbitConfig::default());
        let radius = controls.camera().position.length();

        controls.wheel(1.0);
        controls.update();
        let closer = controls.camera().position.length();
        assert!((closer - radius * 0.95).abs() < 1e-5);

        controls.wheel(-1.0);
        controls.update();
        assert!((controls.camera().position.length() - radius).abs() < 1e-5);
    }

    #[test]
    fn test_distance_limits() {
        let mut controls = controls(OrbitConfig {
            min_distance: 1.5,
            max_distance: 2.0,
            ..OrbitConfig::default()
        });
        for _ in 0..50 {
            controls.wheel(1.0);
        }
        controls.update();
        assert!((controls.camera().position.length() - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_drag_rotates_only_while_pressed() {
        let mut controls = controls(OrbitConfig {
            enable_damping: false,
            ..OrbitConfig::default()
        });
        let start = controls.camera().position;

        controls.pointer_move(100.0, 100.0);
        controls.pointer_move(200.0, 100.0);
        controls.update();
        assert!(controls.camera().position.distance(start) < 1e-5);

        controls.pointer_down(DragMode::Rotate);
        controls.pointer_move(300.0, 100.0);
        controls.pointer_up();
        assert!(controls.update());
        assert!(!controls.is_dragging());
    }

    #[test]
    fn test_pan_moves_target() {
        let mut controls = controls(OrbitConfig {
            enable_damping: false,
            ..OrbitConfig::default()
        });
        controls.pointer_down(DragMode::Pan);
        controls.pointer_move(0.0, 0.0);
        controls.pointer_move(50.0, 0.0);
        controls.update();

        let target = controls.camera().target;
        assert!(target.length() > 0.0);
        // Camera keeps its offset from the target
        let offset = controls.camera().position - target;
        assert!((offset.length() - 3f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_consumed_press_and_wheel_are_dropped() {
        let mut controls = controls(OrbitConfig {
            enable_damping: false,
            ..OrbitConfig::default()
        });
        let start = controls.camera().position;

        controls.handle(PointerEvent::Down(DragMode::Rotate), true);
        assert!(!controls.is_dragging());
        controls.handle(PointerEvent::Moved { x: 0.0, y: 0.0 }, false);
        controls.handle(PointerEvent::Moved { x: 120.0, y: 0.0 }, false);
        controls.handle(PointerEvent::Wheel(3.0), true);

        assert!(!controls.update());
        assert!(controls.camera().position.distance(start) < 1e-5);
    }

    #[test]
    fn test_release_and_move_always_forwarded() {
        let mut controls = controls(OrbitConfig {
            enable_damping: false,
            ..OrbitConfig::default()
        });

        controls.handle(PointerEvent::Down(DragMode::Rotate), false);
        controls.handle(PointerEvent::Moved { x: 0.0, y: 0.0 }, true);
        controls.handle(PointerEvent::Moved { x: 80.0, y: 0.0 }, true);
        assert!(controls.update());

        // Releasing over the panel still ends the drag
        controls.handle(PointerEvent::Up, true);
        assert!(!controls.is_dragging());
    }

    #[test]
    fn test_wheel_not_consumed_dollies() {
        let mut controls = controls(OrbitConfig::default());
        let radius = controls.camera().position.length();

        controls.handle(PointerEvent::Wheel(1.0), false);
        controls.update();

        assert!(controls.camera().position.length() < radius);
    }

    #[test]
    fn test_leaving_window_forgets_cursor() {
        let mut controls = controls(OrbitConfig {
            enable_damping: false,
            ..OrbitConfig::default()
        });
        controls.handle(PointerEvent::Down(DragMode::Rotate), false);
        controls.handle(PointerEvent::Moved { x: 10.0, y: 10.0 }, false);
        controls.handle(PointerEvent::Left, false);
        let start = controls.camera().position;

        // First position after re-entering only re-anchors the drag
        controls.handle(PointerEvent::Moved { x: 600.0, y: 400.0 }, false);
        assert!(!controls.update());
        assert!(controls.camera().position.distance(start) < 1e-5);
    }
}
