//! Orbit camera configuration.

/// Orbit controls around a fixed target
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitConfig {
    /// Initial camera position (world units)
    pub position: [f32; 3],

    /// Point the camera orbits and looks at (world units)
    pub target: [f32; 3],

    /// Smooth out rotation and panning over several frames
    pub enable_damping: bool,

    /// Fraction of the pending delta applied per update (0..1)
    pub damping_factor: f32,

    /// Rotation per screen height dragged (full turns)
    pub rotate_speed: f32,

    /// Exponent applied to the 0.95 per-notch zoom step
    pub zoom_speed: f32,

    /// Pan speed multiplier
    pub pan_speed: f32,

    /// Closest allowed distance to the target
    pub min_distance: f32,

    /// Farthest allowed distance to the target
    pub max_distance: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            position: [1.0, 1.0, 1.0],
            target: [0.0, 0.0, 0.0],
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
        }
    }
}
