//! Parameter definitions with units and documented semantics.
//!
//! All startup defaults live here with:
//! - Units (seconds, Hz, dB, logical pixels, etc.)
//! - Documented ranges and meanings
//! - A `validate()` per struct

mod audio;
mod camera;
mod render;
mod water;

// Re-export all types
pub use audio::{AnalyserConfig, PlaybackConfig};
pub use camera::OrbitConfig;
pub use render::RenderConfig;
pub use water::{WaterParams, MAX_SMALL_WAVES_ITERATIONS};
