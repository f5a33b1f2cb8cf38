//! Audio playback and frequency analysis.
//!
//! Streams a looped clip to the default output device and turns the most
//! recent output samples into per-bin byte magnitudes for the water shader.

mod analyser;
mod clip;
mod playback;
mod system;

// Re-export public types
pub use analyser::{blackman_window, FrequencyAnalyser};
pub use clip::{load_in_background, AudioClip};
pub use playback::{LoopingVoice, Playback, SampleTap};
pub use system::AudioSystem;

/// Anything that can produce one frame of frequency magnitudes
pub trait FrequencySource {
    /// Refresh and return the magnitudes (`fft_size / 2` bytes, 0..=255)
    fn frequency_data(&mut self) -> &[u8];
}
