//! Audio playback and analysis configuration.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Frequency analyser configuration
///
/// Mirrors the usual analyser-node defaults: Blackman window, exponential
/// smoothing, and a decibel window mapped onto `0..=255`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyserConfig {
    /// Transform size in samples (power of 2, 32..=32768)
    pub fft_size: usize,

    /// Weight of the previous frame in the smoothed magnitude (0..=1)
    pub smoothing_time_constant: f32,

    /// Magnitude mapped to byte 0 (dB)
    pub min_decibels: f32,

    /// Magnitude mapped to byte 255 (dB)
    pub max_decibels: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 128,
            smoothing_time_constant: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

impl AnalyserConfig {
    /// Number of amplitude bins produced per refresh
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(ConfigError::FftSize(self.fft_size));
        }
        if !(0.0..=1.0).contains(&self.smoothing_time_constant) {
            return Err(ConfigError::Smoothing(self.smoothing_time_constant));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(ConfigError::DecibelRange {
                min: self.min_decibels,
                max: self.max_decibels,
            });
        }
        Ok(())
    }
}

/// Playback of the background clip
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// WAV file to load
    pub path: PathBuf,

    /// Linear gain applied to every sample (0..=1)
    pub volume: f32,

    /// Restart from the first frame after the last one
    pub looping: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Hermelinen.wav"),
            volume: 0.3,
            looping: true,
        }
    }
}

impl PlaybackConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ConfigError::Volume(self.volume));
        }
        Ok(())
    }
}
