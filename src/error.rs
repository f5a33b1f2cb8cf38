//! Error types for configuration, audio, rendering and the debug panel.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid parameter values detected by the `validate()` methods in `params`
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("FFT size must be a power of two between 32 and 32768, got {0}")]
    FftSize(usize),

    #[error("smoothing time constant must be within 0..=1, got {0}")]
    Smoothing(f32),

    #[error("decibel range is empty: min {min} dB >= max {max} dB")]
    DecibelRange { min: f32, max: f32 },

    #[error("volume must be within 0..=1, got {0}")]
    Volume(f32),

    #[error("sphere needs at least 3 width and 2 height segments, got {width}x{height}")]
    Segments { width: u32, height: u32 },

    #[error("small wave iterations must be at most {max}, got {got}")]
    Iterations { got: u32, max: u32 },

    #[error("window size must be non-zero, got {width}x{height}")]
    WindowSize { width: u32, height: u32 },
}

/// Failures while loading or playing the audio clip
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to decode audio clip {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("audio clip {0} contains no samples")]
    Empty(PathBuf),

    #[error("no audio output device found")]
    NoOutputDevice,

    #[error("failed to query audio output config: {0}")]
    OutputConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("unsupported output sample format {0}")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("audio loader thread exited before delivering the clip")]
    LoaderDisconnected,
}

/// GPU setup and per-frame rendering failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface has no supported formats")]
    NoSurfaceFormat,

    #[error("failed to acquire frame: {0}")]
    Frame(#[from] wgpu::SurfaceError),
}

/// Rejected debug panel edits
#[derive(Debug, Error, PartialEq)]
pub enum PanelError {
    #[error("no control named {0:?}")]
    UnknownControl(String),

    #[error("control {name:?} is a {actual}, not a {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}
