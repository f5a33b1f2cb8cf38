//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::params::{PlaybackConfig, RenderConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "watersphere")]
#[command(about = "Audio-reactive water sphere with a live tuning panel", long_about = None)]
pub struct Args {
    /// WAV file played in a loop and fed to the analyser
    #[arg(long, value_name = "PATH", default_value = "Hermelinen.wav")]
    pub audio: PathBuf,

    /// Playback volume (0..1)
    #[arg(long, value_name = "GAIN", default_value_t = 0.3)]
    pub volume: f32,

    /// Initial window width (logical pixels)
    #[arg(long, value_name = "PX", default_value_t = 1280)]
    pub width: u32,

    /// Initial window height (logical pixels)
    #[arg(long, value_name = "PX", default_value_t = 720)]
    pub height: u32,

    /// Sphere segments in both directions
    #[arg(long, value_name = "N", default_value_t = 512)]
    pub segments: u32,

    /// Start with the debug panel hidden (toggle with H)
    #[arg(long)]
    pub hide_panel: bool,
}

impl Args {
    /// Render configuration with the window and mesh overrides applied
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            sphere_width_segments: self.segments,
            sphere_height_segments: self.segments,
            show_panel: !self.hide_panel,
            ..RenderConfig::default()
        }
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            path: self.audio.clone(),
            volume: self.volume,
            ..PlaybackConfig::default()
        }
    }
}
