//! Watersphere library - audio-reactive water sphere

pub mod animation;
pub mod audio;
pub mod camera;
pub mod cli;
pub mod color;
pub mod controls;
pub mod error;
pub mod overlay;
pub mod panel;
pub mod params;
pub mod rendering;
pub mod viewport;
pub mod water;
