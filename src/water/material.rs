//! Water material: the shader uniform values and the audio amplitude texture.

use crate::color::Color;
use crate::params::{WaterParams, MAX_SMALL_WAVES_ITERATIONS};

/// One-row amplitude texture backed by a byte per frequency bin
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTexture {
    data: Vec<u8>,
    needs_update: bool,
}

impl AudioTexture {
    pub fn new(bins: usize) -> Self {
        Self {
            data: vec![0; bins],
            // Upload the initial (silent) contents on the first frame
            needs_update: true,
        }
    }

    /// Texture width in texels
    pub fn width(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Copy fresh amplitudes in and mark the texture dirty
    ///
    /// The texture width is fixed; extra bins are dropped and missing ones
    /// read as silence.
    pub fn update(&mut self, amplitudes: &[u8]) {
        let n = amplitudes.len().min(self.data.len());
        self.data[..n].copy_from_slice(&amplitudes[..n]);
        self.data[n..].fill(0);
        self.needs_update = true;
    }

    /// Hand the contents to the uploader once per dirty marking
    pub fn take_update(&mut self) -> Option<&[u8]> {
        if self.needs_update {
            self.needs_update = false;
            Some(&self.data)
        } else {
            None
        }
    }
}

/// Uniform state of the water shader
///
/// Created once from `WaterParams`; afterwards only mutated through the
/// setters below (the debug panel holds them as callbacks).
#[derive(Debug, Clone, PartialEq)]
pub struct WaterMaterial {
    params: WaterParams,
    time: f32,
    audio: AudioTexture,
}

impl WaterMaterial {
    pub fn new(params: WaterParams, audio_bins: usize) -> Self {
        Self {
            params,
            time: 0.0,
            audio: AudioTexture::new(audio_bins),
        }
    }

    pub fn params(&self) -> &WaterParams {
        &self.params
    }

    /// Elapsed seconds fed to the wave functions
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn audio(&self) -> &AudioTexture {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioTexture {
        &mut self.audio
    }

    pub fn set_time(&mut self, time_s: f32) {
        self.time = time_s;
    }

    // === Big waves ===

    pub fn set_big_waves_elevation(&mut self, value: f32) {
        self.params.big_waves_elevation = value;
    }

    pub fn set_big_waves_frequency_x(&mut self, value: f32) {
        self.params.big_waves_frequency[0] = value;
    }

    pub fn set_big_waves_frequency_y(&mut self, value: f32) {
        self.params.big_waves_frequency[1] = value;
    }

    pub fn set_big_waves_speed(&mut self, value: f32) {
        self.params.big_waves_speed = value;
    }

    // === Small waves ===

    pub fn set_small_waves_elevation(&mut self, value: f32) {
        self.params.small_waves_elevation = value;
    }

    pub fn set_small_waves_frequency(&mut self, value: f32) {
        self.params.small_waves_frequency = value;
    }

    pub fn set_small_waves_speed(&mut self, value: f32) {
        self.params.small_waves_speed = value;
    }

    /// Clamped to the shader's loop bound
    pub fn set_small_waves_iterations(&mut self, value: u32) {
        self.params.small_waves_iterations = value.min(MAX_SMALL_WAVES_ITERATIONS);
    }

    // === Color ===

    pub fn set_depth_color(&mut self, color: Color) {
        self.params.depth_color = color;
    }

    pub fn set_surface_color(&mut self, color: Color) {
        self.params.surface_color = color;
    }

    pub fn set_color_offset(&mut self, value: f32) {
        self.params.color_offset = value;
    }

    pub fn set_color_multiplier(&mut self, value: f32) {
        self.params.color_multiplier = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_material_uses_params() {
        let params = WaterParams::default();
        let material = WaterMaterial::new(params.clone(), 64);

        assert_eq!(material.params(), &params);
        assert_eq!(material.time(), 0.0);
        assert_eq!(material.audio().width(), 64);
    }

    #[test]
    fn test_iterations_setter_clamps() {
        let mut material = WaterMaterial::new(WaterParams::default(), 64);
        material.set_small_waves_iterations(42);
        assert_eq!(material.params().small_waves_iterations, 10);
    }

    #[test]
    fn test_audio_texture_dirty_cycle() {
        let mut texture = AudioTexture::new(4);
        assert_eq!(texture.take_update(), Some(&[0u8, 0, 0, 0][..]));
        assert_eq!(texture.take_update(), None);

        texture.update(&[9, 8, 7, 6, 5]);
        assert!(texture.needs_update());
        assert_eq!(texture.take_update(), Some(&[9u8, 8, 7, 6][..]));

        texture.update(&[1]);
        assert_eq!(texture.data(), &[1, 0, 0, 0]);
    }
}
