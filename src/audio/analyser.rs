//! Frequency analysis: windowed FFT to smoothed byte magnitudes.

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::error::ConfigError;
use crate::params::AnalyserConfig;

/// Blackman window coefficient (alpha = 0.16)
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let alpha = 0.16;
    let a0 = 0.5 * (1.0 - alpha);
    let a1 = 0.5;
    let a2 = 0.5 * alpha;
    let x = index as f32 / size as f32;
    a0 - a1 * (2.0 * PI * x).cos() + a2 * (4.0 * PI * x).cos()
}

/// Analyser turning the latest `fft_size` samples into `fft_size / 2` bytes
pub struct FrequencyAnalyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    data: Vec<u8>,
}

impl FrequencyAnalyser {
    pub fn new(config: AnalyserConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let n = config.fft_size;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n);
        let window = (0..n).map(|i| blackman_window(i, n)).collect();
        let bins = config.frequency_bin_count();

        Ok(Self {
            config,
            fft,
            window,
            buffer: vec![Complex::new(0.0, 0.0); n],
            smoothed: vec![0.0; bins],
            data: vec![0; bins],
        })
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.data.len()
    }

    /// Last computed magnitudes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Analyse the most recent samples and return the byte magnitudes
    ///
    /// Uses the last `fft_size` entries of `samples`; shorter input is
    /// zero-padded at the front so it lines up with the newest sample.
    pub fn analyse(&mut self, samples: &[f32]) -> &[u8] {
        let n = self.config.fft_size;
        let recent = &samples[samples.len().saturating_sub(n)..];
        let pad = n - recent.len();

        // Apply window
        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        // Perform FFT
        self.fft.process(&mut self.buffer);

        let tau = self.config.smoothing_time_constant;
        let range_db = self.config.max_decibels - self.config.min_decibels;
        let scale = 1.0 / n as f32;

        for (k, byte) in self.data.iter_mut().enumerate() {
            let magnitude = self.buffer[k].norm() * scale;
            let mut smoothed = tau * self.smoothed[k] + (1.0 - tau) * magnitude;
            if !smoothed.is_finite() {
                smoothed = 0.0;
            }
            self.smoothed[k] = smoothed;

            // log10(0) is -inf and lands on byte 0 after the clamp
            let db = 20.0 * smoothed.log10();
            let scaled = 255.0 * (db - self.config.min_decibels) / range_db;
            *byte = scaled.clamp(0.0, 255.0) as u8;
        }

        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(bin: usize, n: usize, amplitude: f32) -> Vec<f32> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * bin as f32 * i as f32 / n as f32).sin())
            .collect()
    }

    #[test]
    fn test_blackman_window() {
        let size = 128;

        // Blackman window is ~0 at the edge, 1 at center
        assert!(blackman_window(0, size).abs() < 1e-6);
        assert!((blackman_window(size / 2, size) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_buffer_length_is_half_fft_size() {
        let mut analyser = FrequencyAnalyser::new(AnalyserConfig::default()).unwrap();
        assert_eq!(analyser.frequency_bin_count(), 64);
        assert_eq!(analyser.analyse(&[]).len(), 64);

        let wide = FrequencyAnalyser::new(AnalyserConfig {
            fft_size: 2048,
            ..AnalyserConfig::default()
        })
        .unwrap();
        assert_eq!(wide.data().len(), 1024);
    }

    #[test]
    fn test_silence_is_all_zero() {
        let mut analyser = FrequencyAnalyser::new(AnalyserConfig::default()).unwrap();
        let data = analyser.analyse(&[0.0; 128]);
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_tone_peaks_at_its_bin() {
        let mut analyser = FrequencyAnalyser::new(AnalyserConfig {
            smoothing_time_constant: 0.0,
            ..AnalyserConfig::default()
        })
        .unwrap();
        let data = analyser.analyse(&tone(10, 128, 0.05)).to_vec();

        let peak = data
            .iter()
            .enumerate()
            .max_by_key(|(_, &b)| b)
            .map(|(k, _)| k)
            .unwrap();
        assert_eq!(peak, 10);
        assert!(data[10] > 200);
        assert!(data[40] < data[10]);
    }

    #[test]
    fn test_smoothing_lags_behind_input() {
        let mut analyser = FrequencyAnalyser::new(AnalyserConfig::default()).unwrap();
        let signal = tone(5, 128, 0.05);

        let first = analyser.analyse(&signal)[5];
        let mut settled = first;
        for _ in 0..50 {
            settled = analyser.analyse(&signal)[5];
        }
        assert!(settled > first);

        // Decays back towards silence rather than dropping at once
        let after_silence = analyser.analyse(&[0.0; 128])[5];
        assert!(after_silence > 0);
        assert!(after_silence < settled);
    }

    #[test]
    fn test_only_latest_samples_are_used() {
        let config = AnalyserConfig {
            smoothing_time_constant: 0.0,
            ..AnalyserConfig::default()
        };
        let mut a = FrequencyAnalyser::new(config.clone()).unwrap();
        let mut b = FrequencyAnalyser::new(config).unwrap();

        let signal = tone(12, 128, 0.5);
        let mut padded = vec![0.9; 500];
        padded.extend_from_slice(&signal);

        assert_eq!(a.analyse(&signal), b.analyse(&padded));
    }
}
