//! Audio system: background clip loading, playback, and frequency analysis.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::{Arc, Mutex};

use super::analyser::FrequencyAnalyser;
use super::clip::{load_in_background, AudioClip};
use super::playback::{Playback, SampleTap};
use super::FrequencySource;
use crate::error::{AudioError, ConfigError};
use crate::params::{AnalyserConfig, PlaybackConfig};

enum State {
    /// Clip still decoding on the loader thread
    Loading(Receiver<Result<AudioClip, AudioError>>),
    Playing(Playback),
    /// Load or playback failed; frequency data stays at zero
    Dormant,
}

/// Audio system owning playback and the analyser
///
/// Construction never blocks on the clip: it starts decoding in the
/// background and [`AudioSystem::poll`] picks the result up once ready.
pub struct AudioSystem {
    state: State,
    /// Most recent device samples, written by the output callback
    tap: Arc<Mutex<SampleTap>>,
    analyser: FrequencyAnalyser,
    playback_config: PlaybackConfig,
    scratch: Vec<f32>,
}

impl AudioSystem {
    /// Validate configuration and start loading the clip
    pub fn new(
        analyser_config: AnalyserConfig,
        playback_config: PlaybackConfig,
    ) -> Result<Self, ConfigError> {
        playback_config.validate()?;
        let tap = Arc::new(Mutex::new(SampleTap::new(analyser_config.fft_size)));
        let analyser = FrequencyAnalyser::new(analyser_config)?;

        log::info!("Loading audio clip {}", playback_config.path.display());
        let rx = load_in_background(playback_config.path.clone());

        Ok(Self {
            state: State::Loading(rx),
            tap,
            analyser,
            playback_config,
            scratch: Vec::new(),
        })
    }

    /// Start playback once the clip has finished loading
    pub fn poll(&mut self) {
        let State::Loading(rx) = &self.state else {
            return;
        };

        let loaded = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(AudioError::LoaderDisconnected),
        };

        self.state = match loaded.and_then(|clip| self.start(clip)) {
            Ok(playback) => State::Playing(playback),
            Err(e) => {
                log::warn!("Audio disabled: {}", e);
                State::Dormant
            }
        };
    }

    fn start(&self, clip: AudioClip) -> Result<Playback, AudioError> {
        log::info!(
            "Audio clip: {:.1}s, {} channel(s) @ {}Hz",
            clip.duration_s(),
            clip.channels(),
            clip.sample_rate()
        );
        let playback = Playback::start(
            Arc::new(clip),
            &self.playback_config,
            Arc::clone(&self.tap),
        )?;
        log::info!(
            "Audio: {} @ {}Hz",
            playback.device_name(),
            playback.sample_rate()
        );
        Ok(playback)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, State::Loading(_))
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, State::Playing(_))
    }
}

impl FrequencySource for AudioSystem {
    fn frequency_data(&mut self) -> &[u8] {
        self.poll();

        match self.tap.lock() {
            Ok(tap) => tap.snapshot_into(&mut self.scratch),
            Err(poisoned) => poisoned.into_inner().snapshot_into(&mut self.scratch),
        }
        self.analyser.analyse(&self.scratch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_clip() -> PlaybackConfig {
        PlaybackConfig {
            path: "/definitely/not/here.wav".into(),
            ..PlaybackConfig::default()
        }
    }

    #[test]
    fn test_rejects_bad_config() {
        let bad_fft = AnalyserConfig {
            fft_size: 100,
            ..AnalyserConfig::default()
        };
        assert_eq!(
            AudioSystem::new(bad_fft, missing_clip()).err(),
            Some(ConfigError::FftSize(100))
        );

        let loud = PlaybackConfig {
            volume: 2.0,
            ..missing_clip()
        };
        assert_eq!(
            AudioSystem::new(AnalyserConfig::default(), loud).err(),
            Some(ConfigError::Volume(2.0))
        );
    }

    #[test]
    fn test_missing_clip_goes_dormant_with_silent_data() {
        let mut audio = AudioSystem::new(AnalyserConfig::default(), missing_clip()).unwrap();

        // Loader thread finishes quickly; poll until it reports
        for _ in 0..500 {
            audio.poll();
            if !audio.is_loading() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        assert!(!audio.is_loading());
        assert!(!audio.is_playing());
        let data = audio.frequency_data();
        assert_eq!(data.len(), 64);
        assert!(data.iter().all(|&b| b == 0));
    }
}
