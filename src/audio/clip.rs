//! Decoded audio clips and background loading.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use crate::error::AudioError;

/// Interleaved PCM samples normalised to `-1.0..=1.0`
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl AudioClip {
    pub fn from_samples(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Self {
        Self {
            samples,
            channels: channels.max(1),
            sample_rate,
        }
    }

    /// Decode a WAV file (integer or float PCM)
    pub fn from_wav(path: &Path) -> Result<Self, AudioError> {
        let decode_err = |source| AudioError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let reader = hound::WavReader::open(path).map_err(decode_err)?;
        let spec = reader.spec();

        let samples = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(decode_err)?,
            hound::SampleFormat::Int => {
                let scale = 1.0 / (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(decode_err)?
            }
        };

        if samples.is_empty() {
            return Err(AudioError::Empty(path.to_path_buf()));
        }

        Ok(Self::from_samples(samples, spec.channels, spec.sample_rate))
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of sample frames (one sample per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration_s(&self) -> f32 {
        self.frames() as f32 / self.sample_rate as f32
    }

    /// Sample at `frame` for `channel`; channels beyond the clip's wrap around
    pub fn sample(&self, frame: usize, channel: usize) -> f32 {
        let channels = self.channels as usize;
        self.samples[frame * channels + channel % channels]
    }
}

/// Decode `path` on a background thread
///
/// The receiver yields exactly one result; polling it with `try_recv` keeps
/// the caller's loop non-blocking while the file loads.
pub fn load_in_background(path: PathBuf) -> Receiver<Result<AudioClip, AudioError>> {
    let (tx, rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("audio-loader".into())
        .spawn(move || {
            let result = AudioClip::from_wav(&path);
            // Receiver gone means nobody is waiting for the clip any more
            let _ = tx.send(result);
        });
    if let Err(e) = spawned {
        log::warn!("Failed to spawn audio loader thread: {}", e);
    }
    rx
}
