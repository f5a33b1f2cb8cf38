//! Looped clip playback through the default output device.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};

use super::clip::AudioClip;
use crate::error::AudioError;
use crate::params::PlaybackConfig;

/// Bounded history of the most recent mono samples sent to the device
#[derive(Debug)]
pub struct SampleTap {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl SampleTap {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Copy the history, oldest first, into `out`
    pub fn snapshot_into(&self, out: &mut Vec<f32>) {
        out.clear();
        out.extend(self.samples.iter().copied());
    }
}

/// Playback cursor over a clip, resampled to the device rate
pub struct LoopingVoice {
    clip: Arc<AudioClip>,
    /// Position in clip frames (fractional)
    position: f64,
    /// Clip frames advanced per device frame
    step: f64,
    volume: f32,
    looping: bool,
    finished: bool,
}

impl LoopingVoice {
    pub fn new(clip: Arc<AudioClip>, device_rate: u32, config: &PlaybackConfig) -> Self {
        let step = clip.sample_rate() as f64 / device_rate.max(1) as f64;
        Self {
            clip,
            position: 0.0,
            step,
            volume: config.volume,
            looping: config.looping,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Linear interpolation between neighbouring frames
    fn sample_at(&self, channel: usize) -> f32 {
        let frames = self.clip.frames();
        let index = self.position.floor() as usize;
        let frac = (self.position - index as f64) as f32;

        let a = self.clip.sample(index, channel);
        let next = if index + 1 < frames {
            Some(index + 1)
        } else if self.looping {
            Some(0)
        } else {
            None
        };
        let b = next.map_or(a, |i| self.clip.sample(i, channel));
        a + (b - a) * frac
    }

    /// Fill an interleaved device buffer and record its mono mix
    pub fn render(&mut self, out: &mut [f32], channels: usize, tap: &mut SampleTap) {
        let channels = channels.max(1);
        let frames = self.clip.frames() as f64;

        for frame in out.chunks_mut(channels) {
            if self.finished {
                frame.fill(0.0);
                tap.push(0.0);
                continue;
            }

            let mut mono = 0.0;
            for (c, slot) in frame.iter_mut().enumerate() {
                // Safety limiter: hard clip to ±1.0
                let sample = (self.sample_at(c) * self.volume).clamp(-1.0, 1.0);
                *slot = sample;
                mono += sample;
            }
            tap.push(mono / frame.len() as f32);

            self.position += self.step;
            if self.position >= frames {
                if self.looping {
                    self.position %= frames;
                } else {
                    self.finished = true;
                }
            }
        }
    }
}

/// Active output stream (kept alive for as long as playback should run)
pub struct Playback {
    _stream: cpal::Stream,
    device_name: String,
    sample_rate: u32,
}

impl Playback {
    /// Open the default output device and start playing `clip`
    pub fn start(
        clip: Arc<AudioClip>,
        config: &PlaybackConfig,
        tap: Arc<Mutex<SampleTap>>,
    ) -> Result<Self, AudioError> {
        // Setup audio output device
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let supported = device.default_output_config()?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;

        let voice = LoopingVoice::new(clip, sample_rate, config);
        let stream_config: cpal::StreamConfig = supported.config();

        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &stream_config, channels, voice, tap)?
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &stream_config, channels, voice, tap)?
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &stream_config, channels, voice, tap)?
            }
            other => return Err(AudioError::UnsupportedSampleFormat(other)),
        };
        stream.play()?;

        Ok(Self {
            _stream: stream,
            device_name,
            sample_rate,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// Build an output stream converting the f32 mix to the device sample type
fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut voice: LoopingVoice,
    tap: Arc<Mutex<SampleTap>>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample + FromSample<f32>,
{
    let mut mix: Vec<f32> = Vec::new();
    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            mix.resize(data.len(), 0.0);
            match tap.lock() {
                Ok(mut tap) => voice.render(&mut mix, channels, &mut tap),
                // A panic on the render thread must not silence the audio
                Err(poisoned) => voice.render(&mut mix, channels, &mut poisoned.into_inner()),
            }
            for (out, &sample) in data.iter_mut().zip(&mix) {
                *out = T::from_sample(sample);
            }
        },
        |err| log::error!("Audio stream error: {}", err),
        None,
    )
}
