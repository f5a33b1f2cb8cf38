//! Per-frame animation loop and the capability seams it drives.

use std::time::Instant;

use crate::audio::FrequencySource;
use crate::camera::PerspectiveCamera;
use crate::controls::OrbitControls;
use crate::water::WaterMaterial;

/// Source of elapsed time since start (seconds)
pub trait Clock {
    fn elapsed_s(&self) -> f32;
}

/// Wall clock started at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_s(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Draws one frame of the water scene
pub trait FrameRenderer {
    type Error;

    fn render_frame(
        &mut self,
        material: &mut WaterMaterial,
        camera: &PerspectiveCamera,
    ) -> Result<(), Self::Error>;
}

/// Frame scheduler state: the clock and a frame counter
pub struct AnimationLoop<C: Clock> {
    clock: C,
    frames: u64,
}

impl<C: Clock> AnimationLoop<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, frames: 0 }
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance one frame: time, audio, controls, then draw
    ///
    /// A failed draw is returned without counting the frame.
    pub fn tick<A, R>(
        &mut self,
        material: &mut WaterMaterial,
        audio: &mut A,
        controls: &mut OrbitControls,
        renderer: &mut R,
    ) -> Result<(), R::Error>
    where
        A: FrequencySource,
        R: FrameRenderer,
    {
        let elapsed = self.clock.elapsed_s();
        material.set_time(elapsed);

        material.audio_mut().update(audio.frequency_data());

        controls.update();

        renderer.render_frame(material, controls.camera())?;
        self.frames += 1;

        log::trace!("frame {} at {:.3}s", self.frames, elapsed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::params::{OrbitConfig, RenderConfig, WaterParams};

    /// Advances a fixed step every time it is read
    struct ManualClock {
        now: Cell<f32>,
        step: f32,
    }

    impl Clock for ManualClock {
        fn elapsed_s(&self) -> f32 {
            let t = self.now.get();
            self.now.set(t + self.step);
            t
        }
    }

    struct Ramp {
        data: Vec<u8>,
    }

    impl FrequencySource for Ramp {
        fn frequency_data(&mut self) -> &[u8] {
            for b in &mut self.data {
                *b = b.wrapping_add(1);
            }
            &self.data
        }
    }

    /// Records what each frame saw
    #[derive(Default)]
    struct Recorder {
        times: Vec<f32>,
        dirty: Vec<bool>,
        first_bin: Vec<u8>,
        fail: bool,
    }

    impl FrameRenderer for Recorder {
        type Error = &'static str;

        fn render_frame(
            &mut self,
            material: &mut WaterMaterial,
            _camera: &PerspectiveCamera,
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err("lost device");
            }
            self.times.push(material.time());
            self.dirty.push(material.audio().needs_update());
            self.first_bin.push(material.audio().data()[0]);
            // Renderer consumes the upload like the GPU path does
            material.audio_mut().take_update();
            Ok(())
        }
    }

    fn fixture() -> (WaterMaterial, Ramp, OrbitControls) {
        let config = OrbitConfig::default();
        let camera = PerspectiveCamera::new(&RenderConfig::default(), &config);
        (
            WaterMaterial::new(WaterParams::default(), 64),
            Ramp { data: vec![0; 64] },
            OrbitControls::new(camera, config, 720.0),
        )
    }

    #[test]
    fn test_n_ticks_render_n_frames() {
        let (mut material, mut audio, mut controls) = fixture();
        let mut animation = AnimationLoop::new(ManualClock {
            now: Cell::new(0.0),
            step: 1.0 / 60.0,
        });
        let mut renderer = Recorder::default();

        for _ in 0..120 {
            animation
                .tick(&mut material, &mut audio, &mut controls, &mut renderer)
                .unwrap();
        }

        assert_eq!(animation.frames(), 120);
        assert_eq!(renderer.times.len(), 120);
        assert!(renderer.times.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(renderer.times[0], 0.0);
    }

    #[test]
    fn test_audio_texture_refreshed_every_frame() {
        let (mut material, mut audio, mut controls) = fixture();
        let mut animation = AnimationLoop::new(ManualClock {
            now: Cell::new(0.0),
            step: 0.5,
        });
        let mut renderer = Recorder::default();

        for _ in 0..3 {
            animation
                .tick(&mut material, &mut audio, &mut controls, &mut renderer)
                .unwrap();
        }

        assert_eq!(renderer.dirty, vec![true, true, true]);
        assert_eq!(renderer.first_bin, vec![1, 2, 3]);
    }

    #[test]
    fn test_failed_frame_is_not_counted() {
        let (mut material, mut audio, mut controls) = fixture();
        let mut animation = AnimationLoop::new(SystemClock::new());
        let mut renderer = Recorder {
            fail: true,
            ..Recorder::default()
        };

        let result = animation.tick(&mut material, &mut audio, &mut controls, &mut renderer);

        assert_eq!(result, Err("lost device"));
        assert_eq!(animation.frames(), 0);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock::new();
        let a = clock.elapsed_s();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(clock.elapsed_s() > a);
    }
}
