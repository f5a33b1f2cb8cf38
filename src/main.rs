//! Watersphere - an audio-reactive water sphere
//!
//! A displaced sphere shaded like water, rippling to a looped track, with a
//! debug panel for tuning every wave and color parameter live.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use watersphere::animation::{AnimationLoop, SystemClock};
use watersphere::audio::AudioSystem;
use watersphere::camera::PerspectiveCamera;
use watersphere::cli::Args;
use watersphere::controls::{OrbitControls, PointerEvent};
use watersphere::overlay::PanelHost;
use watersphere::panel::DebugPanel;
use watersphere::params::*;
use watersphere::rendering::RenderSystem;
use watersphere::viewport::Viewport;
use watersphere::water::{SphereMesh, WaterMaterial};

/// Everything that needs a live window
struct Scene {
    window: Arc<Window>,
    renderer: RenderSystem,
    viewport: Viewport,
    controls: OrbitControls,
    panel_host: PanelHost,
}

/// Main application state
struct App {
    // Configuration
    render_config: RenderConfig,
    orbit_config: OrbitConfig,

    // Window-bound state, created on resume
    scene: Option<Scene>,

    // Simulation state
    material: WaterMaterial,
    panel: DebugPanel,
    audio: AudioSystem,
    animation: AnimationLoop<SystemClock>,

    startup_error: Option<anyhow::Error>,
}

impl App {
    fn new(args: &Args) -> anyhow::Result<Self> {
        let render_config = args.render_config();
        render_config.validate()?;

        let water_params = WaterParams::default();
        water_params.validate()?;

        let analyser_config = AnalyserConfig::default();
        let bins = analyser_config.frequency_bin_count();
        let audio = AudioSystem::new(analyser_config, args.playback_config())?;

        Ok(Self {
            panel: DebugPanel::new(render_config.show_panel),
            render_config,
            orbit_config: OrbitConfig::default(),
            scene: None,
            material: WaterMaterial::new(water_params, bins),
            audio,
            animation: AnimationLoop::new(SystemClock::new()),
            startup_error: None,
        })
    }

    fn create_scene(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Scene> {
        let window_attributes = Window::default_attributes()
            .with_title("Watersphere")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let scale = window.scale_factor();
        let logical = window.inner_size().to_logical::<f64>(scale);
        let viewport = Viewport::new(
            logical.width,
            logical.height,
            scale,
            self.render_config.max_pixel_ratio,
        );

        let mesh = SphereMesh::new(
            self.render_config.sphere_radius,
            self.render_config.sphere_width_segments,
            self.render_config.sphere_height_segments,
        );
        log::info!(
            "Sphere: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.indices.len() / 3
        );

        let renderer = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &mesh,
            self.material.audio().width(),
            viewport.drawing_buffer(),
        ))
        .context("failed to initialise GPU")?;

        let mut camera = PerspectiveCamera::new(&self.render_config, &self.orbit_config);
        camera.set_aspect(viewport.aspect());
        let controls = OrbitControls::new(camera, self.orbit_config.clone(), logical.height as f32);

        let panel_host = PanelHost::new(&window);

        Ok(Scene {
            window,
            renderer,
            viewport,
            controls,
            panel_host,
        })
    }
}

impl Scene {
    /// Follow the window's current physical size and scale factor
    fn resize(&mut self) {
        let size = self.window.inner_size();
        let scale = self.window.scale_factor();
        let logical = size.to_logical::<f64>(scale);

        if let Some(buffer) = self.viewport.resize(
            logical.width,
            logical.height,
            scale,
            self.controls.camera_mut(),
        ) {
            self.controls.set_element_height(logical.height as f32);
            self.renderer.resize(size.width, size.height, buffer);
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(scene) = &self.scene {
            scene.window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.scene.is_some() {
            return; // Already initialized
        }

        match self.create_scene(event_loop) {
            Ok(scene) => {
                log::info!("Watersphere is running");
                log::info!("Drag to orbit, right-drag to pan, scroll to zoom");
                log::info!("Press H to toggle the panel, ESC to quit");
                self.scene = Some(scene);
            }
            Err(e) => {
                log::error!("Startup failed: {:#}", e);
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Self {
            scene: Some(scene),
            material,
            panel,
            audio,
            animation,
            ..
        } = self
        else {
            return;
        };

        let consumed = scene.panel_host.on_window_event(&scene.window, &event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::KeyH if !consumed => panel.toggle(),
                _ => {}
            },
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => scene.resize(),
            WindowEvent::RedrawRequested => {
                let overlay = scene
                    .panel_host
                    .run(&scene.window, |ctx| panel.show(ctx, material));
                scene.renderer.set_overlay(overlay);

                if let Err(e) =
                    animation.tick(material, audio, &mut scene.controls, &mut scene.renderer)
                {
                    log::error!("Render error: {}", e);
                    event_loop.exit();
                }
            }
            other => {
                let scale = scene.window.scale_factor();
                if let Some(pointer) = PointerEvent::from_window_event(&other, scale) {
                    scene.controls.handle(pointer, consumed);
                }
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    log::info!("Watersphere - audio-reactive water sphere");

    let mut app = App::new(&args)?;
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;

    match app.startup_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
