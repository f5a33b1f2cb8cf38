//! Debug panel: bounded sliders and color pickers bound to material setters.

use std::ops::RangeInclusive;

use crate::color::Color;
use crate::error::PanelError;
use crate::params::WaterParams;
use crate::water::WaterMaterial;

/// Numeric control with a bounded range and step
pub struct Slider {
    pub name: &'static str,
    pub range: RangeInclusive<f32>,
    pub step: f32,
    get: fn(&WaterParams) -> f32,
    set: fn(&mut WaterMaterial, f32),
}

/// Color picker control
pub struct ColorPicker {
    pub name: &'static str,
    get: fn(&WaterParams) -> Color,
    set: fn(&mut WaterMaterial, Color),
}

pub enum Control {
    Slider(Slider),
    Color(ColorPicker),
}

impl Control {
    pub fn name(&self) -> &'static str {
        match self {
            Control::Slider(s) => s.name,
            Control::Color(c) => c.name,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Control::Slider(_) => "slider",
            Control::Color(_) => "color picker",
        }
    }
}

impl Slider {
    pub fn value(&self, material: &WaterMaterial) -> f32 {
        (self.get)(material.params())
    }

    /// Clamp into range and forward to the material setter
    pub fn apply(&self, material: &mut WaterMaterial, value: f32) {
        let value = value.clamp(*self.range.start(), *self.range.end());
        (self.set)(material, value);
    }
}

impl ColorPicker {
    pub fn value(&self, material: &WaterMaterial) -> Color {
        (self.get)(material.params())
    }

    pub fn apply(&self, material: &mut WaterMaterial, color: Color) {
        (self.set)(material, color);
    }
}

fn slider(
    name: &'static str,
    range: RangeInclusive<f32>,
    step: f32,
    get: fn(&WaterParams) -> f32,
    set: fn(&mut WaterMaterial, f32),
) -> Control {
    Control::Slider(Slider {
        name,
        range,
        step,
        get,
        set,
    })
}

/// The water controls, in display order
pub fn water_controls() -> Vec<Control> {
    vec![
        // Big waves
        slider(
            "uBigWavesElevation",
            0.0..=1.0,
            0.001,
            |p| p.big_waves_elevation,
            WaterMaterial::set_big_waves_elevation,
        ),
        slider(
            "uBigWavesFrequencyX",
            0.0..=10.0,
            0.001,
            |p| p.big_waves_frequency[0],
            WaterMaterial::set_big_waves_frequency_x,
        ),
        slider(
            "uBigWavesFrequencyY",
            0.0..=10.0,
            0.001,
            |p| p.big_waves_frequency[1],
            WaterMaterial::set_big_waves_frequency_y,
        ),
        slider(
            "uBigWavesSpeed",
            0.0..=4.0,
            0.001,
            |p| p.big_waves_speed,
            WaterMaterial::set_big_waves_speed,
        ),
        // Small waves
        slider(
            "uSmallWavesElevation",
            0.0..=1.0,
            0.001,
            |p| p.small_waves_elevation,
            WaterMaterial::set_small_waves_elevation,
        ),
        slider(
            "uSmallWavesFrequency",
            0.0..=30.0,
            0.001,
            |p| p.small_waves_frequency,
            WaterMaterial::set_small_waves_frequency,
        ),
        slider(
            "uSmallWavesSpeed",
            0.0..=4.0,
            0.001,
            |p| p.small_waves_speed,
            WaterMaterial::set_small_waves_speed,
        ),
        slider(
            "uSmallWavesIterations",
            0.0..=10.0,
            1.0,
            |p| p.small_waves_iterations as f32,
            |m, v| m.set_small_waves_iterations(v.round() as u32),
        ),
        // Color
        Control::Color(ColorPicker {
            name: "depthColor",
            get: |p| p.depth_color,
            set: WaterMaterial::set_depth_color,
        }),
        Control::Color(ColorPicker {
            name: "surfaceColor",
            get: |p| p.surface_color,
            set: WaterMaterial::set_surface_color,
        }),
        slider(
            "uColorOffset",
            0.0..=1.0,
            0.001,
            |p| p.color_offset,
            WaterMaterial::set_color_offset,
        ),
        slider(
            "uColorMultiplier",
            0.0..=10.0,
            0.001,
            |p| p.color_multiplier,
            WaterMaterial::set_color_multiplier,
        ),
    ]
}

/// Floating window listing every control
pub struct DebugPanel {
    controls: Vec<Control>,
    /// Default width (logical pixels)
    width: f32,
    visible: bool,
}

impl DebugPanel {
    pub fn new(visible: bool) -> Self {
        Self {
            controls: water_controls(),
            width: 340.0,
            visible,
        }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    fn find(&self, name: &str) -> Result<&Control, PanelError> {
        self.controls
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| PanelError::UnknownControl(name.to_string()))
    }

    /// Set a slider by name, as if dragged to `value`
    pub fn set_value(
        &self,
        name: &str,
        value: f32,
        material: &mut WaterMaterial,
    ) -> Result<(), PanelError> {
        match self.find(name)? {
            Control::Slider(s) => {
                s.apply(material, value);
                Ok(())
            }
            other => Err(PanelError::WrongKind {
                name: name.to_string(),
                expected: "slider",
                actual: other.kind(),
            }),
        }
    }

    /// Set a color picker by name
    pub fn set_color(
        &self,
        name: &str,
        color: Color,
        material: &mut WaterMaterial,
    ) -> Result<(), PanelError> {
        match self.find(name)? {
            Control::Color(c) => {
                c.apply(material, color);
                Ok(())
            }
            other => Err(PanelError::WrongKind {
                name: name.to_string(),
                expected: "color picker",
                actual: other.kind(),
            }),
        }
    }

    /// Draw the panel; edits go straight to the material setters
    pub fn show(&self, ctx: &egui::Context, material: &mut WaterMaterial) {
        if !self.visible {
            return;
        }
        egui::Window::new("Debug")
            .default_width(self.width)
            .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
            .resizable(false)
            .show(ctx, |ui| {
                for control in &self.controls {
                    match control {
                        Control::Slider(s) => {
                            let mut value = s.value(material);
                            let response = ui.add(
                                egui::Slider::new(&mut value, s.range.clone())
                                    .step_by(s.step as f64)
                                    .text(s.name),
                            );
                            if response.changed() {
                                s.apply(material, value);
                            }
                        }
                        Control::Color(c) => {
                            let mut rgb = c.value(material).to_rgb8();
                            ui.horizontal(|ui| {
                                if ui.color_edit_button_srgb(&mut rgb).changed() {
                                    c.apply(material, Color::from_rgb8(rgb));
                                }
                                ui.label(c.name);
                            });
                        }
                    }
                }
            });
    }
}
