//! egui integration: window input in, tessellated overlay frames out.

use std::sync::Arc;

use winit::event::WindowEvent;
use winit::window::Window;

/// Everything the renderer needs to paint one overlay frame
pub struct OverlayFrame {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub screen: egui_wgpu::ScreenDescriptor,
}

impl OverlayFrame {
    /// Fold a newer frame into one that was never painted
    ///
    /// Geometry and screen size come from `newer`; texture uploads and frees
    /// from both are kept in order, since egui sends each full texture once.
    pub fn merge(&mut self, newer: OverlayFrame) {
        self.textures_delta.append(newer.textures_delta);
        self.paint_jobs = newer.paint_jobs;
        self.screen = newer.screen;
    }
}

/// egui context plus its winit adapter
pub struct PanelHost {
    ctx: egui::Context,
    state: egui_winit::State,
}

impl PanelHost {
    pub fn new(window: &Window) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        Self { ctx, state }
    }

    /// Feed a window event to egui; returns true when egui consumed it
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run one egui pass and tessellate it for the physical surface size
    pub fn run(&mut self, window: &Arc<Window>, ui: impl FnMut(&egui::Context)) -> OverlayFrame {
        let raw_input = self.state.take_egui_input(window);
        let output = self.ctx.run(raw_input, ui);
        self.state
            .handle_platform_output(window, output.platform_output);

        let paint_jobs = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        let size = window.inner_size();

        OverlayFrame {
            paint_jobs,
            textures_delta: output.textures_delta,
            screen: egui_wgpu::ScreenDescriptor {
                size_in_pixels: [size.width, size.height],
                pixels_per_point: output.pixels_per_point,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(set: Vec<(egui::TextureId, egui::epaint::ImageDelta)>, width: u32) -> OverlayFrame {
        OverlayFrame {
            paint_jobs: Vec::new(),
            textures_delta: egui::TexturesDelta {
                set,
                free: Vec::new(),
            },
            screen: egui_wgpu::ScreenDescriptor {
                size_in_pixels: [width, 720],
                pixels_per_point: 1.0,
            },
        }
    }

    fn image() -> egui::ColorImage {
        egui::ColorImage::new([2, 2], egui::Color32::WHITE)
    }

    #[test]
    fn test_merge_keeps_unpainted_full_upload() {
        let font = egui::TextureId::Managed(0);
        let full = egui::epaint::ImageDelta::full(image(), egui::TextureOptions::LINEAR);
        let glyphs =
            egui::epaint::ImageDelta::partial([4, 4], image(), egui::TextureOptions::LINEAR);

        let mut pending = frame(vec![(font, full)], 1280);
        pending.merge(frame(vec![(font, glyphs)], 1920));

        let set = &pending.textures_delta.set;
        assert_eq!(set.len(), 2);
        // Full upload still precedes the partial one that patches it
        assert_eq!(set[0].1.pos, None);
        assert_eq!(set[1].1.pos, Some([4, 4]));
        assert_eq!(pending.screen.size_in_pixels, [1920, 720]);
    }

    #[test]
    fn test_merge_keeps_frees() {
        let mut pending = frame(Vec::new(), 1280);
        pending.textures_delta.free.push(egui::TextureId::Managed(3));
        let mut newer = frame(Vec::new(), 1280);
        newer.textures_delta.free.push(egui::TextureId::Managed(4));

        pending.merge(newer);

        assert_eq!(
            pending.textures_delta.free,
            vec![egui::TextureId::Managed(3), egui::TextureId::Managed(4)]
        );
    }
}
