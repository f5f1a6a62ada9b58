//! Egui overlay for on-screen control panels.
//!
//! Provides optional egui UI support over a running animation when the
//! `egui` feature is enabled. The panel chrome is themed from the
//! animation's palette so the overlay reads as part of the scene.

use std::sync::Arc;
use winit::window::Window;

use crate::visuals::Palette;

/// Egui overlay state.
///
/// Wraps egui context, winit state, and wgpu renderer.
pub struct EguiOverlay {
    pub ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// Output from egui frame processing.
pub struct EguiFrameOutput {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl EguiOverlay {
    /// Create new overlay state for a window, themed from `palette`.
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        window: &Arc<Window>,
        palette: Palette,
    ) -> Self {
        let ctx = egui::Context::default();
        ctx.set_style(panel_style(palette));

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let renderer = egui_wgpu::Renderer::new(
            device,
            output_format,
            None,  // depth format
            1,     // msaa samples
            false, // dithering
        );

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Process a winit event.
    ///
    /// Returns true if egui consumed the event (don't treat it as
    /// pointer input for the animation).
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// Begin a new frame. Call before the UI callback.
    pub fn begin_frame(&mut self, window: &Window) {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_frame(raw_input);
    }

    /// End the frame and get the output for rendering.
    pub fn end_frame(&mut self, window: &Window) -> EguiFrameOutput {
        let full_output = self.ctx.end_frame();

        // Handle platform output (clipboard, cursor, etc.)
        self.state
            .handle_platform_output(window, full_output.platform_output);

        // Tessellate shapes into paint jobs
        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        EguiFrameOutput {
            paint_jobs,
            textures_delta: full_output.textures_delta,
            pixels_per_point: full_output.pixels_per_point,
        }
    }

    /// Prepare textures and buffers for rendering. Call before creating
    /// the overlay render pass.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output: &EguiFrameOutput,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        // Update textures
        for (id, image_delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        // Update buffers
        self.renderer
            .update_buffers(device, queue, encoder, &output.paint_jobs, screen_descriptor);
    }

    /// Get a reference to the renderer for direct rendering.
    pub fn renderer(&self) -> &egui_wgpu::Renderer {
        &self.renderer
    }

    /// Free textures after the frame is done.
    pub fn cleanup(&mut self, output: &EguiFrameOutput) {
        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

/// Panel theme for an animation palette: dark chrome without shadows,
/// with the palette's leading stop as the accent color.
fn panel_style(palette: Palette) -> egui::Style {
    let accent = color32(palette.colors()[0]);

    let mut style = egui::Style::default();
    style.visuals = egui::Visuals::dark();
    style.visuals.window_shadow = egui::Shadow::NONE;
    style.visuals.popup_shadow = egui::Shadow::NONE;
    style.visuals.hyperlink_color = accent;
    style.visuals.selection.bg_fill = accent.linear_multiply(0.35);
    style.visuals.widgets.hovered.fg_stroke.color = accent;
    style.visuals.widgets.active.fg_stroke.color = accent;
    style.visuals.slider_trailing_fill = true;
    style
}

fn color32(color: glam::Vec3) -> egui::Color32 {
    egui::Color32::from_rgb(
        (color.x * 255.0) as u8,
        (color.y * 255.0) as u8,
        (color.z * 255.0) as u8,
    )
}
