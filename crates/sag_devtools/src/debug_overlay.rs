//! egui layer drawn on top of the sprite pass.
//!
//! Two pieces share one egui context:
//!  - the score HUD, always visible in the top-left corner
//!  - the debug panel, toggled with F3, showing loop timing and game state
//!
//! Rendering follows the usual egui-wgpu split because
//! `egui_wgpu::Renderer::render()` needs a `RenderPass<'static>`:
//!
//!   1. `prepare()` -- run UI logic, tessellate
//!   2. `upload()`  -- update textures and buffers (borrows the encoder)
//!   3. `paint()`   -- draw into a pass created with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui dropped

use sag_core::time::TickStats;
use winit::window::Window;

/// Top-left of the score label, placing its baseline near (10, 20).
const HUD_POS: [f32; 2] = [10.0, 6.0];

/// Player-facing values drawn every frame.
#[derive(Debug, Clone, Default)]
pub struct HudData {
    pub score: u32,
}

/// Developer values shown only in the debug panel.
#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub tick: TickStats,
    pub position: (i32, i32),
    pub direction_label: String,
    pub animation_label: String,
    pub animation_frame: usize,
    pub power_ups_remaining: u32,
    pub held_keys: Vec<&'static str>,
    pub sprite_count: u32,
}

pub struct DebugOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            visible: false,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug overlay: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        hud: &HudData,
        stats: Option<OverlayStats>,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let visible = self.visible;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::Area::new(egui::Id::new("score_hud"))
                .fixed_pos(HUD_POS)
                .interactable(false)
                .show(ctx, |ui| {
                    ui.label(
                        egui::RichText::new(format!("Score: {}", hud.score))
                            .color(egui::Color32::WHITE)
                            .monospace(),
                    );
                });

            if !visible {
                return;
            }
            egui::Window::new("Debug")
                .default_pos([300.0, 10.0])
                .show(ctx, |ui| {
                    let Some(stats) = &stats else {
                        ui.label("Waiting for first tick...");
                        return;
                    };
                    ui.label(format!("Tick rate: {:.1}/s", stats.tick.smoothed_tps));
                    ui.label(format!(
                        "Tick time: {:.3} ms",
                        stats.tick.smoothed_tick_time_ms
                    ));
                    ui.label(format!("Ticks: {}", stats.tick.tick_count));
                    ui.separator();
                    ui.label(format!(
                        "Position: ({}, {})",
                        stats.position.0, stats.position.1
                    ));
                    ui.label(format!("Direction: {}", stats.direction_label));
                    ui.label(format!(
                        "Animation: {} [{}]",
                        stats.animation_label, stats.animation_frame
                    ));
                    ui.label(format!("Power-ups left: {}", stats.power_ups_remaining));
                    ui.label(format!("Sprites: {}", stats.sprite_count));
                    if stats.held_keys.is_empty() {
                        ui.label("Held: -");
                    } else {
                        ui.label(format!("Held: {}", stats.held_keys.join(", ")));
                    }
                });
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
