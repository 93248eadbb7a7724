//! Sprite Animation Game
//!
//! One character walks over a tiled 512×512 field with the arrow keys,
//! collecting power-ups for score. Two threads cooperate:
//!
//!   - the game loop thread owns the world and ticks it at 60 Hz
//!   - the winit thread turns key transitions into directions, and draws
//!     whatever snapshot the loop published last
//!
//! The world is restored from `game_state.json` on launch when a valid save
//! exists, and written back when the window closes.
//!
//! Controls:
//!   Arrows  Move
//!   F3      Toggle debug overlay

mod atlas;
mod collision;
mod config;
mod controller;
mod frame_mesh;
mod game_loop;
mod game_state;
#[cfg(test)]
mod replay;
mod save;

use std::path::Path;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use atlas::{load_sprite_sheet, SpriteAtlas, SpriteSheet, SPRITE_SHEET_PATH};
use config::GameConfig;
use controller::DirectionTracker;
use frame_mesh::build_frame_mesh;
use game_loop::{FrameSnapshot, GameLoop};
use game_state::GameState;
use sag_core::input::{InputState, Key};
use sag_core::time::TickPacing;
use sag_devtools::{DebugOverlay, HudData, OverlayStats};
use sag_platform::window::PlatformConfig;
use sag_render::{Camera2D, GpuContext, SpritePipeline, SpriteVertex, Texture};
use save::{load_save_from_path, write_save_to_path, SaveFile, SAVE_PATH};

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// What `main` prepares before a window exists.
struct Launch {
    sheet: SpriteSheet,
    state: GameState,
}

struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    sprite_pipeline: SpritePipeline,
    debug_overlay: DebugOverlay,
    input: InputState,
    tracker: DirectionTracker,
    game_loop: GameLoop,
    config: GameConfig,

    atlas: SpriteAtlas,
    sheet_bind_group: wgpu::BindGroup,
    camera_bind_group: wgpu::BindGroup,

    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    sprite_count: usize,
}

impl EngineState {
    fn new(window: Arc<Window>, launch: Launch) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let debug_overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);

        let Launch { sheet, state } = launch;
        let config = state.config;

        let sheet_texture = Texture::from_image(&gpu.device, &gpu.queue, &sheet.image, "Sprite Sheet");
        let sheet_bind_group = sprite_pipeline.create_texture_bind_group(&gpu.device, &sheet_texture);

        // The canvas is a fixed logical size; physical pixels only change with DPI.
        let camera = Camera2D::new(config.canvas_width as u32, config.canvas_height as u32);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);

        let redraw_target = Arc::clone(&window);
        let game_loop = GameLoop::spawn(state, TickPacing::default(), move || {
            redraw_target.request_redraw();
        })?;

        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        let mut engine = Self {
            window,
            gpu,
            sprite_pipeline,
            debug_overlay,
            input: InputState::new(),
            tracker: DirectionTracker::default(),
            game_loop,
            config,
            atlas: sheet.atlas,
            sheet_bind_group,
            camera_bind_group,
            vertex_buffer,
            index_buffer,
            mesh_vertex_capacity: 0,
            mesh_index_capacity: 0,
            sprite_count: 0,
        };
        // 64 background tiles, a few power-ups and the character.
        engine.ensure_mesh_capacity(128 * 4, 128 * 6);
        Ok(engine)
    }

    fn on_key_pressed(&mut self, key: Key) {
        if key == Key::F3 {
            self.debug_overlay.toggle();
            return;
        }
        if let Some(direction) = self.tracker.press(key) {
            self.game_loop.post_direction(direction);
        }
    }

    fn on_key_released(&mut self, key: Key) {
        if let Some(direction) = self.tracker.release(key) {
            self.game_loop.post_direction(direction);
        }
    }

    /// Keys released while unfocused never reach us, so drop everything held.
    fn on_focus_lost(&mut self) {
        self.input.clear();
        if let Some(direction) = self.tracker.reset() {
            self.game_loop.post_direction(direction);
        }
    }

    fn shutdown(&mut self) {
        let Some(final_state) = self.game_loop.stop() else {
            return;
        };
        let path = Path::new(SAVE_PATH);
        match write_save_to_path(path, &SaveFile::from_state(&final_state)) {
            Ok(()) => log::info!(
                "Saved game to {} (score {}, {} power-ups left)",
                path.display(),
                final_state.score,
                final_state.power_ups.len()
            ),
            Err(err) => log::error!("{err}"),
        }
    }

    fn render(&mut self, snapshot: &FrameSnapshot) {
        if self.gpu.size.0 == 0 || self.gpu.size.1 == 0 {
            return;
        }

        let batch = build_frame_mesh(snapshot, &self.atlas, &self.config);
        self.ensure_mesh_capacity(batch.vertices.len(), batch.indices.len());
        self.gpu
            .queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&batch.vertices));
        self.gpu
            .queue
            .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&batch.indices));
        self.sprite_count = batch.quad_count();

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let hud = HudData {
            score: snapshot.score,
        };
        let stats = self.debug_overlay.visible.then(|| OverlayStats {
            tick: snapshot.tick,
            position: (snapshot.position.x, snapshot.position.y),
            direction_label: snapshot.direction.label().to_string(),
            animation_label: snapshot.animation.label().to_string(),
            animation_frame: snapshot.animation_frame,
            power_ups_remaining: snapshot.power_ups.len() as u32,
            held_keys: self.input.held_names(),
            sprite_count: self.sprite_count as u32,
        });
        let (egui_primitives, egui_textures_delta) =
            self.debug_overlay.prepare(&self.window, &hud, stats);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            render_pass.set_pipeline(&self.sprite_pipeline.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_bind_group(1, &self.sheet_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..batch.indices.len() as u32, 0, 0..1);
        }

        self.debug_overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.debug_overlay
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.debug_overlay.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
            log::debug!("Vertex buffer grown to {} vertices", self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
            log::debug!("Index buffer grown to {} indices", self.mesh_index_capacity);
        }
    }
}

struct App {
    config: PlatformConfig,
    launch: Option<Launch>,
    state: Option<EngineState>,
}

impl App {
    fn new(launch: Launch) -> Self {
        Self {
            config: PlatformConfig::default(),
            launch: Some(launch),
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let Some(launch) = self.launch.take() else {
            return;
        };
        let window = sag_platform::window::create_window(event_loop, &self.config);
        log::info!(
            "Window created: {}x{}",
            self.config.width,
            self.config.height
        );
        match EngineState::new(window, launch) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(err) => {
                log::error!("Startup failed: {err}");
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
        if matches!(event, WindowEvent::CloseRequested) {
            log::info!("Close requested, exiting.");
            if let Some(mut state) = self.state.take() {
                state.shutdown();
            }
            event_loop.exit();
            return;
        }

        let Some(state) = self.state.as_mut() else {
            return;
        };

        let egui_consumed = state
            .debug_overlay
            .handle_window_event(&state.window, &event);

        match event {
            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::Focused(false) => state.on_focus_lost(),

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                let PhysicalKey::Code(key_code) = event.physical_key else {
                    return;
                };
                let Some(key) = map_key(key_code) else {
                    return;
                };
                // InputState filters OS auto-repeat; only real transitions pass.
                match event.state {
                    ElementState::Pressed => {
                        if state.input.key_down(key) {
                            state.on_key_pressed(key);
                        }
                    }
                    ElementState::Released => {
                        if state.input.key_up(key) {
                            state.on_key_released(key);
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(snapshot) = state.game_loop.latest_snapshot() {
                    state.render(&snapshot);
                }
            }

            _ => {}
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

/// Fresh world, replaced by the saved one when a valid save exists.
fn initial_state(config: GameConfig, path: &Path, rng: &mut fastrand::Rng) -> GameState {
    let fresh = GameState::new(config, rng);
    match load_save_from_path(path, &config) {
        Ok(Some(save)) => {
            log::info!(
                "Restored save {} (score {}, {} power-ups left)",
                path.display(),
                save.score,
                save.power_ups.len()
            );
            save.into_state(config)
        }
        Ok(None) => {
            log::info!("No save at {}, starting a new game", path.display());
            fresh
        }
        Err(err) => {
            log::error!("Discarding save: {err}");
            fresh
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Sprite Animation Game starting...");

    let sheet = match load_sprite_sheet(Path::new(SPRITE_SHEET_PATH)) {
        Ok(sheet) => sheet,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };
    let state = initial_state(
        GameConfig::default(),
        Path::new(SAVE_PATH),
        &mut fastrand::Rng::new(),
    );

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(Launch { sheet, state });
    event_loop.run_app(&mut app).expect("Event loop error");
}
