//! Nanoblock Editor
//!
//! Layered brick-model editor. The left column shows one 2D panel per
//! layer (top layer first); the 3D view shows the assembled model.
//!
//! Run with: `cargo run --bin nanoblock_editor -- [model.json]`
//!
//! Controls:
//! - Left click (2D panel): place the brush / remove the piece under the cursor
//! - Right click: swap brush width and height
//! - W / Q: grow / shrink brush width
//! - S / A: grow / shrink brush height
//! - T: cycle stud mode, E: toggle square / round
//! - 1-9, 0: select color
//! - R: add a layer on top
//! - Arrow keys: shift the whole model
//! - Middle mouse drag: orbit, scroll wheel: zoom
//! - Ctrl+S: save
//! - ESC: save and exit

use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowAttributes, WindowId};

use nanoblock_engine::editor::{EditorConfig, EditorSession};
use nanoblock_engine::input::{DeviceState, KeyCode, MouseButton, ScrollDelta};
use nanoblock_engine::render::{GpuContext, GpuContextConfig, GraphicsResources, Renderer};

struct NanoblockApp {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<Renderer>,
    session: EditorSession,
    device: DeviceState,
    title: String,
}

impl NanoblockApp {
    fn new(session: EditorSession) -> Self {
        Self {
            window: None,
            gpu: None,
            renderer: None,
            session,
            device: DeviceState::new(),
            title: String::new(),
        }
    }

    fn initialize(&mut self, window: Arc<Window>) -> Result<(), nanoblock_engine::NanoblockError> {
        let gpu = GpuContext::new(Arc::clone(&window), GpuContextConfig::default())?;
        let (width, height) = gpu.dimensions();
        self.session.camera.resize(width, height);

        let resources = GraphicsResources::new(&gpu, &self.session);
        self.renderer = Some(Renderer::new(&gpu, resources));
        self.gpu = Some(gpu);
        self.window = Some(window);
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        // Failure is logged by the session.
        let _ = self.session.save();
        self.renderer = None;
        self.gpu = None;
        event_loop.exit();
    }

    fn redraw(&mut self) {
        let frame = self.device.frame();
        self.session.update(&frame);
        self.device.end_frame();

        let (Some(gpu), Some(renderer)) = (self.gpu.as_mut(), self.renderer.as_mut()) else {
            return;
        };
        match renderer.render(gpu, &self.session) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                gpu.reconfigure();
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }

        let title = self.session.window_title();
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }
}

impl ApplicationHandler for NanoblockApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let cfg = &self.session.config.window;
        let attrs = WindowAttributes::default()
            .with_title(self.session.window_title())
            .with_inner_size(PhysicalSize::new(cfg.width, cfg.height));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        if let Err(e) = self.initialize(window) {
            log::error!("Failed to initialize graphics: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let key = KeyCode::from_winit(code);
                    let pressed = event.state == ElementState::Pressed;
                    if key == KeyCode::Escape && pressed {
                        self.shutdown(event_loop);
                        return;
                    }
                    self.device.handle_key(key, pressed);
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(button) = MouseButton::from_winit(button) {
                    self.device
                        .set_button(button, state == ElementState::Pressed);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.device
                    .set_pointer(position.x as f32, position.y as f32);
            }

            WindowEvent::CursorLeft { .. } => self.device.clear_pointer(),

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(x, y) => ScrollDelta::from_lines(x, y),
                    MouseScrollDelta::PixelDelta(pos) => ScrollDelta::from_pixels(pos.x, pos.y),
                };
                self.device.add_scroll(scroll);
            }

            WindowEvent::Focused(false) => self.device.reset(),

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
                self.session.camera.resize(size.width, size.height);
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match EditorConfig::load_or_default(&EditorConfig::default_path()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid editor config: {}", e);
            std::process::exit(1);
        }
    };
    let model_path = std::env::args_os().nth(1).map(PathBuf::from);

    let session = match EditorSession::open(config, model_path) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Failed to open model: {}", e);
            std::process::exit(1);
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = NanoblockApp::new(session);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
