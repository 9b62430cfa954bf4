//! Editing Session
//!
//! Owns everything the editor mutates: the model, the brush, the color
//! registry, input state, configuration and the 3D camera. It holds no GPU
//! state; the renderer reads it after every [`EditorSession::update`].

use std::path::{Path, PathBuf};

use glam::Vec3;

use crate::camera::OrbitCamera;
use crate::editor::config::{EditorConfig, InputConfig};
use crate::editor::document::{self, DocumentError};
use crate::editor::input_handler::{EditContext, InputEvent, InputHandler, InputOutcome};
use crate::editor::model::{Coord2, Coord3, Model, Piece};
use crate::editor::palette::ColorRegistry;
use crate::error::Result;
use crate::input::{FrameInput, MouseButton};

pub struct EditorSession {
    pub config: EditorConfig,
    pub registry: ColorRegistry,
    pub model: Model,
    /// Template for the next placement. Never stored in the model.
    pub brush: Piece,
    pub camera: OrbitCamera,
    handler: InputHandler,
    model_path: PathBuf,
    status: Option<String>,
}

impl EditorSession {
    pub fn new(config: EditorConfig, registry: ColorRegistry, model: Model, model_path: PathBuf) -> Self {
        let brush = Piece::new(Coord2::default(), registry.lime());
        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
        let mut session = Self {
            config,
            registry,
            model,
            brush,
            camera: OrbitCamera::new(aspect),
            handler: InputHandler::new(InputConfig::default()),
            model_path,
            status: None,
        };
        session.recenter_camera();
        session
    }

    /// Load the registry and the model named by `model_path` (or the
    /// configured default). A missing model file starts a fresh model.
    pub fn open(config: EditorConfig, model_path: Option<PathBuf>) -> Result<Self> {
        let registry = match &config.paths.colors {
            Some(path) => ColorRegistry::load(path)?,
            None => ColorRegistry::builtin(),
        };
        let path = model_path.unwrap_or_else(|| config.paths.model.clone());
        let model = document::load_or_new(&path, &registry)?;
        log::info!(
            "Session: '{}' with {} layers, {} pieces, {} colors",
            model.name(),
            model.layer_count(),
            model.piece_count(),
            registry.len()
        );
        Ok(Self::new(config, registry, model, path))
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn hover(&self) -> Option<Coord3> {
        self.handler.hover()
    }

    /// Last save/load message, shown in the window title.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn window_title(&self) -> String {
        match &self.status {
            Some(status) => format!("{} - {} ({})", self.config.window.title, self.model.name(), status),
            None => format!("{} - {}", self.config.window.title, self.model.name()),
        }
    }

    /// Run one input cycle, then feed the camera.
    pub fn update(&mut self, frame: &FrameInput) -> InputOutcome {
        let mut ctx = EditContext {
            model: &mut self.model,
            brush: &mut self.brush,
            registry: &self.registry,
            layout: &self.config.layout,
        };
        let outcome = self.handler.update(frame, &mut ctx);

        for event in &outcome.events {
            match event {
                InputEvent::ButtonDown(MouseButton::Middle) => self.camera.set_orbiting(true),
                InputEvent::ButtonUp(MouseButton::Middle) => self.camera.set_orbiting(false),
                _ => {}
            }
        }
        if let Some(p) = frame.pointer {
            self.camera.handle_mouse_move(p.x, p.y);
        }
        if !frame.scroll.is_zero() {
            self.camera.handle_scroll(frame.scroll.y);
        }

        if outcome.model_changed {
            self.recenter_camera();
        }
        if outcome.save_requested {
            // Failure is already logged and shown in the title.
            let _ = self.save();
        }
        outcome
    }

    /// Write the model to its document path.
    pub fn save(&mut self) -> std::result::Result<(), DocumentError> {
        match document::save_model(&self.model_path, &self.model, &self.registry) {
            Ok(()) => {
                self.status = Some(format!("saved {}", self.model_path.display()));
                Ok(())
            }
            Err(e) => {
                log::error!("Save failed: {}", e);
                self.status = Some(format!("save failed: {e}"));
                Err(e)
            }
        }
    }

    /// Aim the camera at the middle of the editing footprint.
    fn recenter_camera(&mut self) {
        let blocks = &self.config.blocks;
        let half = self.config.layout.grid_size as f32 * blocks.side * 0.5;
        let height = self.model.layer_count() as f32 * blocks.height * 0.5;
        self.camera.target = Vec3::new(half, height, half);
    }
}
