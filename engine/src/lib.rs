//! Nanoblock Engine Library
//!
//! Layered brick-model editor: a stack of layers holding rectangular
//! pieces, drawn as instanced cubes, cylinders and studs with per-face
//! shades, edited through stacked 2D layer panels.
//!
//! # Modules
//!
//! - [`editor`] - Model, color registry, document format, input handling, session
//! - [`render`] - wgpu pipelines, instance batching and the 2D panel overlay
//! - [`input`] - Platform-agnostic keyboard and mouse state
//! - [`camera`] - Orbit camera for the 3D view
//! - [`error`] - Crate-level error type
//!
//! # Example
//!
//! ```no_run
//! use nanoblock_engine::editor::{ColorRegistry, EditorConfig, EditorSession, Model};
//! use nanoblock_engine::input::DeviceState;
//!
//! let registry = ColorRegistry::builtin();
//! let model = Model::with_layers("castle", 1);
//! let mut session = EditorSession::new(EditorConfig::default(), registry, model, "castle.json".into());
//!
//! let device = DeviceState::new();
//! session.update(&device.frame());
//! ```

pub mod camera;
pub mod error;
pub mod input;
pub mod render;

// Editor-domain modules (located in src/editor/ directory)
#[path = "../../src/editor/mod.rs"]
pub mod editor;

pub use error::{NanoblockError, Result};
pub use input::{DeviceState, FrameInput, KeyCode, MouseButton};
