//! Nanoblock Editor
//!
//! Editor-domain code: the layered block model, the color registry, the
//! JSON document format, configuration, input handling and the session
//! that ties them together. Rendering lives in the engine's `render`
//! module and only reads from here.

pub mod config;
pub mod document;
pub mod input_handler;
pub mod model;
pub mod palette;
pub mod session;

pub use config::{EditorConfig, InputConfig};
pub use document::{DocumentError, load_model, load_or_new, save_model};
pub use input_handler::{InputEvent, InputHandler, InputOutcome};
pub use model::{Coord2, Coord3, Direction, Layer, Model, Piece, PieceHandle, ShapeKind, Size2, StudMode};
pub use palette::{ColorId, ColorRegistry, PaletteError, PieceColor};
pub use session::EditorSession;
