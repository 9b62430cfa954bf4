//! Layered Block Model
//!
//! Data model for a nanoblock construction: a stack of layers, each holding
//! an ordered list of rectangular pieces.

pub mod coords;
pub mod layer;
#[allow(clippy::module_inception)]
pub mod model;
pub mod piece;

pub use coords::{Coord2, Coord3, Direction, LayerIndex, Size2};
pub use layer::Layer;
pub use model::{Model, ModelInfo, PieceHandle};
pub use piece::{Piece, ShapeKind, StudMode};
