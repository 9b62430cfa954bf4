//! Model
//!
//! The full stack of layers. Owns structural edits (layer insertion and
//! removal), piece placement/removal by 3D coordinate, and the whole-model
//! shift. After every structural method returns:
//! - `layers[i].index == i`
//! - `layers[i].prev == i - 1` (or `None` at the bottom)
//! - `layers[i].next == i + 1` (or `None` at the top)

use super::coords::{Coord3, Direction, LayerIndex};
use super::layer::Layer;
use super::piece::Piece;

/// Descriptive information stored with a model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelInfo {
    pub name: String,
}

/// Identity of a stored piece: the layer and the slot inside it.
///
/// Handles are invalidated by any edit of that layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceHandle {
    pub layer: LayerIndex,
    pub slot: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Model {
    pub info: ModelInfo,
    layers: Vec<Layer>,
}

impl Model {
    /// An empty model with no layers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: ModelInfo { name: name.into() },
            layers: Vec::new(),
        }
    }

    /// A model with `count` empty, linked layers.
    pub fn with_layers(name: impl Into<String>, count: usize) -> Self {
        let mut model = Self::new(name);
        model.prepare_layers(count);
        model
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Index of the top layer, `None` when the model has no layers.
    pub fn last_layer_index(&self) -> Option<LayerIndex> {
        self.layers.len().checked_sub(1).map(|i| i as LayerIndex)
    }

    pub fn layer(&self, index: LayerIndex) -> Option<&Layer> {
        usize::try_from(index).ok().and_then(|i| self.layers.get(i))
    }

    pub fn layer_mut(&mut self, index: LayerIndex) -> Option<&mut Layer> {
        usize::try_from(index).ok().and_then(|i| self.layers.get_mut(i))
    }

    /// The layer directly below `layer`, resolved through its back-reference.
    pub fn below(&self, layer: &Layer) -> Option<&Layer> {
        layer.prev().and_then(|i| self.layer(i))
    }

    /// The layer directly above `layer`.
    pub fn above(&self, layer: &Layer) -> Option<&Layer> {
        layer.next().and_then(|i| self.layer(i))
    }

    pub fn piece_count(&self) -> usize {
        self.layers.iter().map(|l| l.pieces.len()).sum()
    }

    /// Every piece with the index of the layer holding it.
    pub fn pieces(&self) -> impl Iterator<Item = (LayerIndex, &Piece)> {
        self.layers
            .iter()
            .flat_map(|l| l.pieces.iter().map(move |p| (l.index, p)))
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Insert an empty layer at `index`, shifting every layer at or above
    /// it up by one. `index` is clamped to `0..=layer_count`.
    pub fn insert_layer(&mut self, index: LayerIndex) {
        let at = (index.max(0) as usize).min(self.layers.len());
        self.layers.insert(at, Layer::new(at as LayerIndex));
        self.relink();
        log::debug!("Model: inserted layer {} ({} total)", at, self.layers.len());
    }

    pub fn add_layer_on_top(&mut self) {
        self.insert_layer(self.layers.len() as LayerIndex);
    }

    /// Insert below everything. Every existing layer's index grows by one,
    /// so anything keyed by layer index now points one layer lower.
    pub fn add_layer_at_bottom(&mut self) {
        self.insert_layer(0);
    }

    /// Remove the layer at `index` with its pieces; no-op if out of range.
    pub fn remove_layer(&mut self, index: LayerIndex) -> Option<Layer> {
        let at = usize::try_from(index).ok().filter(|&i| i < self.layers.len())?;
        let removed = self.layers.remove(at);
        self.relink();
        log::debug!("Model: removed layer {} ({} left)", at, self.layers.len());
        Some(removed)
    }

    /// Reset to exactly `count` empty, linked layers.
    pub fn prepare_layers(&mut self, count: usize) {
        self.layers.clear();
        self.layers.extend((0..count).map(|i| Layer::new(i as LayerIndex)));
        self.relink();
    }

    /// Recompute indices and neighbor links from sequence positions.
    fn relink(&mut self) {
        let len = self.layers.len();
        for (i, layer) in self.layers.iter_mut().enumerate() {
            layer.index = i as LayerIndex;
            layer.prev = (i > 0).then(|| (i - 1) as LayerIndex);
            layer.next = (i + 1 < len).then(|| (i + 1) as LayerIndex);
        }
    }

    // ------------------------------------------------------------------
    // Pieces
    // ------------------------------------------------------------------

    /// Append `piece` to the named layer; silently ignored if the layer
    /// does not exist.
    pub fn add_piece(&mut self, layer: LayerIndex, piece: Piece) {
        match self.layer_mut(layer) {
            Some(l) => l.add(piece),
            None => log::debug!("Model: add_piece on missing layer {} ignored", layer),
        }
    }

    pub fn piece_at(&self, coord: Coord3) -> Option<&Piece> {
        self.layer(coord.layer)?.piece_at(coord.xy())
    }

    /// Storage identity of the piece covering `coord`.
    pub fn locate(&self, coord: Coord3) -> Option<PieceHandle> {
        let slot = self.layer(coord.layer)?.slot_at(coord.xy())?;
        Some(PieceHandle {
            layer: coord.layer,
            slot,
        })
    }

    pub fn get(&self, handle: PieceHandle) -> Option<&Piece> {
        self.layer(handle.layer)?.pieces.get(handle.slot)
    }

    /// Erase the piece identified by `handle`; no-op if it does not exist.
    pub fn remove(&mut self, handle: PieceHandle) -> Option<Piece> {
        self.layer_mut(handle.layer)?.remove_slot(handle.slot)
    }

    /// Translate every piece in every layer by one cell.
    pub fn shift(&mut self, direction: Direction) {
        let delta = direction.offset();
        for piece in self.layers.iter_mut().flat_map(|l| l.pieces.iter_mut()) {
            piece.translate(delta);
        }
        log::debug!("Model: shifted {:?}", direction);
    }
}
