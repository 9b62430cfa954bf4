//! Layer
//!
//! One vertical slice of a model. Pieces are kept in insertion order, which
//! is also the rendering and serialization order.

use super::coords::{Coord2, LayerIndex};
use super::piece::Piece;

/// An ordered set of pieces at one vertical level.
///
/// `prev`/`next` are non-owning back-references expressed as indices into
/// the owning model's layer sequence. The model recomputes them after every
/// structural edit; they are never serialized.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub(super) index: LayerIndex,
    pub(super) pieces: Vec<Piece>,
    pub(super) prev: Option<LayerIndex>,
    pub(super) next: Option<LayerIndex>,
}

impl Layer {
    pub fn new(index: LayerIndex) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn index(&self) -> LayerIndex {
        self.index
    }

    /// Append a piece. Always succeeds; overlap is not checked.
    pub fn add(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    /// First piece in insertion order whose footprint contains `cell`.
    pub fn piece_at(&self, cell: Coord2) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.contains(cell))
    }

    /// Storage slot of the first piece containing `cell`.
    pub fn slot_at(&self, cell: Coord2) -> Option<usize> {
        self.pieces.iter().position(|p| p.contains(cell))
    }

    /// Erase the piece stored in `slot`, if any.
    pub fn remove_slot(&mut self, slot: usize) -> Option<Piece> {
        (slot < self.pieces.len()).then(|| self.pieces.remove(slot))
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Index of the layer directly below, `None` at the bottom.
    pub fn prev(&self) -> Option<LayerIndex> {
        self.prev
    }

    /// Index of the layer directly above, `None` at the top.
    pub fn next(&self) -> Option<LayerIndex> {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::model::coords::Size2;
    use crate::editor::palette::ColorRegistry;

    #[test]
    fn test_piece_at_first_match_wins() {
        let reg = ColorRegistry::builtin();
        let mut layer = Layer::new(0);
        let big = Piece::new(Coord2::new(0, 0), reg.lime()).with_size(Size2::new(4, 4));
        let small = Piece::new(Coord2::new(1, 1), reg.white());
        layer.add(big);
        layer.add(small);

        // Overlap resolves by insertion order, not by size or recency.
        assert_eq!(layer.piece_at(Coord2::new(1, 1)), Some(&big));
        assert_eq!(layer.slot_at(Coord2::new(1, 1)), Some(0));
    }

    #[test]
    fn test_remove_slot_out_of_range() {
        let mut layer = Layer::new(0);
        assert!(layer.remove_slot(3).is_none());
        assert!(layer.is_empty());
    }
}
