//! Piece
//!
//! A single placeable block: where it sits in its layer, how many cells it
//! covers, which base shape it uses, how its studs are laid out and which
//! registry color paints it. Pieces are plain values; edits either mutate
//! in place or derive a changed copy.

use super::coords::{Coord2, Size2};
use crate::editor::palette::ColorId;

/// Base geometry of a piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Cube-like brick.
    #[default]
    Square,
    /// Cylinder-like brick.
    Round,
}

impl ShapeKind {
    pub fn toggled(self) -> Self {
        match self {
            ShapeKind::Square => ShapeKind::Round,
            ShapeKind::Round => ShapeKind::Square,
        }
    }
}

/// How many decorative studs are generated on top of a piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StudMode {
    None,
    /// A single stud at the footprint center.
    Centered,
    /// One stud per unit cell.
    #[default]
    Full,
}

impl StudMode {
    /// Full -> Centered -> None -> Full.
    pub fn cycled(self) -> Self {
        match self {
            StudMode::Full => StudMode::Centered,
            StudMode::Centered => StudMode::None,
            StudMode::None => StudMode::Full,
        }
    }

    /// Number of studs this mode produces for a footprint.
    pub fn stud_count(self, size: Size2) -> usize {
        match self {
            StudMode::None => 0,
            StudMode::Centered => 1,
            StudMode::Full => size.area() as usize,
        }
    }
}

/// A block occupying `[x, x+w) x [y, y+h)` in its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub coord: Coord2,
    size: Size2,
    pub shape: ShapeKind,
    pub studs: StudMode,
    pub color: ColorId,
}

impl Piece {
    /// A 1x1 square piece with full studs.
    pub fn new(coord: Coord2, color: ColorId) -> Self {
        Self {
            coord,
            size: Size2::UNIT,
            shape: ShapeKind::Square,
            studs: StudMode::Full,
            color,
        }
    }

    pub fn with_size(mut self, size: Size2) -> Self {
        self.resize(size);
        self
    }

    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_studs(mut self, studs: StudMode) -> Self {
        self.studs = studs;
        self
    }

    pub fn size(&self) -> Size2 {
        self.size
    }

    pub fn x(&self) -> i32 {
        self.coord.x
    }

    pub fn y(&self) -> i32 {
        self.coord.y
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    /// Change the footprint. Axes below 1 are clamped.
    pub fn resize(&mut self, size: Size2) {
        self.size = Size2::new(size.width, size.height);
    }

    /// A copy with a different footprint and every other field preserved.
    pub fn resized(&self, size: Size2) -> Self {
        let mut p = *self;
        p.resize(size);
        p
    }

    pub fn swap_size(&mut self) {
        self.size = self.size.swapped();
    }

    pub fn move_at(&mut self, coord: Coord2) {
        self.coord = coord;
    }

    pub fn moved_to(&self, coord: Coord2) -> Self {
        let mut p = *self;
        p.coord = coord;
        p
    }

    pub fn translate(&mut self, delta: Coord2) {
        self.coord = self.coord + delta;
    }

    pub fn dye(&mut self, color: ColorId) {
        self.color = color;
    }

    /// Whether `cell` lies inside the occupied rectangle.
    pub fn contains(&self, cell: Coord2) -> bool {
        cell.x >= self.coord.x
            && cell.x < self.coord.x + self.size.width
            && cell.y >= self.coord.y
            && cell.y < self.coord.y + self.size.height
    }

    /// Every occupied cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        (0..self.size.height).flat_map(move |dy| {
            (0..self.size.width).map(move |dx| Coord2::new(self.coord.x + dx, self.coord.y + dy))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::palette::ColorRegistry;

    fn lime() -> ColorId {
        ColorRegistry::builtin().lime()
    }

    #[test]
    fn test_new_piece_defaults() {
        let p = Piece::new(Coord2::new(2, 3), lime());
        assert_eq!(p.size(), Size2::UNIT);
        assert_eq!(p.shape, ShapeKind::Square);
        assert_eq!(p.studs, StudMode::Full);
    }

    #[test]
    fn test_resize_never_below_one() {
        let mut p = Piece::new(Coord2::default(), lime()).with_size(Size2::new(3, 2));
        p.resize(Size2 { width: 0, height: -4 });
        assert_eq!((p.width(), p.height()), (1, 1));
    }

    #[test]
    fn test_resized_preserves_other_fields() {
        let p = Piece::new(Coord2::new(5, 6), lime())
            .with_shape(ShapeKind::Round)
            .with_studs(StudMode::Centered);
        let q = p.resized(Size2::new(2, 4));
        assert_eq!(q.coord, p.coord);
        assert_eq!(q.shape, ShapeKind::Round);
        assert_eq!(q.studs, StudMode::Centered);
        assert_eq!(q.color, p.color);
        assert_eq!((q.width(), q.height()), (2, 4));
    }

    #[test]
    fn test_swap_size() {
        let mut p = Piece::new(Coord2::default(), lime()).with_size(Size2::new(1, 3));
        p.swap_size();
        assert_eq!((p.width(), p.height()), (3, 1));
    }

    #[test]
    fn test_contains_boundaries() {
        let p = Piece::new(Coord2::new(2, 1), lime()).with_size(Size2::new(3, 2));
        assert!(p.contains(Coord2::new(2, 1)));
        assert!(p.contains(Coord2::new(4, 2)));
        assert!(!p.contains(Coord2::new(1, 1)));
        assert!(!p.contains(Coord2::new(5, 1)));
        assert!(!p.contains(Coord2::new(2, 0)));
        assert!(!p.contains(Coord2::new(2, 3)));
    }

    #[test]
    fn test_cells_cover_footprint() {
        let p = Piece::new(Coord2::new(-1, 0), lime()).with_size(Size2::new(2, 3));
        let cells: Vec<Coord2> = p.cells().collect();
        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|c| p.contains(*c)));
    }

    #[test]
    fn test_stud_count_law() {
        let size = Size2::new(3, 4);
        assert_eq!(StudMode::Full.stud_count(size), 12);
        assert_eq!(StudMode::Centered.stud_count(size), 1);
        assert_eq!(StudMode::None.stud_count(size), 0);
    }

    #[test]
    fn test_stud_mode_cycle_returns() {
        let m = StudMode::Full;
        assert_eq!(m.cycled().cycled().cycled(), m);
        assert_eq!(ShapeKind::Square.toggled(), ShapeKind::Round);
    }
}
