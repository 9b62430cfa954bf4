//! Grid Coordinates
//!
//! Integer value types shared by the model, the input handler and the
//! renderer. A layer is a 2D grid of cells; a 3D coordinate is a cell
//! projected into a specific layer.

use std::ops::{Add, Sub};

/// Index of a layer inside a [`super::Model`]. Signed so that "below the
/// bottom" can be expressed and rejected instead of wrapping.
pub type LayerIndex = i32;

/// A cell in a layer's local 2D plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Coord2 {
    pub x: i32,
    pub y: i32,
}

impl Coord2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Project this cell into a layer.
    pub const fn on_layer(self, layer: LayerIndex) -> Coord3 {
        Coord3 {
            x: self.x,
            y: self.y,
            layer,
        }
    }
}

impl Add for Coord2 {
    type Output = Coord2;

    fn add(self, rhs: Coord2) -> Coord2 {
        Coord2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord2 {
    type Output = Coord2;

    fn sub(self, rhs: Coord2) -> Coord2 {
        Coord2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A cell plus the layer it lives on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Coord3 {
    pub x: i32,
    pub y: i32,
    pub layer: LayerIndex,
}

impl Coord3 {
    pub const fn new(x: i32, y: i32, layer: LayerIndex) -> Self {
        Self { x, y, layer }
    }

    /// The 2D projection of this coordinate (drops the layer).
    pub const fn xy(self) -> Coord2 {
        Coord2 {
            x: self.x,
            y: self.y,
        }
    }
}

/// Footprint of a piece in grid cells. Both axes are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size2 {
    pub width: i32,
    pub height: i32,
}

impl Size2 {
    pub const UNIT: Size2 = Size2 {
        width: 1,
        height: 1,
    };

    /// Create a size, clamping both axes to the 1-cell minimum.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Width and height exchanged (a 90 degree turn of the footprint).
    pub const fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Number of unit cells covered.
    pub const fn area(self) -> i32 {
        self.width * self.height
    }
}

impl Default for Size2 {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Compass direction used to nudge the whole model one cell.
///
/// The y axis grows "south", matching the top-down 2D panels where
/// screen y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Unit cell offset for this direction.
    pub const fn offset(self) -> Coord2 {
        match self {
            Direction::North => Coord2::new(0, -1),
            Direction::East => Coord2::new(1, 0),
            Direction::South => Coord2::new(0, 1),
            Direction::West => Coord2::new(-1, 0),
        }
    }
}
