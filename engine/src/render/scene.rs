//! Scene Collection
//!
//! CPU half of the 3D pass. Walks the model once per frame, computes each
//! piece's world transform and sorts the resulting instances into one
//! batch per base shape (cube, cylinder, stud). Outlines in the piece edge
//! shade and the baseline reference grid are produced as line lists.
//!
//! Transform of a piece on layer `l` at `(x, y)` with footprint `w x h`:
//!
//! ```text
//! translate(0, l * height, 0)
//!   * translate((x + w/2) * side, height/2, (y + h/2) * side)
//!   * scale(w, 1, h)
//! ```

use glam::{Mat4, Vec3};

use crate::editor::config::{BlockDimensions, ShadingConfig};
use crate::editor::model::{LayerIndex, Model, Piece, ShapeKind, StudMode};
use crate::editor::palette::{ColorRegistry, Shade, rgba_to_f32};
use crate::render::geometry::LineList;
use crate::render::instancing::PieceInstance;

/// Color of the baseline reference grid.
pub const BASELINE_COLOR: [f32; 4] = [80.0 / 255.0, 80.0 / 255.0, 80.0 / 255.0, 100.0 / 255.0];

/// Which base mesh a batch instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchKind {
    Cube,
    Cylinder,
    Stud,
}

impl BatchKind {
    pub const ALL: [BatchKind; 3] = [BatchKind::Cube, BatchKind::Cylinder, BatchKind::Stud];

    pub fn for_shape(shape: ShapeKind) -> Self {
        match shape {
            ShapeKind::Square => BatchKind::Cube,
            ShapeKind::Round => BatchKind::Cylinder,
        }
    }
}

/// Everything the 3D pass draws for one frame.
#[derive(Debug, Clone, Default)]
pub struct SceneInstances {
    pub cubes: Vec<PieceInstance>,
    pub cylinders: Vec<PieceInstance>,
    pub studs: Vec<PieceInstance>,
    pub outlines: LineList,
}

impl SceneInstances {
    pub fn batch(&self, kind: BatchKind) -> &[PieceInstance] {
        match kind {
            BatchKind::Cube => &self.cubes,
            BatchKind::Cylinder => &self.cylinders,
            BatchKind::Stud => &self.studs,
        }
    }

    fn batch_mut(&mut self, kind: BatchKind) -> &mut Vec<PieceInstance> {
        match kind {
            BatchKind::Cube => &mut self.cubes,
            BatchKind::Cylinder => &mut self.cylinders,
            BatchKind::Stud => &mut self.studs,
        }
    }

    /// Instanced draws to issue: one per non-empty batch.
    pub fn draw_list(&self) -> Vec<(BatchKind, u32)> {
        BatchKind::ALL
            .into_iter()
            .map(|kind| (kind, self.batch(kind).len() as u32))
            .filter(|&(_, count)| count > 0)
            .collect()
    }

    pub fn instance_count(&self) -> usize {
        self.cubes.len() + self.cylinders.len() + self.studs.len()
    }
}

// ============================================================================
// TRANSFORMS
// ============================================================================

pub fn layer_transform(layer: LayerIndex, dims: &BlockDimensions) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, layer as f32 * dims.height, 0.0))
}

/// World transform of a piece's base mesh.
pub fn piece_transform(layer: LayerIndex, piece: &Piece, dims: &BlockDimensions) -> Mat4 {
    let (w, h) = (piece.width() as f32, piece.height() as f32);
    let center = Vec3::new(
        (piece.x() as f32 + w / 2.0) * dims.side,
        dims.height / 2.0,
        (piece.y() as f32 + h / 2.0) * dims.side,
    );
    layer_transform(layer, dims) * Mat4::from_translation(center) * Mat4::from_scale(Vec3::new(w, 1.0, h))
}

/// Stud base points in layer space, on top of the piece.
pub fn stud_positions(piece: &Piece, dims: &BlockDimensions) -> Vec<Vec3> {
    match piece.studs {
        StudMode::None => Vec::new(),
        StudMode::Centered => vec![Vec3::new(
            (piece.x() as f32 + piece.width() as f32 / 2.0) * dims.side,
            dims.height,
            (piece.y() as f32 + piece.height() as f32 / 2.0) * dims.side,
        )],
        StudMode::Full => piece
            .cells()
            .map(|c| {
                Vec3::new(
                    (c.x as f32 + 0.5) * dims.side,
                    dims.height,
                    (c.y as f32 + 0.5) * dims.side,
                )
            })
            .collect(),
    }
}

/// Face shade for a world-space normal: up when `n.y > threshold`,
/// otherwise right for positive `n.x` and left for the rest. Mirrors the
/// fragment shader.
pub fn classify_face(normal: Vec3, shading: &ShadingConfig) -> Shade {
    if normal.y > shading.up_threshold {
        Shade::Top
    } else if normal.x > 0.0 {
        Shade::Right
    } else {
        Shade::Left
    }
}

// ============================================================================
// COLLECTION
// ============================================================================

/// Batch every piece of `model`. Empty layers contribute nothing.
pub fn collect_scene(model: &Model, registry: &ColorRegistry, dims: &BlockDimensions) -> SceneInstances {
    let mut scene = SceneInstances::default();

    for (layer, piece) in model.pieces() {
        let color = registry.get(piece.color);
        let transform = piece_transform(layer, piece, dims);
        scene
            .batch_mut(BatchKind::for_shape(piece.shape))
            .push(PieceInstance::new(transform, color));

        let layer_tf = layer_transform(layer, dims);
        for base in stud_positions(piece, dims) {
            let stud_tf = layer_tf * Mat4::from_translation(base);
            scene.studs.push(PieceInstance::new(stud_tf, color));
        }

        push_outline(&mut scene.outlines, layer, piece, dims, rgba_to_f32(color.edge()));
    }

    scene
}

fn push_outline(lines: &mut LineList, layer: LayerIndex, piece: &Piece, dims: &BlockDimensions, edge: [f32; 4]) {
    let transform = piece_transform(layer, piece, dims);
    let half = Vec3::new(dims.side, dims.height, dims.side) * 0.5;
    match piece.shape {
        ShapeKind::Square => lines.push_box(transform, half, edge),
        ShapeKind::Round => {
            lines.push_ring(transform, half.x, -half.y, dims.segments, edge);
            lines.push_ring(transform, half.x, half.y, dims.segments, edge);
            // Four fixed generatrices, not view-dependent silhouettes.
            for (x, z) in [(half.x, 0.0), (-half.x, 0.0), (0.0, half.z), (0.0, -half.z)] {
                lines.push(
                    transform.transform_point3(Vec3::new(x, -half.y, z)),
                    transform.transform_point3(Vec3::new(x, half.y, z)),
                    edge,
                );
            }
        }
    }

    let layer_tf = layer_transform(layer, dims);
    let radius = dims.stud_diameter * 0.5;
    for base in stud_positions(piece, dims) {
        let stud_tf = layer_tf * Mat4::from_translation(base);
        lines.push_ring(stud_tf, radius, 0.0, dims.segments, edge);
        lines.push_ring(stud_tf, radius, dims.stud_height, dims.segments, edge);
    }
}

/// `grid_size x grid_size` cell grid on the ground plane of layer 0.
pub fn baseline_grid(grid_size: u32, dims: &BlockDimensions) -> LineList {
    let mut lines = LineList::new();
    let extent = grid_size as f32 * dims.side;
    for i in 0..=grid_size {
        let t = i as f32 * dims.side;
        lines.push(Vec3::new(t, 0.0, 0.0), Vec3::new(t, 0.0, extent), BASELINE_COLOR);
        lines.push(Vec3::new(0.0, 0.0, t), Vec3::new(extent, 0.0, t), BASELINE_COLOR);
    }
    lines
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::model::{Coord2, Size2};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_piece_transform_center_and_scale() {
        let dims = BlockDimensions::default();
        let reg = ColorRegistry::builtin();
        let piece = Piece::new(Coord2::new(1, 2), reg.lime()).with_size(Size2::new(2, 3));
        let m = piece_transform(2, &piece, &dims);

        let center = m.transform_point3(Vec3::ZERO);
        assert!(approx(center, Vec3::new(2.0 * 3.8, 2.0 * 3.1 + 1.55, 3.5 * 3.8)));

        // A unit-cell corner lands on the footprint corner.
        let corner = m.transform_point3(Vec3::new(-1.9, -1.55, -1.9));
        assert!(approx(corner, Vec3::new(3.8, 6.2, 7.6)));
    }

    #[test]
    fn test_face_classification() {
        let shading = ShadingConfig::default();
        assert_eq!(classify_face(Vec3::Y, &shading), Shade::Top);
        assert_eq!(classify_face(Vec3::new(0.0, 0.31, 0.95), &shading), Shade::Top);
        assert_eq!(classify_face(Vec3::new(0.0, 0.3, -1.0), &shading), Shade::Left);
        assert_eq!(classify_face(Vec3::X, &shading), Shade::Right);
        assert_eq!(classify_face(Vec3::NEG_X, &shading), Shade::Left);
        assert_eq!(classify_face(Vec3::Z, &shading), Shade::Left);
        assert_eq!(classify_face(Vec3::NEG_Y, &shading), Shade::Left);
    }

    #[test]
    fn test_batches_split_by_shape() {
        let dims = BlockDimensions::default();
        let reg = ColorRegistry::builtin();
        let mut model = Model::with_layers("m", 2);
        model.add_piece(0, Piece::new(Coord2::new(0, 0), reg.lime()).with_studs(StudMode::None));
        model.add_piece(
            1,
            Piece::new(Coord2::new(0, 0), reg.white())
                .with_shape(ShapeKind::Round)
                .with_studs(StudMode::Centered),
        );

        let scene = collect_scene(&model, &reg, &dims);
        assert_eq!(scene.cubes.len(), 1);
        assert_eq!(scene.cylinders.len(), 1);
        assert_eq!(scene.studs.len(), 1);
        assert_eq!(
            scene.draw_list(),
            vec![(BatchKind::Cube, 1), (BatchKind::Cylinder, 1), (BatchKind::Stud, 1)]
        );
        // 12 box edges, 2 rings and 4 generatrices, 2 stud rings.
        let seg = dims.segments as usize;
        assert_eq!(scene.outlines.len(), 12 + 2 * seg + 4 + 2 * seg);
    }

    #[test]
    fn test_empty_batches_not_listed() {
        let dims = BlockDimensions::default();
        let reg = ColorRegistry::builtin();
        let mut model = Model::with_layers("m", 1);
        model.add_piece(0, Piece::new(Coord2::new(3, 3), reg.lime()).with_studs(StudMode::None));
        let scene = collect_scene(&model, &reg, &dims);
        assert_eq!(scene.draw_list(), vec![(BatchKind::Cube, 1)]);
    }

    #[test]
    fn test_stud_outline_has_top_and_bottom_rings() {
        let dims = BlockDimensions::default();
        let reg = ColorRegistry::builtin();
        let mut model = Model::with_layers("m", 1);
        model.add_piece(0, Piece::new(Coord2::new(0, 0), reg.lime()).with_studs(StudMode::Centered));

        let scene = collect_scene(&model, &reg, &dims);
        let seg = dims.segments as usize;
        assert_eq!(scene.outlines.len(), 12 + 2 * seg);

        // Box edges come first; every stud ring vertex sits on the piece top
        // or on the stud top.
        let ring_heights: Vec<f32> = scene.outlines.vertices[24..].iter().map(|v| v.position[1]).collect();
        let bottom = dims.height;
        let top = dims.height + dims.stud_height;
        assert!(ring_heights.iter().all(|y| (y - bottom).abs() < 1e-4 || (y - top).abs() < 1e-4));
        assert_eq!(ring_heights.iter().filter(|y| (*y - bottom).abs() < 1e-4).count(), 2 * seg);
        assert_eq!(ring_heights.iter().filter(|y| (*y - top).abs() < 1e-4).count(), 2 * seg);
    }

    #[test]
    fn test_baseline_grid_line_count() {
        let lines = baseline_grid(16, &BlockDimensions::default());
        assert_eq!(lines.len(), 34);
        assert!(lines.vertices.iter().all(|v| v.position[1] == 0.0));
        assert!(lines.vertices.iter().all(|v| v.color == BASELINE_COLOR));
        assert!((BASELINE_COLOR[3] - 100.0 / 255.0).abs() < 1e-6);
    }
}
