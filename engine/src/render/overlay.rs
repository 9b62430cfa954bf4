//! 2D Layer Panels
//!
//! Builds the screen-space "blueprint" overlay: one square grid panel per
//! model layer, stacked top-most layer first. Each panel shows the layer
//! below as a faded guide, the layer's own pieces, and the hover
//! rectangle sized to the brush. Output is an indexed triangle mesh in
//! NDC, drawn after the 3D pass without depth.

use crate::editor::config::{EditorConfig, LayoutConfig, PanelRect};
use crate::editor::model::{Coord2, Coord3, LayerIndex, Model, Piece};
use crate::editor::palette::{ColorRegistry, fade, rgba_to_f32};
use crate::render::geometry::{Mesh, Vertex};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Grid line color (black, alpha 100).
pub const GRID_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 100.0 / 255.0];
pub const HOVER_FILL: [f32; 4] = [180.0 / 255.0, 0.0, 0.0, 100.0 / 255.0];
pub const HOVER_OUTLINE: [f32; 4] = [1.0, 0.0, 0.0, 200.0 / 255.0];

const GUIDE_FILL_FADE: f32 = 0.5;
const GUIDE_EDGE_FADE: f32 = 0.8;
const PIECE_EDGE_PX: f32 = 2.0;
const HOVER_EDGE_PX: f32 = 2.0;

// ============================================================================
// OVERLAY BUILDER
// ============================================================================

/// Accumulates pixel-space rectangles as NDC quads.
pub struct OverlayBuilder {
    mesh: Mesh,
    screen_width: f32,
    screen_height: f32,
}

impl OverlayBuilder {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            mesh: Mesh::new(),
            screen_width: screen_width.max(1.0),
            screen_height: screen_height.max(1.0),
        }
    }

    fn to_ndc(&self, x: f32, y: f32) -> glam::Vec3 {
        glam::Vec3::new(
            (x / self.screen_width) * 2.0 - 1.0,
            1.0 - (y / self.screen_height) * 2.0,
            0.0,
        )
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        let base = self.mesh.vertices.len() as u32;
        for (px, py) in [(x, y), (x + w, y), (x + w, y + h), (x, y + h)] {
            self.mesh.vertices.push(Vertex::colored(self.to_ndc(px, py), color));
        }
        self.mesh
            .indices
            .extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }

    /// Border drawn inside the rectangle.
    pub fn outline_rect(&mut self, x: f32, y: f32, w: f32, h: f32, thickness: f32, color: [f32; 4]) {
        let t = thickness.min(w / 2.0).min(h / 2.0);
        self.fill_rect(x, y, w, t, color);
        self.fill_rect(x, y + h - t, w, t, color);
        self.fill_rect(x, y + t, t, h - 2.0 * t, color);
        self.fill_rect(x + w - t, y + t, t, h - 2.0 * t, color);
    }

    pub fn quad_count(&self) -> usize {
        self.mesh.vertices.len() / 4
    }

    pub fn finish(self) -> Mesh {
        self.mesh
    }
}

// ============================================================================
// PANELS
// ============================================================================

/// What the panels highlight this frame.
#[derive(Debug, Clone, Copy)]
pub struct HoverState<'a> {
    pub hover: Option<Coord3>,
    pub brush: &'a Piece,
    /// Show the hover rectangle on every panel.
    pub on_all_layers: bool,
}

/// Pixel rectangle covered by a footprint inside a panel.
fn cell_rect(rect: PanelRect, cell_size: f32, at: Coord2, w: i32, h: i32) -> (f32, f32, f32, f32) {
    (
        rect.x + at.x as f32 * cell_size,
        rect.y + at.y as f32 * cell_size,
        w as f32 * cell_size,
        h as f32 * cell_size,
    )
}

/// Draw one panel for `layer` anchored at `rect`.
pub fn render_layer_grid_2d(
    out: &mut OverlayBuilder,
    rect: PanelRect,
    model: &Model,
    layer: LayerIndex,
    layout: &LayoutConfig,
    registry: &ColorRegistry,
    hover: &HoverState<'_>,
) {
    let Some(current) = model.layer(layer) else {
        return;
    };
    let cell = layout.cell_size;

    // Grid: grid_size + 1 lines each way, 1px.
    for i in 0..=layout.grid_size {
        let t = i as f32 * cell;
        out.fill_rect(rect.x + t, rect.y, 1.0, rect.height, GRID_COLOR);
        out.fill_rect(rect.x, rect.y + t, rect.width, 1.0, GRID_COLOR);
    }

    // Guide: the layer directly below.
    if let Some(below) = model.below(current) {
        for piece in below.pieces() {
            let color = registry.get(piece.color);
            let (x, y, w, h) = cell_rect(rect, cell, piece.coord, piece.width(), piece.height());
            out.fill_rect(x, y, w, h, fade(color.top(), GUIDE_FILL_FADE));
            out.outline_rect(x, y, w, h, 1.0, fade(color.edge(), GUIDE_EDGE_FADE));
        }
    }

    for piece in current.pieces() {
        let color = registry.get(piece.color);
        let (x, y, w, h) = cell_rect(rect, cell, piece.coord, piece.width(), piece.height());
        out.fill_rect(x, y, w, h, rgba_to_f32(color.top()));
        out.outline_rect(x, y, w, h, PIECE_EDGE_PX, rgba_to_f32(color.edge()));
    }

    if let Some(at) = hover.hover {
        if at.layer == layer || hover.on_all_layers {
            let brush = hover.brush;
            let (x, y, w, h) = cell_rect(rect, cell, at.xy(), brush.width(), brush.height());
            out.fill_rect(x, y, w, h, HOVER_FILL);
            out.outline_rect(x, y, w, h, HOVER_EDGE_PX, HOVER_OUTLINE);
        }
    }
}

/// All panels, top-most layer in the first slot.
pub fn build_overlay(
    model: &Model,
    registry: &ColorRegistry,
    config: &EditorConfig,
    hover: &HoverState<'_>,
    screen: (u32, u32),
) -> Mesh {
    let mut out = OverlayBuilder::new(screen.0 as f32, screen.1 as f32);
    let Some(last) = model.last_layer_index() else {
        return out.finish();
    };
    let layout = &config.layout;
    for slot in 0..model.layer_count() {
        let layer = layout.layer_for_slot(slot, last);
        render_layer_grid_2d(&mut out, layout.panel_rect(slot), model, layer, layout, registry, hover);
    }
    out.finish()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const GRID_QUADS: usize = 2 * 17;

    fn hover_state(brush: &Piece, hover: Option<Coord3>, all: bool) -> HoverState<'_> {
        HoverState {
            hover,
            brush,
            on_all_layers: all,
        }
    }

    #[test]
    fn test_ndc_corners() {
        let mut out = OverlayBuilder::new(200.0, 100.0);
        out.fill_rect(0.0, 0.0, 200.0, 100.0, [1.0; 4]);
        let mesh = out.finish();
        assert_eq!(mesh.vertices[0].position, [-1.0, 1.0, 0.0]);
        assert_eq!(mesh.vertices[2].position, [1.0, -1.0, 0.0]);
    }

    #[test]
    fn test_empty_model_draws_nothing() {
        let reg = ColorRegistry::builtin();
        let brush = Piece::new(Coord2::default(), reg.lime());
        let mesh = build_overlay(
            &Model::new("e"),
            &reg,
            &EditorConfig::default(),
            &hover_state(&brush, None, false),
            (800, 600),
        );
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_panel_contents() {
        let reg = ColorRegistry::builtin();
        let config = EditorConfig::default();
        let brush = Piece::new(Coord2::default(), reg.lime());
        let mut model = Model::with_layers("m", 2);
        model.add_piece(0, Piece::new(Coord2::new(1, 1), reg.lime()));
        model.add_piece(1, Piece::new(Coord2::new(4, 4), reg.white()));

        // Layer 1: grid, one guide piece (fill + 4 edges), own piece (fill + 4 edges).
        let mut out = OverlayBuilder::new(800.0, 600.0);
        let hover = hover_state(&brush, None, false);
        render_layer_grid_2d(&mut out, config.layout.panel_rect(0), &model, 1, &config.layout, &reg, &hover);
        assert_eq!(out.quad_count(), GRID_QUADS + 5 + 5);

        // Layer 0 has nothing below.
        let mut out = OverlayBuilder::new(800.0, 600.0);
        render_layer_grid_2d(&mut out, config.layout.panel_rect(1), &model, 0, &config.layout, &reg, &hover);
        assert_eq!(out.quad_count(), GRID_QUADS + 5);
    }

    #[test]
    fn test_hover_only_on_its_layer_unless_preferred() {
        let reg = ColorRegistry::builtin();
        let config = EditorConfig::default();
        let brush = Piece::new(Coord2::default(), reg.lime());
        let model = Model::with_layers("m", 2);
        let at = Some(Coord3::new(2, 2, 1));

        let count = |all: bool| {
            let mut out = OverlayBuilder::new(800.0, 600.0);
            let hover = hover_state(&brush, at, all);
            render_layer_grid_2d(&mut out, config.layout.panel_rect(1), &model, 0, &config.layout, &reg, &hover);
            out.quad_count()
        };
        assert_eq!(count(false), GRID_QUADS);
        assert_eq!(count(true), GRID_QUADS + 5);
    }
}
