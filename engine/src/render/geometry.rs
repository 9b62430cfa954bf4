//! Base Geometry
//!
//! Shared vertex format and the three base meshes every piece is drawn
//! from: a block-sized cube, a block-sized cylinder and a stud. Meshes are
//! built once at startup from [`BlockDimensions`] and scaled per instance.
//!
//! Also hosts the CPU-side line builder used for outlines and the
//! baseline grid.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use crate::editor::config::BlockDimensions;

// ============================================================================
// VERTEX FORMAT
// ============================================================================

/// Position, normal and color; 40 bytes. Piece meshes leave the color
/// white, lines and overlay quads leave the normal zero.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(Vertex, [u8; 40]);

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x4,
];

impl Vertex {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    pub fn solid(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color: Self::WHITE,
        }
    }

    pub fn colored(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            normal: [0.0; 3],
            color,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        }
    }
}

/// Indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Quad `center ± u ± v`, counter-clockwise when `u x v` faces the viewer.
    fn push_face(&mut self, center: Vec3, u: Vec3, v: Vec3, normal: Vec3) {
        let base = self.vertices.len() as u32;
        for corner in [center - u - v, center + u - v, center + u + v, center - u + v] {
            self.vertices.push(Vertex::solid(corner, normal));
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

// ============================================================================
// BASE MESHES
// ============================================================================

/// One cell footprint, one layer tall, centered on the origin.
pub fn cube_mesh(dims: &BlockDimensions) -> Mesh {
    let hx = Vec3::X * dims.side * 0.5;
    let hy = Vec3::Y * dims.height * 0.5;
    let hz = Vec3::Z * dims.side * 0.5;

    let mut mesh = Mesh::new();
    mesh.push_face(hx, hy, hz, Vec3::X);
    mesh.push_face(-hx, hz, hy, Vec3::NEG_X);
    mesh.push_face(hy, hz, hx, Vec3::Y);
    mesh.push_face(-hy, hx, hz, Vec3::NEG_Y);
    mesh.push_face(hz, hx, hy, Vec3::Z);
    mesh.push_face(-hz, hy, hx, Vec3::NEG_Z);
    mesh
}

/// Capped cylinder around the Y axis from `y0` to `y1`.
pub fn cylinder_mesh(radius: f32, y0: f32, y1: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let mut mesh = Mesh::new();

    // Side: a bottom/top pair per ring step, seam duplicated.
    for i in 0..=segments {
        let (sin, cos) = (TAU * i as f32 / segments as f32).sin_cos();
        let normal = Vec3::new(cos, 0.0, sin);
        mesh.vertices
            .push(Vertex::solid(Vec3::new(radius * cos, y0, radius * sin), normal));
        mesh.vertices
            .push(Vertex::solid(Vec3::new(radius * cos, y1, radius * sin), normal));
    }
    for i in 0..segments {
        let (b0, t0, b1, t1) = (2 * i, 2 * i + 1, 2 * i + 2, 2 * i + 3);
        mesh.indices.extend_from_slice(&[b0, t0, t1, b0, t1, b1]);
    }

    push_cap(&mut mesh, radius, y1, segments, Vec3::Y);
    push_cap(&mut mesh, radius, y0, segments, Vec3::NEG_Y);
    mesh
}

fn push_cap(mesh: &mut Mesh, radius: f32, y: f32, segments: u32, normal: Vec3) {
    let center = mesh.vertices.len() as u32;
    mesh.vertices.push(Vertex::solid(Vec3::new(0.0, y, 0.0), normal));
    for i in 0..=segments {
        let (sin, cos) = (TAU * i as f32 / segments as f32).sin_cos();
        mesh.vertices
            .push(Vertex::solid(Vec3::new(radius * cos, y, radius * sin), normal));
    }
    for i in 0..segments {
        let (a, b) = (center + 1 + i, center + 2 + i);
        if normal.y > 0.0 {
            mesh.indices.extend_from_slice(&[center, b, a]);
        } else {
            mesh.indices.extend_from_slice(&[center, a, b]);
        }
    }
}

/// Round piece base: inscribed in one cell, one layer tall, centered.
pub fn round_mesh(dims: &BlockDimensions) -> Mesh {
    let h = dims.height * 0.5;
    cylinder_mesh(dims.side * 0.5, -h, h, dims.segments)
}

/// Stud standing on the origin.
pub fn stud_mesh(dims: &BlockDimensions) -> Mesh {
    cylinder_mesh(dims.stud_diameter * 0.5, 0.0, dims.stud_height, dims.segments)
}

// ============================================================================
// LINES
// ============================================================================

/// Line-list vertices (two per segment).
#[derive(Debug, Clone, Default)]
pub struct LineList {
    pub vertices: Vec<Vertex>,
}

impl LineList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn push(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        self.vertices.push(Vertex::colored(a, color));
        self.vertices.push(Vertex::colored(b, color));
    }

    /// The 12 edges of the box `±half`, moved by `transform`.
    pub fn push_box(&mut self, transform: Mat4, half: Vec3, color: [f32; 4]) {
        let corner = |sx: f32, sy: f32, sz: f32| {
            transform.transform_point3(Vec3::new(sx * half.x, sy * half.y, sz * half.z))
        };
        for (sy, sz) in [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
            self.push(corner(-1.0, sy, sz), corner(1.0, sy, sz), color);
        }
        for (sx, sz) in [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
            self.push(corner(sx, -1.0, sz), corner(sx, 1.0, sz), color);
        }
        for (sx, sy) in [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
            self.push(corner(sx, sy, -1.0), corner(sx, sy, 1.0), color);
        }
    }

    /// Horizontal circle of `radius` at height `y`, moved by `transform`.
    pub fn push_ring(&mut self, transform: Mat4, radius: f32, y: f32, segments: u32, color: [f32; 4]) {
        let segments = segments.max(3);
        let point = |i: u32| {
            let (sin, cos) = (TAU * i as f32 / segments as f32).sin_cos();
            transform.transform_point3(Vec3::new(radius * cos, y, radius * sin))
        };
        for i in 0..segments {
            self.push(point(i), point(i + 1), color);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(mesh: &Mesh, tri: usize) -> Vec3 {
        let i = &mesh.indices[tri * 3..tri * 3 + 3];
        let p = |k: usize| Vec3::from_array(mesh.vertices[i[k] as usize].position);
        (p(1) - p(0)).cross(p(2) - p(0))
    }

    #[test]
    fn test_vertex_size() {
        assert_eq!(std::mem::size_of::<Vertex>(), 40);
        assert_eq!(Vertex::layout().array_stride, 40);
    }

    #[test]
    fn test_cube_extent_and_winding() {
        let dims = BlockDimensions::default();
        let mesh = cube_mesh(&dims);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);

        let max_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        let max_x = mesh.vertices.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert!((max_y - dims.height / 2.0).abs() < 1e-5);
        assert!((max_x - dims.side / 2.0).abs() < 1e-5);

        // Every triangle winds counter-clockwise around its vertex normal.
        for tri in 0..12 {
            let n = Vec3::from_array(mesh.vertices[mesh.indices[tri * 3] as usize].normal);
            assert!(face_normal(&mesh, tri).dot(n) > 0.0, "triangle {tri}");
        }
    }

    #[test]
    fn test_cylinder_winding_outward() {
        let mesh = cylinder_mesh(1.0, 0.0, 2.0, 16);
        for tri in 0..mesh.indices.len() / 3 {
            let i = &mesh.indices[tri * 3..tri * 3 + 3];
            let n: Vec3 = i
                .iter()
                .map(|&k| Vec3::from_array(mesh.vertices[k as usize].normal))
                .sum();
            assert!(face_normal(&mesh, tri).dot(n) > 0.0, "triangle {tri}");
        }
    }

    #[test]
    fn test_stud_sits_on_origin() {
        let dims = BlockDimensions::default();
        let mesh = stud_mesh(&dims);
        let min_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        let max_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert_eq!(min_y, 0.0);
        assert!((max_y - dims.stud_height).abs() < 1e-5);
    }

    #[test]
    fn test_box_outline_has_twelve_edges() {
        let mut lines = LineList::new();
        lines.push_box(Mat4::IDENTITY, Vec3::ONE, [0.0; 4]);
        assert_eq!(lines.len(), 12);
        lines.push_ring(Mat4::IDENTITY, 1.0, 0.0, 8, [0.0; 4]);
        assert_eq!(lines.len(), 20);
    }
}
