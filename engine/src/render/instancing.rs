//! Per-Piece Instance Data
//!
//! One [`PieceInstance`] per drawn cube, cylinder or stud: a world
//! transform plus the four shades of the piece color. The fragment stage
//! picks top/left/right from the shades by surface normal; the edge shade
//! travels along for completeness but is only used by the outline pass.

use glam::Mat4;

use crate::editor::palette::PieceColor;

/// Layout (128 bytes, 16-byte aligned):
/// - model:  mat4x4<f32> (64 bytes), column-major
/// - shades: 4 x vec4<f32> (64 bytes), top/left/right/edge in 0..1
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PieceInstance {
    pub model: [[f32; 4]; 4],
    pub shades: [[f32; 4]; 4],
}

static_assertions::assert_eq_size!(PieceInstance, [u8; 128]);

impl PieceInstance {
    pub fn new(transform: Mat4, color: &PieceColor) -> Self {
        Self {
            model: transform.to_cols_array_2d(),
            shades: color.shades_f32(),
        }
    }

    /// World-space translation of this instance.
    pub fn translation(&self) -> [f32; 3] {
        let c = self.model[3];
        [c[0], c[1], c[2]]
    }
}

/// First shader location used by instance attributes; 0..=2 belong to
/// the per-vertex position/normal/color.
pub const INSTANCE_LOCATION_BASE: u32 = 3;

const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
    7 => Float32x4,
    8 => Float32x4,
    9 => Float32x4,
    10 => Float32x4,
];

/// Vertex buffer layout for [`PieceInstance`] (instance step mode).
pub fn instance_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<PieceInstance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRIBUTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_instance_size() {
        assert_eq!(std::mem::size_of::<PieceInstance>(), 128);
    }

    #[test]
    fn test_layout_covers_struct() {
        let layout = instance_buffer_layout();
        assert_eq!(layout.array_stride, 128);
        assert_eq!(layout.attributes.len(), 8);
        assert_eq!(layout.attributes[0].shader_location, INSTANCE_LOCATION_BASE);
        assert_eq!(layout.attributes[7].offset, 112);
    }

    #[test]
    fn test_shades_normalized() {
        let color = PieceColor::new("c", [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255], [0, 0, 0, 0]]);
        let inst = PieceInstance::new(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)), &color);
        assert_eq!(inst.shades[0], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(inst.shades[2], [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(inst.translation(), [1.0, 2.0, 3.0]);
    }
}
