//! Uniform Buffer Structures
//!
//! Uniforms shared by the piece and line pipelines.

use bytemuck::{Pod, Zeroable};

/// Layout (80 bytes):
/// - view_proj: mat4x4<f32> (64 bytes)
/// - params:    vec4<f32>   (16 bytes), x = up threshold, yzw unused
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub params: [f32; 4],
}

static_assertions::assert_eq_size!(SceneUniforms, [u8; 80]);

impl SceneUniforms {
    pub fn new(view_proj: [[f32; 4]; 4], up_threshold: f32) -> Self {
        Self {
            view_proj,
            params: [up_threshold, 0.0, 0.0, 0.0],
        }
    }
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self::new(glam::Mat4::IDENTITY.to_cols_array_2d(), 0.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_size_is_16_aligned() {
        assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
        assert_eq!(SceneUniforms::default().params[0], 0.3);
    }
}
