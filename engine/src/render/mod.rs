//! Render Module
//!
//! wgpu rendering for the editor. The CPU halves (`scene`, `overlay`,
//! `geometry`) build instance and vertex data from the model and are
//! testable without a device; `gpu_context`, `batch` and `renderer` own
//! the GPU side.

pub mod batch;
pub mod geometry;
pub mod gpu_context;
pub mod instancing;
pub mod overlay;
pub mod renderer;
pub mod scene;
pub mod uniforms;

pub use batch::{DynamicMesh, InstanceBatch};
pub use geometry::{LineList, Mesh, Vertex, cube_mesh, cylinder_mesh, round_mesh, stud_mesh};
pub use gpu_context::{GpuContext, GpuContextConfig, GpuError};
pub use instancing::{PieceInstance, instance_buffer_layout};
pub use overlay::{HoverState, OverlayBuilder, build_overlay, render_layer_grid_2d};
pub use renderer::{GraphicsResources, Renderer};
pub use scene::{
    BatchKind, SceneInstances, baseline_grid, classify_face, collect_scene, piece_transform,
    stud_positions,
};
pub use uniforms::SceneUniforms;
