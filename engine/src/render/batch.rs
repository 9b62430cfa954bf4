//! GPU Batches
//!
//! [`InstanceBatch`] pairs one static base mesh with a growable instance
//! buffer. [`DynamicMesh`] holds per-frame vertices (outlines, overlay).
//! Both skip their draw entirely when there is nothing to draw.

use crate::render::geometry::{Mesh, Vertex};
use crate::render::gpu_context::GpuContext;
use crate::render::instancing::PieceInstance;

/// Smallest buffer allocated, in elements.
const MIN_CAPACITY: usize = 64;

fn grown_capacity(current: usize, needed: usize) -> usize {
    if needed <= current {
        current
    } else {
        needed.next_power_of_two().max(MIN_CAPACITY)
    }
}

/// One instanced draw: base mesh times N piece instances.
pub struct InstanceBatch {
    label: String,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: wgpu::Buffer,
    capacity: usize,
    count: u32,
}

impl InstanceBatch {
    pub fn new(ctx: &GpuContext, label: &str, mesh: &Mesh) -> Self {
        Self {
            label: label.to_string(),
            vertex_buffer: ctx.create_vertex_buffer(&format!("{label} Vertices"), &mesh.vertices),
            index_buffer: ctx.create_index_buffer(&format!("{label} Indices"), &mesh.indices),
            index_count: mesh.indices.len() as u32,
            instance_buffer: Self::allocate(ctx, label, MIN_CAPACITY),
            capacity: MIN_CAPACITY,
            count: 0,
        }
    }

    fn allocate(ctx: &GpuContext, label: &str, capacity: usize) -> wgpu::Buffer {
        ctx.create_dynamic_buffer(
            &format!("{label} Instances"),
            (capacity * std::mem::size_of::<PieceInstance>()) as u64,
            wgpu::BufferUsages::VERTEX,
        )
    }

    /// Replace this frame's instances, growing the buffer if needed.
    pub fn upload(&mut self, ctx: &GpuContext, instances: &[PieceInstance]) {
        let capacity = grown_capacity(self.capacity, instances.len());
        if capacity != self.capacity {
            log::debug!("{}: instance buffer {} -> {}", self.label, self.capacity, capacity);
            self.instance_buffer = Self::allocate(ctx, &self.label, capacity);
            self.capacity = capacity;
        }
        if !instances.is_empty() {
            ctx.write_buffer(&self.instance_buffer, instances);
        }
        self.count = instances.len() as u32;
    }

    pub fn instance_count(&self) -> u32 {
        self.count
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..self.count);
    }
}

/// Vertices (and optional indices) rewritten every frame.
pub struct DynamicMesh {
    label: String,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_buffer: wgpu::Buffer,
    index_capacity: usize,
    vertex_count: u32,
    index_count: u32,
}

impl DynamicMesh {
    pub fn new(ctx: &GpuContext, label: &str) -> Self {
        Self {
            label: label.to_string(),
            vertex_buffer: Self::allocate_vertices(ctx, label, MIN_CAPACITY),
            vertex_capacity: MIN_CAPACITY,
            index_buffer: Self::allocate_indices(ctx, label, MIN_CAPACITY),
            index_capacity: MIN_CAPACITY,
            vertex_count: 0,
            index_count: 0,
        }
    }

    fn allocate_vertices(ctx: &GpuContext, label: &str, capacity: usize) -> wgpu::Buffer {
        ctx.create_dynamic_buffer(
            &format!("{label} Vertices"),
            (capacity * std::mem::size_of::<Vertex>()) as u64,
            wgpu::BufferUsages::VERTEX,
        )
    }

    fn allocate_indices(ctx: &GpuContext, label: &str, capacity: usize) -> wgpu::Buffer {
        ctx.create_dynamic_buffer(
            &format!("{label} Indices"),
            (capacity * std::mem::size_of::<u32>()) as u64,
            wgpu::BufferUsages::INDEX,
        )
    }

    /// Upload vertices; with an empty `indices` slice the mesh draws
    /// non-indexed (line lists).
    pub fn upload(&mut self, ctx: &GpuContext, vertices: &[Vertex], indices: &[u32]) {
        let vcap = grown_capacity(self.vertex_capacity, vertices.len());
        if vcap != self.vertex_capacity {
            self.vertex_buffer = Self::allocate_vertices(ctx, &self.label, vcap);
            self.vertex_capacity = vcap;
        }
        let icap = grown_capacity(self.index_capacity, indices.len());
        if icap != self.index_capacity {
            self.index_buffer = Self::allocate_indices(ctx, &self.label, icap);
            self.index_capacity = icap;
        }
        if !vertices.is_empty() {
            ctx.write_buffer(&self.vertex_buffer, vertices);
        }
        if !indices.is_empty() {
            ctx.write_buffer(&self.index_buffer, indices);
        }
        self.vertex_count = vertices.len() as u32;
        self.index_count = indices.len() as u32;
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.vertex_count == 0 {
            return;
        }
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        if self.index_count > 0 {
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.index_count, 0, 0..1);
        } else {
            pass.draw(0..self.vertex_count, 0..1);
        }
    }
}
