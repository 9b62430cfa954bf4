//! Renderer
//!
//! [`GraphicsResources`] is created once at startup and owns pipelines,
//! the scene uniform buffer and the three base-shape batches. The
//! [`Renderer`] borrows it every frame: collect instances on the CPU,
//! upload, then draw pieces, outlines and the baseline grid with depth,
//! and finally the 2D panels on top.

use crate::editor::session::EditorSession;
use crate::render::batch::{DynamicMesh, InstanceBatch};
use crate::render::geometry::{Vertex, cube_mesh, round_mesh, stud_mesh};
use crate::render::gpu_context::{DEPTH_FORMAT, GpuContext};
use crate::render::instancing::instance_buffer_layout;
use crate::render::overlay::{HoverState, build_overlay};
use crate::render::scene::{BatchKind, baseline_grid, collect_scene};
use crate::render::uniforms::SceneUniforms;

pub const FLAT_SHADING_WGSL: &str = include_str!("../../../shaders/flat_shading.wgsl");
pub const LINE_WGSL: &str = include_str!("../../../shaders/line.wgsl");
pub const OVERLAY_WGSL: &str = include_str!("../../../shaders/overlay.wgsl");

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.92,
    g: 0.92,
    b: 0.94,
    a: 1.0,
};

/// Pipelines, uniforms and static batches. Lives from startup to shutdown.
pub struct GraphicsResources {
    piece_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    overlay_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    cubes: InstanceBatch,
    cylinders: InstanceBatch,
    studs: InstanceBatch,
}

struct PipelineDesc<'a> {
    label: &'a str,
    source: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    /// Depth-tested; otherwise drawn over everything.
    depth_test: bool,
    blend: wgpu::BlendState,
}

fn create_pipeline(ctx: &GpuContext, desc: PipelineDesc<'_>) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{} Shader", desc.label)),
        source: wgpu::ShaderSource::Wgsl(desc.source.into()),
    });

    let layout = ctx
        .device
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Pipeline Layout", desc.label)),
            bind_group_layouts: desc.bind_group_layouts,
            push_constant_ranges: &[],
        });

    ctx.device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Pipeline", desc.label)),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: desc.buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.format(),
                    blend: Some(desc.blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: desc.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            // Every pipeline shares the pass depth attachment.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: desc.depth_test,
                depth_compare: if desc.depth_test {
                    wgpu::CompareFunction::LessEqual
                } else {
                    wgpu::CompareFunction::Always
                },
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
}

impl GraphicsResources {
    pub fn new(ctx: &GpuContext, session: &EditorSession) -> Self {
        let dims = &session.config.blocks;

        let uniform_buffer = ctx.create_uniform_buffer("Scene Uniforms", &SceneUniforms::default());
        let scene_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Scene Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
        let scene_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let piece_pipeline = create_pipeline(
            ctx,
            PipelineDesc {
                label: "Piece",
                source: FLAT_SHADING_WGSL,
                buffers: &[Vertex::layout(), instance_buffer_layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                bind_group_layouts: &[&scene_layout],
                depth_test: true,
                blend: wgpu::BlendState::REPLACE,
            },
        );
        let line_pipeline = create_pipeline(
            ctx,
            PipelineDesc {
                label: "Line",
                source: LINE_WGSL,
                buffers: &[Vertex::layout()],
                topology: wgpu::PrimitiveTopology::LineList,
                bind_group_layouts: &[&scene_layout],
                depth_test: true,
                blend: wgpu::BlendState::ALPHA_BLENDING,
            },
        );
        let overlay_pipeline = create_pipeline(
            ctx,
            PipelineDesc {
                label: "Overlay",
                source: OVERLAY_WGSL,
                buffers: &[Vertex::layout()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                bind_group_layouts: &[&scene_layout],
                depth_test: false,
                blend: wgpu::BlendState::ALPHA_BLENDING,
            },
        );

        log::info!("Graphics resources ready ({} segments per round mesh)", dims.segments);

        Self {
            piece_pipeline,
            line_pipeline,
            overlay_pipeline,
            uniform_buffer,
            scene_bind_group,
            cubes: InstanceBatch::new(ctx, "Cube", &cube_mesh(dims)),
            cylinders: InstanceBatch::new(ctx, "Cylinder", &round_mesh(dims)),
            studs: InstanceBatch::new(ctx, "Stud", &stud_mesh(dims)),
        }
    }

    fn batch(&self, kind: BatchKind) -> &InstanceBatch {
        match kind {
            BatchKind::Cube => &self.cubes,
            BatchKind::Cylinder => &self.cylinders,
            BatchKind::Stud => &self.studs,
        }
    }

    fn batch_mut(&mut self, kind: BatchKind) -> &mut InstanceBatch {
        match kind {
            BatchKind::Cube => &mut self.cubes,
            BatchKind::Cylinder => &mut self.cylinders,
            BatchKind::Stud => &mut self.studs,
        }
    }
}

/// Per-frame drawing on top of [`GraphicsResources`].
pub struct Renderer {
    resources: GraphicsResources,
    lines: DynamicMesh,
    overlay: DynamicMesh,
}

impl Renderer {
    pub fn new(ctx: &GpuContext, resources: GraphicsResources) -> Self {
        Self {
            resources,
            lines: DynamicMesh::new(ctx, "Lines"),
            overlay: DynamicMesh::new(ctx, "Overlay"),
        }
    }

    /// Draw one frame of `session`.
    pub fn render(&mut self, ctx: &GpuContext, session: &EditorSession) -> Result<(), wgpu::SurfaceError> {
        let config = &session.config;
        let scene = collect_scene(&session.model, &session.registry, &config.blocks);

        for kind in BatchKind::ALL {
            self.resources.batch_mut(kind).upload(ctx, scene.batch(kind));
        }

        let mut lines = baseline_grid(config.layout.grid_size, &config.blocks);
        lines.vertices.extend_from_slice(&scene.outlines.vertices);
        self.lines.upload(ctx, &lines.vertices, &[]);

        let hover = HoverState {
            hover: session.hover(),
            brush: &session.brush,
            on_all_layers: config.prefs.draw_hover_on_all_layers,
        };
        let overlay = build_overlay(&session.model, &session.registry, config, &hover, ctx.dimensions());
        self.overlay.upload(ctx, &overlay.vertices, &overlay.indices);

        let uniforms = SceneUniforms::new(
            session.camera.view_projection_matrix(),
            config.shading.up_threshold,
        );
        ctx.write_buffer(&self.resources.uniform_buffer, &[uniforms]);

        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &self.resources.scene_bind_group, &[]);

            pass.set_pipeline(&self.resources.piece_pipeline);
            for (kind, _) in scene.draw_list() {
                self.resources.batch(kind).draw(&mut pass);
            }

            pass.set_pipeline(&self.resources.line_pipeline);
            self.lines.draw(&mut pass);

            pass.set_pipeline(&self.resources.overlay_pipeline);
            self.overlay.draw(&mut pass);
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
