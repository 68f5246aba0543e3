//! Turns a frame's display list into GPU buffers. Fills and strokes are
//! tessellated on the CPU with lyon; colors ride along per vertex so the
//! whole face draws in one pass.

use bytemuck::{Pod, Zeroable};
use lyon::math::Transform;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, StrokeOptions, StrokeTessellator,
    StrokeVertex, VertexBuffers,
};
use tracing::warn;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::face::canvas::{Color, DisplayList, DrawCmd};

const TOLERANCE: f32 = 0.1;

const FACE_SHADER: &str = r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs(@location(0) position: vec2<f32>, @location(1) color: vec4<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.position = vec4<f32>(position, 0.0, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct FaceVertex {
    position: [f32; 2],
    color: [f32; 4],
}

impl FaceVertex {
    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FaceVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: (std::mem::size_of::<[f32; 2]>()) as wgpu::BufferAddress,
                    shader_location: 1,
                },
            ],
        }
    }
}

pub struct FacePainter {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl FacePainter {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("face-shader"),
            source: wgpu::ShaderSource::Wgsl(FACE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("face-pipeline-layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("face-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[FaceVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            vertex_buffer: None,
            index_buffer: None,
            index_count: 0,
        }
    }

    /// Tessellates the display list and uploads fresh buffers.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        list: &DisplayList,
        surface_size: PhysicalSize<u32>,
    ) {
        let mut buffers: VertexBuffers<FaceVertex, u32> = VertexBuffers::new();
        let mut fill = FillTessellator::new();
        let mut stroke = StrokeTessellator::new();

        for cmd in list.commands() {
            match cmd {
                DrawCmd::Fill {
                    path,
                    transform,
                    color,
                } => {
                    let options = FillOptions::tolerance(TOLERANCE);
                    let result = fill.tessellate_path(
                        path.as_ref(),
                        &options,
                        &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
                            placed_vertex(vertex.position().to_array(), transform, *color)
                        }),
                    );
                    if let Err(err) = result {
                        warn!(error = %err, "face fill tessellation failed");
                    }
                }
                DrawCmd::Stroke {
                    path,
                    transform,
                    color,
                    width,
                } => {
                    let options = StrokeOptions::tolerance(TOLERANCE).with_line_width(*width);
                    let result = stroke.tessellate_path(
                        path.as_ref(),
                        &options,
                        &mut BuffersBuilder::new(&mut buffers, |vertex: StrokeVertex| {
                            placed_vertex(vertex.position().to_array(), transform, *color)
                        }),
                    );
                    if let Err(err) = result {
                        warn!(error = %err, "face stroke tessellation failed");
                    }
                }
            }
        }

        let width = surface_size.width.max(1) as f32;
        let height = surface_size.height.max(1) as f32;
        for vertex in &mut buffers.vertices {
            vertex.position = to_clip(vertex.position, width, height);
        }

        if buffers.vertices.is_empty() || buffers.indices.is_empty() {
            self.vertex_buffer = None;
            self.index_buffer = None;
            self.index_count = 0;
            return;
        }

        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("face-vertices"),
            contents: bytemuck::cast_slice(&buffers.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("face-indices"),
            contents: bytemuck::cast_slice(&buffers.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
        self.index_count = buffers.indices.len() as u32;
    }

    pub fn draw<'pass>(&'pass self, pass: &mut wgpu::RenderPass<'pass>) {
        if self.index_count == 0 {
            return;
        }
        if let (Some(vertex_buffer), Some(index_buffer)) = (&self.vertex_buffer, &self.index_buffer)
        {
            pass.set_pipeline(&self.pipeline);
            pass.set_vertex_buffer(0, vertex_buffer.slice(..));
            pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..self.index_count, 0, 0..1);
        }
    }
}

fn placed_vertex(position: [f32; 2], transform: &Transform, color: Color) -> FaceVertex {
    let placed = transform.transform_point(lyon::math::point(position[0], position[1]));
    FaceVertex {
        position: [placed.x, placed.y],
        color,
    }
}

fn to_clip(position: [f32; 2], width: f32, height: f32) -> [f32; 2] {
    [
        (position[0] / width) * 2.0 - 1.0,
        1.0 - (position[1] / height) * 2.0,
    ]
}
