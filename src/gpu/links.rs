//! Link rendering between nearby particles.
//!
//! Draws translucent line quads between particles that sit within the
//! configured link radius. Segments are collected on the CPU each frame
//! and uploaded to a storage buffer; the vertex shader expands each
//! segment into a screen-space quad.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::animation::Link;
use crate::visuals::LinkStyle;

/// One line segment as the shader reads it.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct GpuLink {
    a: [f32; 2],
    b: [f32; 2],
    alpha: f32,
    _pad: f32,
}

impl From<&Link> for GpuLink {
    fn from(link: &Link) -> Self {
        Self {
            a: link.a.to_array(),
            b: link.b.to_array(),
            alpha: link.alpha,
            _pad: 0.0,
        }
    }
}

/// Parameters for link rendering (render shader).
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct RenderParams {
    color: [f32; 3],
    width: f32,
}

/// GPU resources for link rendering.
pub struct LinkRenderer {
    /// Style used when collecting segments on the CPU.
    pub style: LinkStyle,
    /// Buffer storing link line segments.
    buffer: wgpu::Buffer,
    /// Render pipeline for drawing links.
    pipeline: wgpu::RenderPipeline,
    /// Bind group for the render shader.
    bind_group: wgpu::BindGroup,
    /// Maximum number of links the buffer can hold.
    capacity: u32,
    /// Number of links uploaded for the current frame.
    len: u32,
    /// Params buffer (kept alive for bind group).
    _params_buffer: wgpu::Buffer,
}

impl LinkRenderer {
    /// Create a new link renderer sized for `count` particles.
    pub fn new(
        device: &wgpu::Device,
        uniform_buffer: &wgpu::Buffer,
        count: u32,
        style: &LinkStyle,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        // Zero-sized bindings fail validation, so keep at least one slot.
        let capacity = (count * 8).max(1);

        let buffer_size = capacity as usize * std::mem::size_of::<GpuLink>();
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Link Buffer"),
            size: buffer_size as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let render_params = RenderParams {
            color: style.color.to_array(),
            width: style.width,
        };
        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Link Params Buffer"),
            contents: bytemuck::bytes_of(&render_params),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Link Render Shader"),
            source: wgpu::ShaderSource::Wgsl(RENDER_SHADER.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Link Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Link Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Link Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Link Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            style: *style,
            buffer,
            pipeline,
            bind_group,
            capacity,
            len: 0,
            _params_buffer: params_buffer,
        }
    }

    /// Upload the current frame's links. Segments beyond the buffer
    /// capacity are dropped.
    pub fn prepare(&mut self, queue: &wgpu::Queue, links: &[Link]) {
        let count = links.len().min(self.capacity as usize);
        self.len = count as u32;
        if count == 0 {
            return;
        }

        let data: Vec<GpuLink> = links[..count].iter().map(GpuLink::from).collect();
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&data));
    }

    /// Record the link draw into an active render pass.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.len == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..6, 0..self.len);
    }
}

const RENDER_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

struct LinkData {
    a: vec2<f32>,
    b: vec2<f32>,
    alpha: f32,
    pad: f32,
};

struct RenderParams {
    color: vec3<f32>,
    width: f32,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(0) @binding(1) var<storage, read> links: array<LinkData>;
@group(0) @binding(2) var<uniform> render_params: RenderParams;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) alpha: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @builtin(instance_index) instance_index: u32,
) -> VertexOutput {
    var out: VertexOutput;

    let link = links[instance_index];
    let pos_a = link.a;
    let pos_b = link.b;

    let diff = pos_b - pos_a;
    if length(diff) < 0.001 {
        out.clip_position = vec4<f32>(0.0, 0.0, -1000.0, 1.0);
        out.alpha = 0.0;
        return out;
    }

    let line_dir = normalize(diff);
    let perp = vec2<f32>(-line_dir.y, line_dir.x) * render_params.width * 0.5;

    var pos: vec2<f32>;
    switch vertex_index {
        case 0u: { pos = pos_a - perp; }
        case 1u: { pos = pos_a + perp; }
        case 2u: { pos = pos_b - perp; }
        case 3u: { pos = pos_a + perp; }
        case 4u: { pos = pos_b - perp; }
        default: { pos = pos_b + perp; }
    }

    out.clip_position = uniforms.view_proj * vec4<f32>(pos, 0.0, 1.0);
    out.alpha = link.alpha;

    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(render_params.color, in.alpha);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_link_matches_shader_stride() {
        assert_eq!(std::mem::size_of::<GpuLink>(), 24);
    }

    #[test]
    fn test_render_shader_validates() {
        let module =
            naga::front::wgsl::parse_str(RENDER_SHADER).expect("link shader should parse");

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .expect("link shader should validate");
    }
}
