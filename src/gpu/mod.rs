//! GPU surface management and rendering.
//!
//! Owns the wgpu device, the particle and link pipelines, and the
//! optional trail-fade pass. Particle state lives on the CPU; each
//! frame the animation uploads instance data and issues a single
//! render pass, plus an overlay pass when an egui panel is attached.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::animation::Animation;
use crate::error::GpuError;
use crate::particle::GpuParticle;
use crate::visuals::LinkStyle;
#[cfg(feature = "egui")]
use crate::visuals::Palette;

mod links;
#[cfg(feature = "egui")]
mod overlay;

use links::LinkRenderer;
#[cfg(feature = "egui")]
use overlay::EguiOverlay;

/// Per-frame uniforms shared by the particle and link pipelines.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

/// Parameters for the trail-fade pass.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FadeParams {
    color: [f32; 3],
    fade: f32,
}

/// Rendering options resolved from the animator builder.
pub struct GpuOptions {
    /// Background color, also used as the trail-fade tint.
    pub background: Vec3,
    /// Per-frame fade strength when trails are enabled.
    pub trail_fade: Option<f32>,
    /// Link style when nearby particles are connected with lines.
    pub links: Option<LinkStyle>,
    /// Palette the overlay panel theme is derived from.
    #[cfg(feature = "egui")]
    pub palette: Palette,
    /// UI callback run once per frame over the animation.
    #[cfg(feature = "egui")]
    pub ui: Option<Box<dyn Fn(&egui::Context)>>,
}

/// Trail-fade pipeline and its parameter buffer.
struct FadePass {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    /// Params buffer (kept alive for bind group).
    _params_buffer: wgpu::Buffer,
}

/// All GPU state for one animation window.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    uniform_buffer: wgpu::Buffer,
    particle_buffer: wgpu::Buffer,
    particle_pipeline: wgpu::RenderPipeline,
    particle_bind_group: wgpu::BindGroup,
    background: wgpu::Color,
    fade: Option<FadePass>,
    links: Option<LinkRenderer>,
    max_particles: u32,
    /// True until a frame has been presented since the last clear.
    first_frame: bool,
    #[cfg(feature = "egui")]
    window: Arc<Window>,
    #[cfg(feature = "egui")]
    overlay: Option<(EguiOverlay, Box<dyn Fn(&egui::Context)>)>,
}

impl GpuState {
    /// Set up the surface, device, and pipelines for a window.
    pub async fn new(
        window: Arc<Window>,
        max_particles: u32,
        options: GpuOptions,
    ) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniforms = Uniforms {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let particle_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Buffer"),
            size: (max_particles as usize * std::mem::size_of::<GpuParticle>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let (particle_pipeline, particle_bind_group) =
            create_particle_pipeline(&device, &uniform_buffer, config.format);

        let fade = options
            .trail_fade
            .map(|fade| create_fade_pass(&device, config.format, options.background, fade));

        let links = options.links.as_ref().map(|style| {
            LinkRenderer::new(&device, &uniform_buffer, max_particles, style, config.format)
        });

        let background = wgpu::Color {
            r: options.background.x as f64,
            g: options.background.y as f64,
            b: options.background.z as f64,
            a: 1.0,
        };

        #[cfg(feature = "egui")]
        let overlay = {
            let palette = options.palette;
            options
                .ui
                .map(|ui| (EguiOverlay::new(&device, config.format, &window, palette), ui))
        };

        Ok(Self {
            surface,
            device,
            queue,
            config,
            uniform_buffer,
            particle_buffer,
            particle_pipeline,
            particle_bind_group,
            background,
            fade,
            links,
            max_particles,
            first_frame: true,
            #[cfg(feature = "egui")]
            window,
            #[cfg(feature = "egui")]
            overlay,
        })
    }

    /// Reconfigure the surface after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            // Surface contents are undefined after reconfigure, so trail
            // accumulation restarts from a cleared frame.
            self.first_frame = true;
        }
    }

    /// Feed a window event to the UI overlay.
    ///
    /// Returns true when the overlay consumed the event (don't treat it
    /// as animation input).
    pub fn ui_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        #[cfg(feature = "egui")]
        if let Some((overlay, _)) = &mut self.overlay {
            return overlay.on_window_event(&self.window, event);
        }
        #[cfg(not(feature = "egui"))]
        let _ = event;
        false
    }

    /// Draw one frame of the animation.
    pub fn render(&mut self, animation: &Animation) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Pixel-space projection, y down like the animation coordinates.
        let proj =
            Mat4::orthographic_rh(0.0, animation.width(), animation.height(), 0.0, -1.0, 1.0);
        let uniforms = Uniforms {
            view_proj: proj.to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let instances: Vec<GpuParticle> = animation
            .particles()
            .iter()
            .map(GpuParticle::from)
            .collect();
        let count = (instances.len() as u32).min(self.max_particles);
        if count > 0 {
            self.queue.write_buffer(
                &self.particle_buffer,
                0,
                bytemuck::cast_slice(&instances[..count as usize]),
            );
        }

        if let Some(links) = &mut self.links {
            let segments = animation.links(&links.style);
            links.prepare(&self.queue, &segments);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let load = if self.fade.is_some() && !self.first_frame {
            wgpu::LoadOp::Load
        } else {
            wgpu::LoadOp::Clear(self.background)
        };

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(fade) = &self.fade {
                if !self.first_frame {
                    pass.set_pipeline(&fade.pipeline);
                    pass.set_bind_group(0, &fade.bind_group, &[]);
                    pass.draw(0..3, 0..1);
                }
            }

            if let Some(links) = &self.links {
                links.draw(&mut pass);
            }

            if count > 0 {
                pass.set_pipeline(&self.particle_pipeline);
                pass.set_bind_group(0, &self.particle_bind_group, &[]);
                pass.set_vertex_buffer(0, self.particle_buffer.slice(..));
                pass.draw(0..6, 0..count);
            }
        }

        #[cfg(feature = "egui")]
        if let Some((overlay, ui)) = &mut self.overlay {
            overlay.begin_frame(&self.window);
            ui(&overlay.ctx);
            let frame = overlay.end_frame(&self.window);

            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [self.config.width, self.config.height],
                pixels_per_point: frame.pixels_per_point,
            };
            overlay.prepare(
                &self.device,
                &self.queue,
                &mut encoder,
                &frame,
                &screen_descriptor,
            );

            {
                let mut pass = encoder
                    .begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("Overlay Pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        timestamp_writes: None,
                        occlusion_query_set: None,
                    })
                    .forget_lifetime();
                overlay
                    .renderer()
                    .render(&mut pass, &frame.paint_jobs, &screen_descriptor);
            }

            overlay.cleanup(&frame);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.first_frame = false;

        Ok(())
    }
}

fn create_particle_pipeline(
    device: &wgpu::Device,
    uniform_buffer: &wgpu::Buffer,
    surface_format: wgpu::TextureFormat,
) -> (wgpu::RenderPipeline, wgpu::BindGroup) {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Particle Shader"),
        source: wgpu::ShaderSource::Wgsl(PARTICLE_SHADER.into()),
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Particle Bind Group Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Particle Bind Group"),
        layout: &bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Particle Pipeline Layout"),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Particle Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<GpuParticle>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    0 => Float32x2,
                    1 => Float32,
                    2 => Float32,
                    3 => Float32x3,
                ],
            }],
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

    (pipeline, bind_group)
}

fn create_fade_pass(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    background: Vec3,
    fade: f32,
) -> FadePass {
    let params = FadeParams {
        color: background.to_array(),
        fade,
    };
    let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Fade Params Buffer"),
        contents: bytemuck::bytes_of(&params),
        usage: wgpu::BufferUsages::UNIFORM,
    });

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Fade Shader"),
        source: wgpu::ShaderSource::Wgsl(FADE_SHADER.into()),
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Fade Bind Group Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Fade Bind Group"),
        layout: &bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: params_buffer.as_entire_binding(),
        }],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Fade Pipeline Layout"),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Fade Pipeline"),
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

    FadePass {
        pipeline,
        bind_group,
        _params_buffer: params_buffer,
    }
}

const PARTICLE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) radius: f32,
    @location(2) alpha: f32,
    @location(3) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) color: vec3<f32>,
    @location(2) alpha: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    instance: VertexInput,
) -> VertexOutput {
    var quad = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );

    let corner = quad[vertex_index];
    let world_pos = instance.position + corner * instance.radius;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(world_pos, 0.0, 1.0);
    out.local = corner;
    out.color = instance.color;
    out.alpha = instance.alpha;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.local);
    if dist > 1.0 {
        discard;
    }
    let edge = 1.0 - smoothstep(0.8, 1.0, dist);
    return vec4<f32>(in.color, in.alpha * edge);
}
"#;

const FADE_SHADER: &str = r#"
struct FadeParams {
    color: vec3<f32>,
    fade: f32,
};

@group(0) @binding(0) var<uniform> params: FadeParams;

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> @builtin(position) vec4<f32> {
    var tri = array<vec2<f32>, 3>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(3.0, -1.0),
        vec2<f32>(-1.0, 3.0),
    );
    return vec4<f32>(tri[vertex_index], 0.0, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(params.color, params.fade);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates WGSL code using naga.
    fn validate_wgsl(code: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(())
    }

    #[test]
    fn test_particle_shader_validates() {
        validate_wgsl(PARTICLE_SHADER).expect("particle shader should be valid");
    }

    #[test]
    fn test_fade_shader_validates() {
        validate_wgsl(FADE_SHADER).expect("fade shader should be valid");
    }
}
