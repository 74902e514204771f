use app_core::{TubeGeometry, TubeVertex};
use glam::{Mat4, Vec3};
use web_sys as web;
use wgpu::util::DeviceExt;

/// Uniform block shared by the particle and tube passes. Must stay in sync
/// with `SceneUniforms` in scene.wgsl.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// rgb = particle color, a = particle opacity
    pub particle_color: [f32; 4],
    /// x = tube opacity, y = particle half-size, z/w unused
    pub tube_params: [f32; 4],
    /// four gradient stops along the tube's length
    pub gradient: [[f32; 4]; 4],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            particle_color: [1.0, 1.0, 1.0, 1.0],
            tube_params: [0.0; 4],
            gradient: [[0.0; 4]; 4],
        }
    }
}

struct TubeMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    vertex_capacity: usize,
    index_capacity: usize,
}

/// One WebGPU surface plus the two pipelines every scene in this app needs:
/// instanced particle quads and an indexed tube mesh. The experience canvas
/// draws both; the rope canvas draws tubes only.
pub struct SceneGpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    particle_pipeline: wgpu::RenderPipeline,
    tube_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    particle_vb: wgpu::Buffer,
    particle_capacity: usize,
    particle_count: u32,
    tube: Option<TubeMesh>,
    uniforms: SceneUniforms,
    clear_color: wgpu::Color,
    width: u32,
    height: u32,
}

impl SceneGpu {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        particle_capacity: usize,
        clear_color: wgpu::Color,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        // The owned canvas clone gives the surface a 'static lifetime
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];
        // A translucent canvas lets the rope overlay the page content
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes[0]
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(app_core::SCENE_WGSL.into()),
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Quad vertex buffer (two triangles)
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let particle_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_vb"),
            size: (std::mem::size_of::<[f32; 3]>() * particle_capacity.max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
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
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let particle_buffers = [
            // slot 0: quad positions
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: per-instance particle position
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                }],
            },
        ];
        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_particle"),
                buffers: &particle_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_particle"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let tube_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TubeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }];
        let tube_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tube_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_tube"),
                buffers: &tube_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            // Both tube walls stay visible through the translucent surface
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..wgpu::PrimitiveState::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_tube"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            particle_pipeline,
            tube_pipeline,
            uniform_buffer,
            bind_group,
            quad_vb,
            particle_vb,
            particle_capacity: particle_capacity.max(1),
            particle_count: 0,
            tube: None,
            uniforms: SceneUniforms::default(),
            clear_color,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn set_view_proj(&mut self, view_proj: Mat4) {
        self.uniforms.view_proj = view_proj.to_cols_array_2d();
    }

    pub fn set_particle_style(&mut self, color: [f32; 3], opacity: f32, half_size: f32) {
        self.uniforms.particle_color = [color[0], color[1], color[2], opacity];
        self.uniforms.tube_params[1] = half_size;
    }

    pub fn set_tube_style(&mut self, opacity: f32, gradient: [[f32; 3]; 4]) {
        self.uniforms.tube_params[0] = opacity;
        for (dst, src) in self.uniforms.gradient.iter_mut().zip(gradient.iter()) {
            *dst = [src[0], src[1], src[2], 1.0];
        }
    }

    pub fn upload_particles(&mut self, positions: &[Vec3]) {
        let n = positions.len().min(self.particle_capacity);
        let data: Vec<[f32; 3]> = positions[..n].iter().map(|p| p.to_array()).collect();
        self.queue
            .write_buffer(&self.particle_vb, 0, bytemuck::cast_slice(&data));
        self.particle_count = n as u32;
    }

    /// Upload a tube mesh, reallocating the buffers only when it outgrows
    /// the current capacity.
    pub fn upload_tube(&mut self, geometry: &TubeGeometry) {
        let needs_alloc = match &self.tube {
            Some(mesh) => {
                geometry.vertices.len() > mesh.vertex_capacity
                    || geometry.indices.len() > mesh.index_capacity
            }
            None => true,
        };
        if needs_alloc {
            let vertex_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("tube_vb"),
                size: (std::mem::size_of::<TubeVertex>() * geometry.vertices.len()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let index_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("tube_ib"),
                size: (std::mem::size_of::<u32>() * geometry.indices.len()) as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.tube = Some(TubeMesh {
                vertex_buffer,
                index_buffer,
                index_count: 0,
                vertex_capacity: geometry.vertices.len(),
                index_capacity: geometry.indices.len(),
            });
        }
        if let Some(mesh) = &mut self.tube {
            self.queue.write_buffer(
                &mesh.vertex_buffer,
                0,
                bytemuck::cast_slice(&geometry.vertices),
            );
            self.queue.write_buffer(
                &mesh.index_buffer,
                0,
                bytemuck::cast_slice(&geometry.indices),
            );
            mesh.index_count = geometry.indices.len() as u32;
        }
    }

    pub fn clear_tube(&mut self) {
        if let Some(mesh) = &mut self.tube {
            mesh.index_count = 0;
        }
    }

    pub fn render(&mut self, draw_particles: bool, draw_tube: bool) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_rpass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_bind_group(0, &self.bind_group, &[]);
        if draw_tube {
            if let Some(mesh) = &self.tube {
                if mesh.index_count > 0 {
                    rpass.set_pipeline(&self.tube_pipeline);
                    rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    rpass
                        .set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
            }
        }
        if draw_particles && self.particle_count > 0 {
            rpass.set_pipeline(&self.particle_pipeline);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.particle_vb.slice(..));
            rpass.draw(0..6, 0..self.particle_count);
        }
        drop(rpass);
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
