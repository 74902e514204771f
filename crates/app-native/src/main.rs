use std::time::Instant;

use wgpu::util::DeviceExt;
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use app_core::{constants, Camera, ExperienceController, FrameInput, TubeGeometry, TubeVertex};
use glam::Vec2;

// There is no document to scroll natively; the mouse wheel pages through a
// virtual document of this height (in scroll units).
const VIRTUAL_SCROLL_HEIGHT: f32 = 4000.0;
const WHEEL_LINE_PX: f32 = 50.0;

const PARTICLE_SEED: u64 = 7;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    particle_color: [f32; 4],
    tube_params: [f32; 4],
    gradient: [[f32; 4]; 4],
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    particle_pipeline: wgpu::RenderPipeline,
    tube_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    particle_vb: wgpu::Buffer,
    vortex_vb: wgpu::Buffer,
    vortex_ib: wgpu::Buffer,
    vortex_index_count: u32,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
    last_frame: Instant,
    controller: ExperienceController,
    scroll_px: f32,
    pointer_ndc: Vec2,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
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
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader_source: &str = app_core::SCENE_WGSL;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        // Quad vertices for two triangles
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
            size: (std::mem::size_of::<[f32; 3]>() * constants::PARTICLE_COUNT) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let controller = ExperienceController::new(PARTICLE_SEED);
        let vortex = TubeGeometry::new(
            controller.path(),
            constants::VORTEX_TUBULAR_SEGMENTS,
            constants::VORTEX_TUBE_RADIUS,
            constants::VORTEX_RADIAL_SEGMENTS,
        );
        let vortex_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vortex_vb"),
            contents: bytemuck::cast_slice(&vortex.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let vortex_ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vortex_ib"),
            contents: bytemuck::cast_slice(&vortex.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
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
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
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
            window,
            surface,
            device,
            queue,
            config,
            particle_pipeline,
            tube_pipeline,
            uniform_buffer,
            quad_vb,
            particle_vb,
            vortex_vb,
            vortex_ib,
            vortex_index_count: vortex.indices.len() as u32,
            bind_group,
            width: size.width,
            height: size.height,
            last_frame: Instant::now(),
            controller,
            scroll_px: 0.0,
            pointer_ndc: Vec2::ZERO,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn on_wheel(&mut self, delta: MouseScrollDelta) {
        let px = match delta {
            MouseScrollDelta::LineDelta(_, y) => y * WHEEL_LINE_PX,
            MouseScrollDelta::PixelDelta(p) => p.y as f32,
        };
        self.scroll_px = (self.scroll_px - px).clamp(0.0, VIRTUAL_SCROLL_HEIGHT);
    }

    fn on_cursor(&mut self, x: f32, y: f32) {
        let w = self.width.max(1) as f32;
        let h = self.height.max(1) as f32;
        self.pointer_ndc = Vec2::new(2.0 * x / w - 1.0, 1.0 - 2.0 * y / h);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        let input = FrameInput {
            scroll_fraction: self.scroll_px / VIRTUAL_SCROLL_HEIGHT,
            pointer_ndc: self.pointer_ndc,
        };
        let aspect = self.width as f32 / self.height.max(1) as f32;
        self.controller.set_aspect(aspect);
        let pose = self.controller.update(dt, &input);
        let camera = Camera::new(pose.eye, pose.target, aspect);

        let [pr, pg, pb] = constants::PARTICLE_COLOR;
        let [vr, vg, vb] = constants::VORTEX_COLOR;
        let uniforms = SceneUniforms {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
            particle_color: [pr, pg, pb, pose.particle_opacity],
            tube_params: [pose.vortex_opacity, constants::PARTICLE_SIZE, 0.0, 0.0],
            gradient: [[vr, vg, vb, 1.0]; 4],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let positions: Vec<[f32; 3]> = self
            .controller
            .particle_positions()
            .iter()
            .map(|p| p.to_array())
            .collect();
        self.queue
            .write_buffer(&self.particle_vb, 0, bytemuck::cast_slice(&positions));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let [r, g, b] = constants::EXPERIENCE_CLEAR_COLOR;
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a: 1.0 }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_pipeline(&self.tube_pipeline);
            rpass.set_vertex_buffer(0, self.vortex_vb.slice(..));
            rpass.set_index_buffer(self.vortex_ib.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.vortex_index_count, 0, 0..1);
            rpass.set_pipeline(&self.particle_pipeline);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.particle_vb.slice(..));
            rpass.draw(0..6, 0..positions.len() as u32);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("Scroll Experience (native)")
        .build(&event_loop)
        .expect("window");

    let mut state = pollster::block_on(GpuState::new(&window)).expect("gpu");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => state.resize(size),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event: WindowEvent::MouseWheel { delta, .. },
                ..
            } => state.on_wheel(delta),
            Event::WindowEvent {
                event: WindowEvent::CursorMoved { position, .. },
                ..
            } => state.on_cursor(position.x as f32, position.y as f32),
            Event::AboutToWait => match state.render() {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            },
            _ => {}
        })
        .unwrap();
}
