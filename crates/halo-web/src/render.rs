//! WebGPU implementation of [`RenderBackend`] on a page canvas.

use std::collections::HashMap;

use halo_core::scene::material::Material;
use halo_core::scene::{SceneContent, PARTICLE_SHADER, SCENE_SHADER};
use halo_core::{
    DisposalError, DrawStats, FrameDraw, RenderBackend, RenderError, ResizeError, ResourceHandle,
    ResourceId, ResourceKind, SurfaceInitError, ViewportState,
};
use web_sys as web;
use wgpu;

use crate::dom;

pub(crate) mod helpers;
pub(crate) mod pipelines;
pub(crate) mod targets;
pub(crate) mod uniforms;

use pipelines::{Pipelines, QUAD_CORNERS};
use targets::DepthTarget;
use uniforms::{FieldUniform, Globals, ObjectUniform};

struct GpuGeometry {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

struct GpuMaterial {
    material: Material,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct GpuParticles {
    corners: wgpu::Buffer,
    instances: wgpu::Buffer,
    count: u32,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Where a handle's resource lives; geometry and material slots are the
/// scene's mesh index.
#[derive(Clone, Copy, Debug)]
enum Slot {
    Shader(usize),
    Geometry(usize),
    Material(usize),
    Particles,
    Context,
}

pub struct GpuRenderer {
    canvas: web::HtmlCanvasElement,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: Option<DepthTarget>,
    object_layout: wgpu::BindGroupLayout,
    globals_layout: wgpu::BindGroupLayout,
    globals: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    shaders: Vec<Option<(&'static str, wgpu::ShaderModule)>>,
    pipelines: Option<Pipelines>,
    geometries: Vec<Option<GpuGeometry>>,
    materials: Vec<Option<GpuMaterial>>,
    particles: Option<GpuParticles>,
    slots: HashMap<ResourceId, Slot>,
    next_id: u32,
    context_live: bool,
}

impl GpuRenderer {
    /// Acquire an adapter and device for `canvas` and configure its surface
    /// for `viewport`.
    pub async fn new(
        canvas: web::HtmlCanvasElement,
        viewport: &ViewportState,
    ) -> Result<Self, SurfaceInitError> {
        let width = viewport.pixel_width();
        let height = viewport.pixel_height();
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| SurfaceInitError::Surface(e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(SurfaceInitError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("halo_device"),
                },
                None,
            )
            .await
            .map_err(|e| SurfaceInitError::Device(e.to_string()))?;
        device.on_uncaptured_error(Box::new(|e: wgpu::Error| {
            log::error!("[gpu] uncaptured error: {e}");
        }));

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| SurfaceInitError::Surface("no supported surface format".into()))?;
        // The page shows through wherever the scene leaves alpha below 1.
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
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

        let depth = DepthTarget::new(&device, width, height);
        let globals_layout = helpers::uniform_layout(&device, "globals_bgl");
        let object_layout = helpers::uniform_layout(&device, "object_bgl");
        let (globals, globals_bind_group) = helpers::uniform_binding(
            &device,
            &globals_layout,
            "globals",
            &Globals::new(viewport, &Default::default()),
        );
        log::info!("[gpu] surface {width}x{height} {format:?} alpha={alpha_mode:?}");

        Ok(Self {
            canvas,
            surface,
            device,
            queue,
            config,
            depth: Some(depth),
            object_layout,
            globals_layout,
            globals,
            globals_bind_group,
            shaders: Vec::new(),
            pipelines: None,
            geometries: Vec::new(),
            materials: Vec::new(),
            particles: None,
            slots: HashMap::new(),
            next_id: 0,
            context_live: true,
        })
    }

    fn register(&mut self, kind: ResourceKind, label: &str, slot: Slot) -> ResourceHandle {
        let id = ResourceId(self.next_id);
        self.next_id += 1;
        self.slots.insert(id, slot);
        ResourceHandle {
            id,
            kind,
            label: label.to_string(),
        }
    }

    fn shader_named(&self, label: &str) -> Option<&wgpu::ShaderModule> {
        self.shaders
            .iter()
            .flatten()
            .find(|(l, _)| *l == label)
            .map(|(_, m)| m)
    }
}

fn take_slot<T>(slots: &mut [Option<T>], index: usize) -> Option<T> {
    slots.get_mut(index).and_then(Option::take)
}

impl RenderBackend for GpuRenderer {
    fn upload(&mut self, scene: &SceneContent) -> Result<Vec<ResourceHandle>, SurfaceInitError> {
        if !self.context_live {
            return Err(SurfaceInitError::Upload {
                label: "context".into(),
                reason: "context already released".into(),
            });
        }
        let mut handles = Vec::new();

        for asset in scene.shaders() {
            let module = self
                .device
                .create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some(asset.label),
                    source: wgpu::ShaderSource::Wgsl(asset.source.into()),
                });
            let slot = Slot::Shader(self.shaders.len());
            self.shaders.push(Some((asset.label, module)));
            handles.push(self.register(ResourceKind::Shader, asset.label, slot));
        }
        let missing = |label: &str| SurfaceInitError::Upload {
            label: label.to_string(),
            reason: "shader not bundled".into(),
        };
        let scene_shader = self
            .shader_named(SCENE_SHADER.label)
            .ok_or_else(|| missing(SCENE_SHADER.label))?;
        let particle_shader = self
            .shader_named(PARTICLE_SHADER.label)
            .ok_or_else(|| missing(PARTICLE_SHADER.label))?;
        let pipelines = Pipelines::new(
            &self.device,
            self.config.format,
            &self.globals_layout,
            &self.object_layout,
            scene_shader,
            particle_shader,
        );
        self.pipelines = Some(pipelines);

        for (index, mesh) in scene.meshes().iter().enumerate() {
            let geometry = GpuGeometry {
                vertices: helpers::vertex_buffer(&self.device, mesh.label, &mesh.geometry.vertices),
                indices: helpers::index_buffer(&self.device, mesh.label, &mesh.geometry.indices),
                index_count: mesh.geometry.indices.len() as u32,
            };
            let (buffer, bind_group) = helpers::uniform_binding(
                &self.device,
                &self.object_layout,
                mesh.label,
                &ObjectUniform::new(&mesh.material, glam::Mat4::IDENTITY),
            );
            self.geometries.push(Some(geometry));
            self.materials.push(Some(GpuMaterial {
                material: mesh.material,
                buffer,
                bind_group,
            }));
            handles.push(self.register(ResourceKind::Geometry, mesh.label, Slot::Geometry(index)));
            handles.push(self.register(ResourceKind::Material, mesh.label, Slot::Material(index)));
        }

        let field = scene.particles();
        let (uniform, bind_group) = helpers::uniform_binding(
            &self.device,
            &self.object_layout,
            "particle_field",
            &FieldUniform::new(scene.particle_model(), field.elapsed_ms()),
        );
        self.particles = Some(GpuParticles {
            corners: helpers::vertex_buffer(&self.device, "particle_quad", &QUAD_CORNERS),
            instances: helpers::vertex_buffer(&self.device, "particle_instances", field.particles()),
            count: field.len() as u32,
            uniform,
            bind_group,
        });
        handles.push(self.register(ResourceKind::ParticleBuffer, "particle_field", Slot::Particles));
        handles.push(self.register(ResourceKind::Context, "webgpu_context", Slot::Context));

        log::info!(
            "[gpu] uploaded {} meshes, {} particles",
            scene.meshes().len(),
            field.len()
        );
        Ok(handles)
    }

    fn resize(&mut self, viewport: &ViewportState) -> Result<(), ResizeError> {
        let (width, height) = (viewport.pixel_width(), viewport.pixel_height());
        let max = self.device.limits().max_texture_dimension_2d;
        if width > max || height > max {
            return Err(ResizeError::ExceedsLimit { width, height, max });
        }
        if !self.context_live {
            return Err(ResizeError::Backend("context released".into()));
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        if let Some(depth) = &mut self.depth {
            depth.recreate(&self.device, width, height);
        }
        Ok(())
    }

    fn draw(&mut self, frame: &FrameDraw<'_>) -> Result<DrawStats, RenderError> {
        if !self.context_live {
            return Err(RenderError::NotReady);
        }
        let (Some(pipelines), Some(depth)) = (&self.pipelines, &self.depth) else {
            return Err(RenderError::NotReady);
        };

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::Timeout) => return Err(RenderError::Timeout),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Backend(e.to_string())),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.globals,
            0,
            bytemuck::bytes_of(&Globals::new(frame.viewport, frame.lighting)),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        let [r, g, b, a] = frame.viewport.clear_color();
        let mut stats = DrawStats::default();
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&pipelines.mesh);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            for item in frame.items {
                let i = item.mesh.index();
                let (Some(Some(geo)), Some(Some(mat))) =
                    (self.geometries.get(i), self.materials.get(i))
                else {
                    continue;
                };
                self.queue.write_buffer(
                    &mat.buffer,
                    0,
                    bytemuck::bytes_of(&ObjectUniform::new(&mat.material, item.model)),
                );
                rpass.set_bind_group(1, &mat.bind_group, &[]);
                rpass.set_vertex_buffer(0, geo.vertices.slice(..));
                rpass.set_index_buffer(geo.indices.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..geo.index_count, 0, 0..1);
                stats.draw_calls += 1;
                stats.triangles += u64::from(geo.index_count / 3);
            }

            if let Some(particles) = &self.particles {
                let count = particles.count.min(frame.particle_count);
                self.queue.write_buffer(
                    &particles.uniform,
                    0,
                    bytemuck::bytes_of(&FieldUniform::new(frame.particle_model, frame.elapsed_ms)),
                );
                rpass.set_pipeline(&pipelines.particles);
                rpass.set_bind_group(0, &self.globals_bind_group, &[]);
                rpass.set_bind_group(1, &particles.bind_group, &[]);
                rpass.set_vertex_buffer(0, particles.corners.slice(..));
                rpass.set_vertex_buffer(1, particles.instances.slice(..));
                rpass.draw(0..QUAD_CORNERS.len() as u32, 0..count);
                stats.draw_calls += 1;
                stats.triangles += u64::from(count) * 2;
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(stats)
    }

    fn release(&mut self, handle: &ResourceHandle) -> Result<(), DisposalError> {
        let Some(slot) = self.slots.get(&handle.id).copied() else {
            return Err(DisposalError::Unknown {
                label: handle.label.clone(),
            });
        };
        let released = match slot {
            Slot::Shader(i) => {
                // Pipelines are built from the modules; they go with them.
                self.pipelines = None;
                take_slot(&mut self.shaders, i).is_some()
            }
            Slot::Geometry(i) => take_slot(&mut self.geometries, i)
                .map(|g| {
                    g.vertices.destroy();
                    g.indices.destroy();
                })
                .is_some(),
            Slot::Material(i) => take_slot(&mut self.materials, i)
                .map(|m| m.buffer.destroy())
                .is_some(),
            Slot::Particles => self
                .particles
                .take()
                .map(|p| {
                    p.corners.destroy();
                    p.instances.destroy();
                    p.uniform.destroy();
                })
                .is_some(),
            Slot::Context => {
                let live = std::mem::replace(&mut self.context_live, false);
                if live {
                    if let Some(depth) = self.depth.take() {
                        depth.destroy();
                    }
                    self.globals.destroy();
                    self.device.destroy();
                }
                live
            }
        };
        if released {
            Ok(())
        } else {
            Err(DisposalError::AlreadyReleased {
                label: handle.label.clone(),
            })
        }
    }

    fn heap_used_bytes(&self) -> Option<u64> {
        dom::js_heap_used_bytes()
    }
}
