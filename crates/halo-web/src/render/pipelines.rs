use halo_core::scene::geometry::Vertex;
use halo_core::scene::particles::Particle;
use wgpu;

use super::helpers;

/// Unit quad corners for one particle, two CCW triangles.
pub(crate) const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

pub(crate) struct Pipelines {
    pub(crate) mesh: wgpu::RenderPipeline,
    pub(crate) particles: wgpu::RenderPipeline,
}

impl Pipelines {
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        globals_layout: &wgpu::BindGroupLayout,
        object_layout: &wgpu::BindGroupLayout,
        scene_shader: &wgpu::ShaderModule,
        particle_shader: &wgpu::ShaderModule,
    ) -> Self {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[globals_layout, object_layout],
            push_constant_ranges: &[],
        });

        let mesh_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
        }];
        let mesh = helpers::make_pipeline(
            device,
            "mesh_pipeline",
            &layout,
            scene_shader,
            ("vs_main", "fs_main"),
            &mesh_buffers,
            color_format,
            true,
            Some(wgpu::Face::Back),
        );

        let particle_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x2],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Particle>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32],
            },
        ];
        // Particles test against depth but never write it.
        let particles = helpers::make_pipeline(
            device,
            "particle_pipeline",
            &layout,
            particle_shader,
            ("vs_particles", "fs_particles"),
            &particle_buffers,
            color_format,
            false,
            None,
        );

        Self { mesh, particles }
    }
}
