use glam::Mat4;
use halo_core::constants::{PARTICLE_ALPHA_MAX, PARTICLE_COLOR, PARTICLE_FADE_RADIUS, PARTICLE_POINT_SCALE};
use halo_core::scene::lights::Lighting;
use halo_core::scene::material::{Material, Shading};
use halo_core::ViewportState;

// Layouts mirror the structs in scene.wgsl / particles.wgsl.

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    viewport: [f32; 4],
    ambient: [f32; 4],
    dir_light_dir: [f32; 4],
    dir_light_color: [f32; 4],
    point_light_pos: [f32; 4],
    point_light_color: [f32; 4],
}

fn scaled(color: [f32; 3], intensity: f32) -> [f32; 4] {
    [
        color[0] * intensity,
        color[1] * intensity,
        color[2] * intensity,
        1.0,
    ]
}

impl Globals {
    pub(crate) fn new(viewport: &ViewportState, lighting: &Lighting) -> Self {
        let camera = viewport.camera();
        let view = camera.view_matrix();
        let proj = camera.projection_matrix();
        let dir = lighting.directional.direction;
        let orbit = &lighting.orbit;
        Self {
            view_proj: (proj * view).to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            viewport: [
                viewport.pixel_width() as f32,
                viewport.pixel_height() as f32,
                viewport.pixel_ratio(),
                0.0,
            ],
            ambient: scaled(lighting.ambient.color, lighting.ambient.intensity),
            dir_light_dir: [dir.x, dir.y, dir.z, 0.0],
            dir_light_color: scaled(lighting.directional.color, lighting.directional.intensity),
            point_light_pos: orbit.position.extend(orbit.range).to_array(),
            point_light_color: scaled(orbit.color, orbit.intensity),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    emissive: [f32; 4],
    params: [f32; 4],
}

impl ObjectUniform {
    pub(crate) fn new(material: &Material, model: Mat4) -> Self {
        let [r, g, b] = material.color;
        let [er, eg, eb] = material.emissive;
        let unlit = match material.shading {
            Shading::Lit => 0.0,
            Shading::Unlit => 1.0,
        };
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, material.opacity],
            emissive: [er, eg, eb, unlit],
            params: [material.metalness, material.roughness, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FieldUniform {
    model: [[f32; 4]; 4],
    params: [f32; 4],
    color: [f32; 4],
}

impl FieldUniform {
    pub(crate) fn new(model: Mat4, elapsed_ms: f32) -> Self {
        let [r, g, b] = PARTICLE_COLOR;
        Self {
            model: model.to_cols_array_2d(),
            params: [
                elapsed_ms,
                PARTICLE_POINT_SCALE,
                PARTICLE_FADE_RADIUS,
                PARTICLE_ALPHA_MAX,
            ],
            color: [r, g, b, 1.0],
        }
    }
}
