use glam::{Vec2, Vec3};
use rand::Rng;

use super::graph::NodeId;
use crate::constants::*;

/// Per-particle record uploaded once as instance data.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Particle {
    pub position: [f32; 3],
    pub size: f32,
}

/// Fixed set of points whose motion is evaluated by the particle shader
/// from `(base position, elapsed)`. The records never change after
/// construction; only the `elapsed` uniform advances.
#[derive(Clone, Debug)]
pub struct ParticleField {
    pub node: NodeId,
    particles: Box<[Particle]>,
    elapsed_ms: f32,
}

impl ParticleField {
    pub fn generate<R: Rng + ?Sized>(node: NodeId, count: usize, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                position: [
                    rng.gen_range(PARTICLE_BOX_MIN.x..=PARTICLE_BOX_MAX.x),
                    rng.gen_range(PARTICLE_BOX_MIN.y..=PARTICLE_BOX_MAX.y),
                    rng.gen_range(PARTICLE_BOX_MIN.z..=PARTICLE_BOX_MAX.z),
                ],
                size: rng.gen_range(PARTICLE_SIZE_MIN..=PARTICLE_SIZE_MAX),
            })
            .collect();
        Self {
            node,
            particles,
            elapsed_ms: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Value of the shader's `elapsed` uniform, in milliseconds.
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    pub fn set_elapsed(&mut self, elapsed_ms: f64) {
        self.elapsed_ms = elapsed_ms as f32;
    }
}

// CPU mirrors of particles.wgsl, kept in lockstep with the shader.

/// Base position displaced by the collective drift at `elapsed_ms`.
pub fn displaced_position(base: Vec3, elapsed_ms: f32) -> Vec3 {
    let t = elapsed_ms * PARTICLE_TIME_SCALE;
    Vec3::new(
        base.x + (base.z * 0.1 + t * 2.0).sin() * 0.6,
        base.y + (base.x * 0.06 + t * 1.2).cos() * 0.2,
        base.z,
    )
}

/// On-screen diameter in device pixels for a particle at view-space depth
/// `view_z` (negative in front of the camera).
pub fn point_size_px(size: f32, pixel_ratio: f32, view_z: f32) -> f32 {
    if view_z >= 0.0 {
        return 0.0;
    }
    size * pixel_ratio * PARTICLE_POINT_SCALE / -view_z
}

/// Fragment alpha. `coord` is the position inside the sprite with the
/// center at (0.5, 0.5); `world` is the displaced particle position.
pub fn point_alpha(coord: Vec2, world: Vec3) -> f32 {
    let radial = 1.0 - smoothstep(0.0, 0.5, coord.distance(Vec2::splat(0.5)));
    let distance_fade = 1.0 - world.length() / PARTICLE_FADE_RADIUS;
    (radial * distance_fade).clamp(0.0, PARTICLE_ALPHA_MAX)
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
