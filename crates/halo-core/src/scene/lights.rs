use glam::Vec3;

use crate::constants::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing towards the light.
    pub direction: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub orbit: PointLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: AMBIENT_COLOR,
                intensity: AMBIENT_INTENSITY,
            },
            directional: DirectionalLight {
                direction: DIRECTIONAL_DIRECTION.normalize(),
                color: DIRECTIONAL_COLOR,
                intensity: DIRECTIONAL_INTENSITY,
            },
            orbit: PointLight {
                position: orbit_position(0.0),
                color: ORBIT_LIGHT_COLOR,
                intensity: ORBIT_LIGHT_INTENSITY,
                range: ORBIT_LIGHT_RANGE,
            },
        }
    }
}

impl Lighting {
    pub fn advance(&mut self, elapsed_ms: f64) {
        self.orbit.position = orbit_position(elapsed_ms);
    }
}

/// Orbit around the origin with independent X and Z periods.
pub fn orbit_position(elapsed_ms: f64) -> Vec3 {
    let e = elapsed_ms as f32;
    Vec3::new(
        (e * ORBIT_LIGHT_RATE_X).sin() * ORBIT_LIGHT_RADIUS,
        ORBIT_LIGHT_HEIGHT,
        (e * ORBIT_LIGHT_RATE_Z).cos() * ORBIT_LIGHT_RADIUS,
    )
}
