use crate::constants::{
    ENVIRONMENT_TINT, GROUND_COLOR, RING_EMISSIVE_SCALE, RING_METALNESS, RING_ROUGHNESS,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
    /// Ambient + directional + orbiting point light.
    Lit,
    /// Flat color; used for the environment shell.
    Unlit,
}

/// Surface parameters, colors in linear RGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    pub emissive: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub shading: Shading,
}

impl Material {
    pub fn metallic(color: [f32; 3]) -> Self {
        Self {
            color,
            opacity: 1.0,
            emissive: color.map(|c| c * RING_EMISSIVE_SCALE),
            metalness: RING_METALNESS,
            roughness: RING_ROUGHNESS,
            shading: Shading::Lit,
        }
    }

    pub fn environment() -> Self {
        Self {
            color: ENVIRONMENT_TINT,
            opacity: 1.0,
            emissive: [0.0; 3],
            metalness: 0.0,
            roughness: 1.0,
            shading: Shading::Unlit,
        }
    }

    pub fn ground() -> Self {
        Self {
            color: GROUND_COLOR,
            opacity: 0.85,
            emissive: [0.0; 3],
            metalness: 0.1,
            roughness: 0.9,
            shading: Shading::Lit,
        }
    }
}
