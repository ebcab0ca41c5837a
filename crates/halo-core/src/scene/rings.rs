use std::f32::consts::TAU;

use glam::Vec3;

use super::geometry::Geometry;
use super::graph::{NodeId, SceneGraph, Transform};
use super::material::Material;
use super::{MeshId, MeshSource};
use crate::constants::*;

/// One torus of the cluster. Only its node's rotation and scale change
/// after construction.
#[derive(Clone, Debug)]
pub struct Ring {
    index: usize,
    pub base_radius: f32,
    pub tube_radius: f32,
    pub color: [f32; 3],
    pub node: NodeId,
    pub mesh: MeshId,
}

impl Ring {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Ordered rings under a shared group node.
#[derive(Clone, Debug)]
pub struct RingCluster {
    pub group: NodeId,
    rings: Vec<Ring>,
}

impl RingCluster {
    /// Lay out `count` rings under `parent`. Each ring's geometry and
    /// material are appended to the mesh tables; the ring records the slot.
    pub fn build(
        graph: &mut SceneGraph,
        parent: NodeId,
        count: usize,
        meshes: &mut Vec<MeshSource>,
    ) -> Self {
        let group = graph.add_child(parent, "ring_cluster", Transform::default());
        let rings = (0..count)
            .map(|index| {
                let base_radius = RING_BASE_RADIUS + RING_BASE_RADIUS_STEP * index as f32;
                let tube_radius = RING_TUBE_RADIUS + RING_TUBE_RADIUS_STEP * index as f32;
                let color = srgb_to_linear(hsl_to_rgb(
                    ring_hue(index, count),
                    RING_SATURATION,
                    RING_LIGHTNESS,
                ));
                let node = graph.add_child(group, "ring", ring_transform(index, count));
                let mesh = MeshId(meshes.len());
                meshes.push(MeshSource {
                    label: "ring",
                    geometry: Geometry::torus(
                        base_radius,
                        tube_radius,
                        RING_RADIAL_SEGMENTS,
                        RING_TUBULAR_SEGMENTS,
                    ),
                    material: Material::metallic(color),
                });
                Ring {
                    index,
                    base_radius,
                    tube_radius,
                    color,
                    node,
                    mesh,
                }
            })
            .collect();
        Self { group, rings }
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }
}

/// Initial placement: a circle whose radius grows with the index, tilt
/// alternating with index parity.
pub fn ring_transform(index: usize, count: usize) -> Transform {
    let angle = index as f32 / count.max(1) as f32 * TAU;
    let layout_radius = RING_LAYOUT_RADIUS + RING_LAYOUT_GROWTH * index as f32;
    let tilt = if index % 2 == 0 { RING_TILT } else { -RING_TILT };
    Transform {
        position: Vec3::new(
            angle.cos() * layout_radius,
            angle.sin() * layout_radius,
            RING_DEPTH_STEP * index as f32,
        ),
        rotation: Vec3::new(tilt, angle * 0.5, 0.0),
        scale: Vec3::ONE,
    }
}

/// Hue in turns, sweeping `RING_HUE_ARC` across the cluster and wrapping
/// past 1.0.
pub fn ring_hue(index: usize, count: usize) -> f32 {
    let span = count.saturating_sub(1).max(1) as f32;
    (RING_HUE_START + RING_HUE_ARC * index as f32 / span).rem_euclid(1.0)
}

/// HSL (all components in [0, 1]) to sRGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * 6.0 * (2.0 / 3.0 - t)
        } else {
            p
        }
    };
    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}

pub fn srgb_to_linear(c: [f32; 3]) -> [f32; 3] {
    c.map(|v| {
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    })
}
