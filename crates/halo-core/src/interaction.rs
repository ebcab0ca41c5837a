//! Proximity response of the rings to the projected pointer.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::constants::{
    PROXIMITY_FALLOFF, PROXIMITY_SCALE_MAX, PROXIMITY_SCALE_MIN, RING_SPIN_Y, RING_SPIN_Z_BASE,
    RING_SPIN_Z_STEP,
};
use crate::scene::graph::SceneGraph;
use crate::scene::rings::Ring;

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Exact at both ends.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Linear proximity in [0, 1]: 1 at the pointer, 0 from `1 / falloff` on.
#[inline]
pub fn proximity(distance: f32) -> f32 {
    (1.0 - distance * PROXIMITY_FALLOFF).clamp(0.0, 1.0)
}

/// Uniform ring scale for a ring `distance` world units from the pointer.
#[inline]
pub fn proximity_scale(distance: f32) -> f32 {
    lerp(
        PROXIMITY_SCALE_MIN,
        PROXIMITY_SCALE_MAX,
        ease_out_cubic(proximity(distance)),
    )
}

/// Per-frame idle spin `(dz, dy)` for the ring at `index`.
#[inline]
pub fn idle_spin(index: usize) -> (f32, f32) {
    (
        RING_SPIN_Z_BASE + RING_SPIN_Z_STEP * (index % 3) as f32,
        RING_SPIN_Y,
    )
}

/// Holds no state of its own; the only input besides the rings is the
/// pointer snapshot taken for the frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct InteractionResponder;

impl InteractionResponder {
    pub fn respond(&self, graph: &mut SceneGraph, rings: &[Ring], pointer: Vec3) {
        for ring in rings {
            let d = graph.world_position(ring.node).distance(pointer);
            let s = proximity_scale(d);
            let (dz, dy) = idle_spin(ring.index());
            let local = graph.local_mut(ring.node);
            local.scale = Vec3::splat(s);
            local.rotation.z = (local.rotation.z + dz).rem_euclid(TAU);
            local.rotation.y = (local.rotation.y + dy).rem_euclid(TAU);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn idle_spin_cycles_every_three_rings() {
        assert_eq!(idle_spin(0), idle_spin(3));
        assert!((idle_spin(2).0 - 0.006).abs() < 1e-7);
        assert_eq!(idle_spin(4).1, RING_SPIN_Y);
    }

    #[test]
    fn spin_angles_wrap_to_one_turn() {
        use crate::scene::graph::SceneGraph;
        use crate::scene::rings::RingCluster;

        let mut graph = SceneGraph::new("root");
        let root = graph.root();
        let cluster = RingCluster::build(&mut graph, root, 3, &mut Vec::new());
        let node = cluster.rings()[0].node;
        graph.local_mut(node).rotation.z = TAU - 0.001;
        graph.local_mut(node).rotation.y = TAU - RING_SPIN_Y * 0.5;
        graph.update_world();

        let far = Vec3::splat(100.0);
        InteractionResponder.respond(&mut graph, cluster.rings(), far);
        let (dz, dy) = idle_spin(0);
        let r = graph.local(node).rotation;
        assert!((r.z - (dz - 0.001)).abs() < 1e-5);
        assert!((r.y - dy * 0.5).abs() < 1e-5);

        for _ in 0..10_000 {
            InteractionResponder.respond(&mut graph, cluster.rings(), far);
        }
        for ring in cluster.rings() {
            let r = graph.local(ring.node).rotation;
            assert!((0.0..TAU).contains(&r.z) && (0.0..TAU).contains(&r.y));
        }
    }
}
