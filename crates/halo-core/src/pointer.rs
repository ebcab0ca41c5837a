//! Pointer/touch → world-space projection onto the `z = 0` plane.

use glam::{Vec2, Vec3};

use crate::constants::RAY_PARALLEL_EPSILON;
use crate::viewport::ViewportState;

/// Last committed pointer sample. Copied whole, so a reader never sees a
/// half-updated value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub ndc: Vec2,
    pub world_point: Vec3,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            ndc: Vec2::ZERO,
            world_point: Vec3::ZERO,
        }
    }
}

/// Distance `t` along the ray to the plane `z = plane_z`, if the ray hits it
/// in front of the origin.
#[inline]
pub fn ray_plane_z(ray_origin: Vec3, ray_dir: Vec3, plane_z: f32) -> Option<f32> {
    if ray_dir.z.abs() < RAY_PARALLEL_EPSILON {
        return None;
    }
    let t = (plane_z - ray_origin.z) / ray_dir.z;
    (t >= 0.0).then_some(t)
}

#[derive(Clone, Debug, Default)]
pub struct PointerProjector {
    state: PointerState,
}

impl PointerProjector {
    /// Project a surface position (CSS pixels from the top-left corner).
    ///
    /// Returns whether the world point moved. On a miss the NDC is still
    /// recorded and the previous world point is kept.
    pub fn pointer_moved(&mut self, viewport: &ViewportState, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let ndc = viewport.to_ndc(x, y);
        let (ro, rd) = viewport.camera().ray_through_ndc(ndc);
        self.commit(ndc, ro, rd)
    }

    fn commit(&mut self, ndc: Vec2, ray_origin: Vec3, ray_dir: Vec3) -> bool {
        let world_point = ray_plane_z(ray_origin, ray_dir, 0.0).map(|t| ray_origin + ray_dir * t);
        self.state = PointerState {
            ndc,
            world_point: world_point.unwrap_or(self.state.world_point),
        };
        world_point.is_some()
    }

    pub fn snapshot(&self) -> PointerState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_ray_misses() {
        assert_eq!(ray_plane_z(Vec3::new(0.0, 0.0, 6.0), Vec3::X, 0.0), None);
    }

    #[test]
    fn ray_pointing_away_misses() {
        assert_eq!(ray_plane_z(Vec3::new(0.0, 0.0, 6.0), Vec3::Z, 0.0), None);
    }

    #[test]
    fn straight_down_hits_at_eye_distance() {
        let t = ray_plane_z(Vec3::new(0.0, 0.0, 6.0), Vec3::NEG_Z, 0.0);
        assert_eq!(t, Some(6.0));
    }

    #[test]
    fn miss_keeps_world_point_but_records_ndc() {
        let eye = Vec3::new(0.0, 0.0, 6.0);
        let mut projector = PointerProjector::default();
        assert!(projector.commit(Vec2::new(0.25, -0.5), eye, Vec3::new(0.5, -1.0, -6.0).normalize()));
        let hit = projector.snapshot().world_point;
        assert!(hit.z.abs() < 1e-5);

        assert!(!projector.commit(Vec2::new(0.9, 0.9), eye, Vec3::X));
        let after = projector.snapshot();
        assert_eq!(after.ndc, Vec2::new(0.9, 0.9));
        assert_eq!(after.world_point, hit);
    }
}
