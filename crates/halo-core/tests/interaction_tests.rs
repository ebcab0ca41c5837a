mod common;

use common::running_engine;
use glam::{Vec3, Vec4Swizzles};
use halo_core::constants::{PROXIMITY_SCALE_MAX, PROXIMITY_SCALE_MIN};
use halo_core::interaction::proximity_scale;
use halo_core::ViewportState;

/// CSS-pixel position of a world point on the surface.
fn screen_of(viewport: &ViewportState, p: Vec3) -> (f32, f32) {
    let clip = viewport.camera().view_projection() * p.extend(1.0);
    let ndc = clip.xy() / clip.w;
    (
        (ndc.x + 1.0) * 0.5 * viewport.width() as f32,
        (1.0 - ndc.y) * 0.5 * viewport.height() as f32,
    )
}

#[test]
fn scale_endpoints() {
    assert_eq!(proximity_scale(0.0), PROXIMITY_SCALE_MAX);
    assert_eq!(proximity_scale(10.0), PROXIMITY_SCALE_MIN);
    assert_eq!(proximity_scale(1.0 / 0.26 + 0.01), PROXIMITY_SCALE_MIN);
}

#[test]
fn scale_never_grows_with_distance() {
    let mut prev = proximity_scale(0.0);
    for i in 1..=500 {
        let s = proximity_scale(i as f32 * 0.01);
        assert!(s <= prev + 1e-6, "scale rose at d={}", i as f32 * 0.01);
        assert!((PROXIMITY_SCALE_MIN..=PROXIMITY_SCALE_MAX).contains(&s));
        prev = s;
    }
}

#[test]
fn ring_under_the_pointer_swells() {
    let mut engine = running_engine();
    engine.tick(0.0);
    let ring = engine.scene().rings().rings()[0].clone();
    let target = engine.scene().graph().world_position(ring.node);
    let (x, y) = screen_of(engine.viewport(), target);

    assert!(engine.pointer_moved(x, y));
    let hit = engine.pointer().world_point;
    assert!(hit.z.abs() < 1e-4);
    assert!((hit.truncate() - target.truncate()).length() < 1e-3);

    engine.tick(0.0);
    let scale = engine.scene().graph().local(ring.node).scale;
    assert!((scale.x - PROXIMITY_SCALE_MAX).abs() < 1e-3, "scale {scale}");
    assert_eq!(scale.x, scale.y);
    assert_eq!(scale.y, scale.z);
}

#[test]
fn distant_pointer_leaves_ring_at_rest_scale() {
    let mut engine = running_engine();
    engine.tick(0.0);
    // Top-left corner of the surface lands well over 4 units from ring 0.
    assert!(engine.pointer_moved(0.0, 0.0));
    engine.tick(0.0);
    let ring = &engine.scene().rings().rings()[0];
    let scale = engine.scene().graph().local(ring.node).scale;
    assert_eq!(scale, Vec3::splat(PROXIMITY_SCALE_MIN));
}

#[test]
fn closer_rings_are_never_smaller() {
    let mut engine = running_engine();
    engine.tick(0.0);
    engine.tick(16.0);
    let pointer = engine.pointer().world_point;
    let graph = engine.scene().graph();
    let mut rings: Vec<(f32, f32)> = engine
        .scene()
        .rings()
        .rings()
        .iter()
        .map(|r| {
            (
                graph.world_position(r.node).distance(pointer),
                graph.local(r.node).scale.x,
            )
        })
        .collect();
    rings.sort_by(|a, b| a.0.total_cmp(&b.0));
    for pair in rings.windows(2) {
        assert!(pair[1].1 <= pair[0].1 + 1e-6);
    }
}
