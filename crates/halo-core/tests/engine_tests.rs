// Render-loop lifecycle, failure handling and disposal, driven by manual
// ticks against the mock backend.

mod common;

use std::cell::Cell;

use common::{running_engine, viewport, MockBackend};
use halo_core::constants::{PARTICLE_COUNT, RING_COUNT};
use halo_core::{
    DisposalError, Engine, EngineError, LoopState, ResizeRequest, ResourceKind, SurfaceInitError,
    Tick,
};

#[test]
fn ticks_before_start_are_idle() {
    let mut engine = Engine::new(MockBackend::new(), viewport(), 1);
    assert_eq!(engine.state(), LoopState::Uninitialized);
    assert_eq!(engine.tick(0.0), Tick::Idle);
    assert_eq!(engine.tick(16.0), Tick::Idle);
    assert_eq!(engine.backend().draws.get(), 0);
    assert_eq!(engine.backend().uploads.get(), 0);
}

#[test]
fn start_uploads_once_and_runs() {
    let mut engine = Engine::new(MockBackend::new(), viewport(), 1);
    engine.start().unwrap();
    engine.start().unwrap();
    assert_eq!(engine.state(), LoopState::Running);
    assert_eq!(engine.backend().uploads.get(), 1);
    assert!(matches!(engine.tick(0.0), Tick::Rendered { .. }));
    assert_eq!(engine.backend().draws.get(), 1);
}

#[test]
fn failed_upload_leaves_engine_uninitialized() {
    let backend = MockBackend::new();
    backend.fail_upload.set(true);
    let mut engine = Engine::new(backend, viewport(), 1);
    let err = engine.start().unwrap_err();
    assert!(matches!(
        err,
        EngineError::Surface(SurfaceInitError::Upload { .. })
    ));
    assert_eq!(engine.state(), LoopState::Uninitialized);
    assert_eq!(engine.tick(0.0), Tick::Idle);
}

#[test]
fn unsupported_platform_never_builds_an_engine() {
    let built = Cell::new(false);
    let result = Engine::boot(&|| false, viewport(), 1, |_vp| {
        built.set(true);
        Ok(MockBackend::new())
    });
    assert!(matches!(
        result,
        Err(EngineError::Surface(SurfaceInitError::Unsupported))
    ));
    assert!(!built.get());
}

#[test]
fn supported_platform_boots_into_running() {
    let mut engine = Engine::boot(&|| true, viewport(), 1, |_vp| Ok(MockBackend::new())).unwrap();
    assert_eq!(engine.state(), LoopState::Running);
    engine.tick(0.0);
    assert_eq!(engine.backend().draws.get(), 1);
}

#[test]
fn a_failed_frame_does_not_stop_the_loop() {
    let mut engine = running_engine();
    engine.backend().fail_draws.set(1);
    assert!(matches!(engine.tick(0.0), Tick::Failed { .. }));
    assert!(matches!(engine.tick(16.0), Tick::Rendered { .. }));
    assert!(matches!(engine.tick(32.0), Tick::Rendered { .. }));
    assert_eq!(engine.backend().draws.get(), 3);
    assert_eq!(engine.frames(), 3);
}

#[test]
fn entity_counts_are_fixed_for_the_session() {
    let mut engine = running_engine();
    let before: Vec<_> = engine.scene().particles().particles().to_vec();
    for i in 0..120 {
        engine.tick(i as f64 * 16.0);
    }
    assert_eq!(engine.scene().rings().len(), RING_COUNT);
    assert_eq!(engine.scene().particles().len(), PARTICLE_COUNT);
    assert_eq!(engine.backend().last_particle_count.get(), PARTICLE_COUNT as u32);
    assert_eq!(engine.scene().particles().particles(), &before[..]);
    for (i, ring) in engine.scene().rings().rings().iter().enumerate() {
        assert_eq!(ring.index(), i);
    }
}

#[test]
fn particle_time_uniform_follows_the_clock() {
    let mut engine = running_engine();
    engine.tick(1000.0);
    engine.tick(1016.0);
    engine.tick(1048.0);
    assert_eq!(engine.clock().elapsed_ms(), 48.0);
    assert_eq!(engine.backend().last_elapsed_ms.get(), 48.0);
    // A clock anomaly does not run time backwards.
    engine.tick(900.0);
    assert_eq!(engine.clock().elapsed_ms(), 48.0);
}

#[test]
fn rings_spin_even_without_pointer_activity() {
    let mut engine = running_engine();
    engine.tick(0.0);
    let graph = engine.scene().graph();
    let node = engine.scene().rings().rings()[2].node;
    let z0 = graph.local(node).rotation.z;
    engine.tick(16.0);
    let graph = engine.scene().graph();
    let z1 = graph.local(node).rotation.z;
    assert!((z1 - z0 - 0.006).abs() < 1e-6);
}

#[test]
fn dispose_is_idempotent() {
    let mut engine = running_engine();
    engine.tick(0.0);
    let tracked = engine.resources().len();
    let first = engine.dispose();
    assert_eq!(first.attempted, tracked);
    assert!(first.is_clean());
    assert_eq!(engine.backend().release_count(), tracked);

    let second = engine.dispose();
    assert_eq!(second.attempted, 0);
    assert!(second.is_clean());
    assert_eq!(engine.backend().release_count(), tracked);
    assert_eq!(engine.state(), LoopState::Disposed);
}

#[test]
fn ticks_after_dispose_are_no_ops() {
    let mut engine = running_engine();
    engine.tick(0.0);
    engine.dispose();
    assert_eq!(engine.tick(16.0), Tick::Idle);
    assert_eq!(engine.tick(32.0), Tick::Idle);
    assert_eq!(engine.backend().draws.get(), 1);
    assert!(matches!(engine.start(), Err(EngineError::Disposed)));
    assert!(!engine.pointer_moved(10.0, 10.0));
}

#[test]
fn disposal_failures_are_reported_not_swallowed() {
    let mut engine = running_engine();
    engine.backend().fail_release_kind.set(Some(ResourceKind::Material));
    let materials = engine.resources().count(ResourceKind::Material);
    let report = engine.dispose();
    assert_eq!(report.failures.len(), materials);
    assert!(report
        .failures
        .iter()
        .all(|f| matches!(f, DisposalError::Backend { .. })));
    // Every other resource was still released.
    assert_eq!(report.released(), report.attempted - materials);
    let releases = engine.backend().releases.borrow();
    assert_eq!(releases.last().map(|h| h.kind), Some(ResourceKind::Context));
}

#[test]
fn every_kind_of_resource_is_tracked() {
    let engine = running_engine();
    let r = engine.resources();
    assert_eq!(r.count(ResourceKind::Shader), 2);
    assert_eq!(r.count(ResourceKind::ParticleBuffer), 1);
    assert_eq!(r.count(ResourceKind::Context), 1);
    assert_eq!(r.count(ResourceKind::Geometry), RING_COUNT + 2);
    assert_eq!(r.count(ResourceKind::Material), RING_COUNT + 2);
}

#[test]
fn resize_waits_for_the_debounce_window() {
    let mut engine = running_engine();
    let req = |w, h| ResizeRequest {
        width: w,
        height: h,
        device_pixel_ratio: 1.0,
    };
    engine.tick(0.0);
    engine.request_resize(req(800, 600), 10.0);
    engine.request_resize(req(1024, 600), 40.0);
    engine.tick(100.0);
    assert_eq!(engine.viewport().width(), 1280);
    engine.tick(120.0);
    assert_eq!(engine.viewport().width(), 1024);
    assert_eq!(*engine.backend().resizes.borrow(), vec![(1024, 600)]);
}
