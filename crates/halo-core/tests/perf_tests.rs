mod common;

use common::running_engine;
use halo_core::constants::PARTICLE_COUNT;
use halo_core::{PerfSample, Tick};

fn run_window(frames: u32) -> Option<PerfSample> {
    let mut engine = running_engine();
    engine.tick(0.0);
    let mut last = None;
    for k in 1..=frames {
        if let Some(s) = engine.tick(k as f64 * 1000.0 / frames as f64).sample() {
            last = Some(s);
        }
    }
    last
}

#[test]
fn sixty_frames_in_a_second_reads_sixty() {
    assert_eq!(run_window(60).map(|s| s.fps), Some(60));
}

#[test]
fn thirty_frames_in_a_second_reads_thirty() {
    assert_eq!(run_window(30).map(|s| s.fps), Some(30));
}

#[test]
fn sample_reports_triangles_and_heap() {
    let mut engine = running_engine();
    engine.backend().heap_bytes.set(Some(42 * 1024 * 1024));
    let expected: u64 = engine
        .scene()
        .meshes()
        .iter()
        .map(|m| m.geometry.triangle_count())
        .sum::<u64>()
        + PARTICLE_COUNT as u64 * 2;

    engine.tick(0.0);
    let mut sample = None;
    for k in 1..=10 {
        sample = engine.tick(k as f64 * 100.0).sample().or(sample);
    }
    let sample = sample.expect("window closed at 1000 ms");
    assert_eq!(sample.fps, 10);
    assert_eq!(sample.triangle_count, Some(expected));
    assert_eq!(sample.memory_mb, Some(42.0));
    assert_eq!(engine.latest_sample(), Some(sample));
}

#[test]
fn missing_sources_read_not_available() {
    let mut engine = running_engine();
    engine.tick(0.0);
    let mut sample = None;
    for k in 1..=4 {
        sample = engine.tick(k as f64 * 250.0).sample().or(sample);
    }
    let sample = sample.expect("window closed");
    assert_eq!(sample.memory_mb, None);
    assert!(sample.to_string().ends_with("mem n/a"));
}

#[test]
fn failed_frames_still_count_toward_fps() {
    let mut engine = running_engine();
    engine.backend().fail_draws.set(21);
    engine.tick(0.0);
    let mut sample = None;
    for k in 1..=20 {
        let tick = engine.tick(k as f64 * 50.0);
        assert!(matches!(tick, Tick::Failed { .. }));
        sample = tick.sample().or(sample);
    }
    let sample = sample.expect("window closed");
    assert_eq!(sample.fps, 20);
    // No draw succeeded inside the window.
    assert_eq!(sample.triangle_count, None);
}

#[test]
fn no_sample_before_a_full_window() {
    let mut engine = running_engine();
    for k in 0..30 {
        assert_eq!(engine.tick(k as f64 * 16.0).sample(), None);
    }
    assert_eq!(engine.latest_sample(), None);
}

#[test]
fn non_finite_timestamp_neither_closes_nor_poisons_the_window() {
    let mut engine = running_engine();
    engine.tick(0.0);
    engine.tick(16.0);
    let mut samples = Vec::new();
    for now in [f64::NAN, f64::INFINITY] {
        samples.extend(engine.tick(now).sample());
    }
    for k in 2..=9 {
        samples.extend(engine.tick(k as f64 * 16.0).sample());
    }
    assert!(samples.is_empty(), "no sample inside the first second");

    let mut sample = None;
    for k in 10..=63 {
        sample = engine.tick(k as f64 * 16.0).sample().or(sample);
    }
    let sample = sample.expect("window closed at 1008 ms");
    assert!(sample.fps > 0);
}
