//! The render loop: one explicit handle owning viewport, scene, pointer,
//! clock, telemetry and GPU resources, driven only by `tick(timestamp)`.

use rand::{rngs::StdRng, SeedableRng};

use crate::backend::{require_accelerated, CapabilityProbe, FrameDraw, RenderBackend};
use crate::clock::FrameClock;
use crate::error::{EngineError, ResizeError, SurfaceInitError};
use crate::interaction::InteractionResponder;
use crate::lifecycle::{DisposalReport, ResourceLedger};
use crate::perf::{DrawStats, PerfMonitor, PerfSample};
use crate::pointer::{PointerProjector, PointerState};
use crate::scene::SceneContent;
use crate::viewport::{ResizeDebouncer, ResizeRequest, ViewportState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
    Disposed,
}

/// Result of one `tick`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    /// Not running; nothing happened.
    Idle,
    Rendered {
        stats: DrawStats,
        sample: Option<PerfSample>,
    },
    /// The draw failed and was logged; the next tick runs normally.
    Failed { sample: Option<PerfSample> },
}

impl Tick {
    pub fn sample(&self) -> Option<PerfSample> {
        match self {
            Tick::Idle => None,
            Tick::Rendered { sample, .. } | Tick::Failed { sample } => *sample,
        }
    }
}

pub struct Engine<B: RenderBackend> {
    state: LoopState,
    backend: B,
    viewport: ViewportState,
    scene: SceneContent,
    projector: PointerProjector,
    responder: InteractionResponder,
    clock: FrameClock,
    perf: PerfMonitor,
    resize: ResizeDebouncer,
    resources: ResourceLedger,
    frames: u64,
}

impl<B: RenderBackend> Engine<B> {
    /// Build the scene for an already-initialized surface. The engine starts
    /// out `Uninitialized`; call [`Engine::start`] to upload and run.
    pub fn new(backend: B, viewport: ViewportState, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let scene = SceneContent::build(&mut rng);
        log::info!(
            "[engine] scene built: rings={} particles={} meshes={}",
            scene.rings().len(),
            scene.particles().len(),
            scene.meshes().len()
        );
        Self {
            state: LoopState::Uninitialized,
            backend,
            viewport,
            scene,
            projector: PointerProjector::default(),
            responder: InteractionResponder,
            clock: FrameClock::default(),
            perf: PerfMonitor::default(),
            resize: ResizeDebouncer::default(),
            resources: ResourceLedger::default(),
            frames: 0,
        }
    }

    /// Probe, build the backend, construct and start, in that order. The
    /// backend builder is never called when the probe reports no support.
    pub fn boot(
        probe: &impl CapabilityProbe,
        viewport: ViewportState,
        seed: u64,
        build: impl FnOnce(&ViewportState) -> Result<B, SurfaceInitError>,
    ) -> Result<Self, EngineError> {
        require_accelerated(probe)?;
        let backend = build(&viewport)?;
        let mut engine = Self::new(backend, viewport, seed);
        engine.start()?;
        Ok(engine)
    }

    /// Upload scene resources and enter `Running`. Calling it again while
    /// running is a no-op.
    pub fn start(&mut self) -> Result<(), EngineError> {
        match self.state {
            LoopState::Running => return Ok(()),
            LoopState::Disposed => return Err(EngineError::Disposed),
            LoopState::Uninitialized => {}
        }
        let handles = self.backend.upload(&self.scene)?;
        self.resources.track(handles);
        self.state = LoopState::Running;
        log::info!(
            "[engine] running: {}x{} @{}x, {} GPU resources",
            self.viewport.width(),
            self.viewport.height(),
            self.viewport.pixel_ratio(),
            self.resources.len()
        );
        Ok(())
    }

    pub fn tick(&mut self, now_ms: f64) -> Tick {
        if self.state != LoopState::Running {
            return Tick::Idle;
        }
        if let Some(request) = self.resize.take_ready(now_ms) {
            if let Err(e) = self.apply_resize(request) {
                log::warn!("[engine] resize rejected: {e}");
            }
        }

        self.clock.advance(now_ms);
        let pointer = self.projector.snapshot();
        self.scene
            .update(self.clock.elapsed_ms(), pointer.world_point, &self.responder);

        let items = self.scene.draw_list();
        let frame = FrameDraw {
            viewport: &self.viewport,
            items: &items,
            particle_model: self.scene.particle_model(),
            particle_count: self.scene.particles().len() as u32,
            elapsed_ms: self.scene.particles().elapsed_ms(),
            lighting: self.scene.lighting(),
        };
        let drawn = self.backend.draw(&frame);
        self.frames += 1;

        let backend = &self.backend;
        let sample = self
            .perf
            .record_frame(now_ms, drawn.as_ref().ok().copied(), || {
                backend.heap_used_bytes()
            });
        if let Some(s) = sample {
            log::debug!("[perf] {s}");
        }
        match drawn {
            Ok(stats) => Tick::Rendered { stats, sample },
            Err(e) => {
                log::error!("[engine] frame {} failed: {e}", self.frames);
                Tick::Failed { sample }
            }
        }
    }

    /// Queue a resize; it is applied by the first tick after the debounce
    /// window, replacing any request still pending.
    pub fn request_resize(&mut self, request: ResizeRequest, now_ms: f64) {
        if self.state != LoopState::Disposed {
            self.resize.request(request, now_ms);
        }
    }

    /// Apply a resize immediately. Size, pixel ratio and camera aspect are
    /// committed together, and only if the backend accepted them.
    pub fn apply_resize(&mut self, request: ResizeRequest) -> Result<(), ResizeError> {
        let next = self.viewport.resized(request)?;
        if next == self.viewport {
            return Ok(());
        }
        self.backend.resize(&next)?;
        log::info!(
            "[engine] resized to {}x{} ({}x{} px)",
            next.width(),
            next.height(),
            next.pixel_width(),
            next.pixel_height()
        );
        self.viewport = next;
        Ok(())
    }

    /// Project a pointer/touch position (CSS pixels on the surface).
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> bool {
        if self.state == LoopState::Disposed {
            return false;
        }
        self.projector.pointer_moved(&self.viewport, x, y)
    }

    /// Release every GPU resource and stop accepting ticks. Idempotent: a
    /// second call attempts nothing and returns an empty report.
    pub fn dispose(&mut self) -> DisposalReport {
        if self.state == LoopState::Disposed {
            return DisposalReport::default();
        }
        self.state = LoopState::Disposed;
        let backend = &mut self.backend;
        let report = self.resources.release_all(|h| backend.release(h));
        for failure in &report.failures {
            log::warn!("[engine] disposal: {failure}");
        }
        log::info!(
            "[engine] disposed: {} released, {} failed",
            report.released(),
            report.failures.len()
        );
        report
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn scene(&self) -> &SceneContent {
        &self.scene
    }

    pub fn pointer(&self) -> PointerState {
        self.projector.snapshot()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn latest_sample(&self) -> Option<PerfSample> {
        self.perf.latest()
    }

    pub fn resources(&self) -> &ResourceLedger {
        &self.resources
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
