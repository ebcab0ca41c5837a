//! Seams between the engine and the platform: the draw backend and the
//! accelerated-graphics capability probe.

use glam::Mat4;

use crate::error::{DisposalError, RenderError, ResizeError, SurfaceInitError};
use crate::lifecycle::ResourceHandle;
use crate::perf::DrawStats;
use crate::scene::lights::Lighting;
use crate::scene::{DrawItem, SceneContent};
use crate::viewport::ViewportState;

/// Everything a backend needs to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameDraw<'a> {
    pub viewport: &'a ViewportState,
    pub items: &'a [DrawItem],
    pub particle_model: Mat4,
    pub particle_count: u32,
    /// Value of the particle shader's time uniform, in milliseconds.
    pub elapsed_ms: f32,
    pub lighting: &'a Lighting,
}

/// A drawing context able to hold the scene's resources and draw frames.
pub trait RenderBackend {
    /// Create GPU resources for every mesh, material, shader and the
    /// particle buffer in `scene`. The returned handles (plus one for the
    /// context itself) are what [`RenderBackend::release`] later accepts.
    fn upload(&mut self, scene: &SceneContent) -> Result<Vec<ResourceHandle>, SurfaceInitError>;

    /// Reconfigure for `viewport`. On error the backend keeps its previous
    /// configuration.
    fn resize(&mut self, viewport: &ViewportState) -> Result<(), ResizeError>;

    fn draw(&mut self, frame: &FrameDraw<'_>) -> Result<DrawStats, RenderError>;

    fn release(&mut self, handle: &ResourceHandle) -> Result<(), DisposalError>;

    /// Heap usage of the hosting platform, when it exposes one.
    fn heap_used_bytes(&self) -> Option<u64> {
        None
    }
}

/// Feature detection performed by the host before any engine exists.
pub trait CapabilityProbe {
    fn accelerated_graphics(&self) -> bool;
}

impl<F: Fn() -> bool> CapabilityProbe for F {
    fn accelerated_graphics(&self) -> bool {
        self()
    }
}

/// Gate engine construction on accelerated-graphics support.
pub fn require_accelerated(probe: &impl CapabilityProbe) -> Result<(), SurfaceInitError> {
    if probe.accelerated_graphics() {
        Ok(())
    } else {
        log::warn!("accelerated graphics unavailable; 3D layer disabled");
        Err(SurfaceInitError::Unsupported)
    }
}
