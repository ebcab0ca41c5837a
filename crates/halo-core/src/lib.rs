//! Platform-agnostic render & interaction engine for the halo hero scene.
//!
//! Nothing here touches a GPU or a browser. A host supplies a
//! [`RenderBackend`], ticks the [`Engine`] with monotonic timestamps and
//! forwards resize and pointer events.

pub mod backend;
pub mod clock;
pub mod constants;
pub mod engine;
pub mod error;
pub mod interaction;
pub mod lifecycle;
pub mod perf;
pub mod pointer;
pub mod scene;
pub mod viewport;

pub use backend::{require_accelerated, CapabilityProbe, FrameDraw, RenderBackend};
pub use engine::{Engine, LoopState, Tick};
pub use error::*;
pub use lifecycle::{DisposalReport, ResourceHandle, ResourceId, ResourceKind};
pub use perf::{DrawStats, PerfSample};
pub use pointer::PointerState;
pub use viewport::{ResizeRequest, ViewportState};

// Shaders bundled as string constants
pub const SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub const PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
