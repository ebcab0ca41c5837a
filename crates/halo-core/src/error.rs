//! Error taxonomy for the engine.
//!
//! Construction failures ([`SurfaceInitError`]) propagate to the host, which
//! disables only the 3D layer. Everything raised after construction is
//! reported and absorbed so the render loop keeps running.

use thiserror::Error;

/// The platform could not provide an accelerated drawing context.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceInitError {
    #[error("accelerated graphics are not supported on this platform")]
    Unsupported,
    #[error("no compatible graphics adapter")]
    NoAdapter,
    #[error("could not create drawing surface: {0}")]
    Surface(String),
    #[error("graphics device request failed: {0}")]
    Device(String),
    #[error("scene upload failed for {label}: {reason}")]
    Upload { label: String, reason: String },
}

/// A resize request was rejected; the previous dimensions stay in effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResizeError {
    #[error("cannot resize to a zero-area surface ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },
    #[error("surface {width}x{height} px exceeds the device limit of {max} px")]
    ExceedsLimit { width: u32, height: u32, max: u32 },
    #[error("backend rejected resize: {0}")]
    Backend(String),
}

/// A single frame could not be drawn.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("surface lost or outdated; reconfigured for the next frame")]
    SurfaceLost,
    #[error("timed out acquiring the next surface texture")]
    Timeout,
    #[error("out of graphics memory")]
    OutOfMemory,
    #[error("backend is not ready to draw")]
    NotReady,
    #[error("draw failed: {0}")]
    Backend(String),
}

/// Releasing one GPU-resident resource failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DisposalError {
    #[error("{label} was already released")]
    AlreadyReleased { label: String },
    #[error("{label} is not known to the backend")]
    Unknown { label: String },
    #[error("failed to release {label}: {reason}")]
    Backend { label: String, reason: String },
}

/// Misuse of the engine lifecycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Surface(#[from] SurfaceInitError),
    #[error("engine has been disposed")]
    Disposed,
}
