//! Drawing-surface dimensions, camera projection and resize policy.
//!
//! A [`ViewportState`] is never edited in place: [`ViewportState::resized`]
//! produces a complete candidate (size, pixel ratio and camera aspect
//! together) which the engine commits only after the backend accepted it.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::constants::{
    CAMERA_EYE, CLEAR_COLOR, FAR_PLANE, FOV_DEGREES, NEAR_PLANE, PIXEL_RATIO_CLAMP,
    RESIZE_DEBOUNCE_MS,
};
use crate::error::ResizeError;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point in normalized device coordinates.
    ///
    /// Returns `(origin, direction)`; the origin is the eye and the
    /// direction is normalized.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let rd = (p1 - self.eye).normalize_or_zero();
        (self.eye, rd)
    }
}

/// A pending resize as reported by the host, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeRequest {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewportState {
    width: u32,
    height: u32,
    pixel_ratio: f32,
    pixel_ratio_clamp: f32,
    fov_degrees: f32,
    near: f32,
    far: f32,
    clear_color: [f64; 4],
    camera: Camera,
}

impl ViewportState {
    /// Initial state for a surface of `width`x`height` CSS pixels.
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Result<Self, ResizeError> {
        let aspect = checked_aspect(width, height)?;
        let fovy_radians = FOV_DEGREES.to_radians();
        Ok(Self {
            width,
            height,
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio, PIXEL_RATIO_CLAMP),
            pixel_ratio_clamp: PIXEL_RATIO_CLAMP,
            fov_degrees: FOV_DEGREES,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            clear_color: CLEAR_COLOR,
            camera: Camera {
                eye: CAMERA_EYE,
                target: Vec3::ZERO,
                up: Vec3::Y,
                aspect,
                fovy_radians,
                znear: NEAR_PLANE,
                zfar: FAR_PLANE,
            },
        })
    }

    /// A full candidate state for the requested size; `self` is untouched.
    pub fn resized(&self, request: ResizeRequest) -> Result<Self, ResizeError> {
        let aspect = checked_aspect(request.width, request.height)?;
        let mut next = self.clone();
        next.width = request.width;
        next.height = request.height;
        next.pixel_ratio = clamp_pixel_ratio(request.device_pixel_ratio, self.pixel_ratio_clamp);
        next.camera.aspect = aspect;
        Ok(next)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn pixel_ratio_clamp(&self) -> f32 {
        self.pixel_ratio_clamp
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn clear_color(&self) -> [f64; 4] {
        self.clear_color
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn aspect(&self) -> f32 {
        self.camera.aspect
    }

    /// Backing-store width in device pixels.
    pub fn pixel_width(&self) -> u32 {
        scale_px(self.width, self.pixel_ratio)
    }

    /// Backing-store height in device pixels.
    pub fn pixel_height(&self) -> u32 {
        scale_px(self.height, self.pixel_ratio)
    }

    /// Map a CSS-pixel position on the surface to NDC in [-1, 1]² (Y up).
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        let w = self.width.max(1) as f32;
        let h = self.height.max(1) as f32;
        Vec2::new((x / w) * 2.0 - 1.0, 1.0 - (y / h) * 2.0)
    }
}

/// `min(device_pixel_ratio, clamp)`, falling back to 1 for nonsense input so
/// the result is always positive.
pub fn clamp_pixel_ratio(device_pixel_ratio: f32, clamp: f32) -> f32 {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    dpr.min(clamp)
}

fn checked_aspect(width: u32, height: u32) -> Result<f32, ResizeError> {
    if width == 0 || height == 0 {
        return Err(ResizeError::ZeroArea { width, height });
    }
    Ok(width as f32 / height as f32)
}

fn scale_px(css: u32, ratio: f32) -> u32 {
    ((css as f32 * ratio).round() as u32).max(1)
}

/// Coalesces bursts of resize notifications into the last one.
#[derive(Clone, Debug)]
pub struct ResizeDebouncer {
    delay_ms: f64,
    pending: Option<(ResizeRequest, f64)>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_MS)
    }
}

impl ResizeDebouncer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Record a request; any earlier pending request is replaced and the
    /// quiet period restarts.
    pub fn request(&mut self, request: ResizeRequest, now_ms: f64) {
        self.pending = Some((request, now_ms + self.delay_ms));
    }

    /// The pending request once its quiet period has elapsed.
    pub fn take_ready(&mut self, now_ms: f64) -> Option<ResizeRequest> {
        match self.pending {
            Some((req, due)) if now_ms >= due => {
                self.pending = None;
                Some(req)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
