//! Coarse frame-rate and resource telemetry.

use std::fmt;

use crate::constants::{BYTES_PER_MB, PERF_WINDOW_MS};

/// What the backend reports about one successful draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub draw_calls: u32,
    pub triangles: u64,
}

/// One sampling window's worth of telemetry. `None` means the source was
/// unavailable, never a stale value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerfSample {
    pub fps: u32,
    pub triangle_count: Option<u64>,
    pub memory_mb: Option<f64>,
}

impl fmt::Display for PerfSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fps", self.fps)?;
        match self.triangle_count {
            Some(t) => write!(f, " · {t} tris")?,
            None => write!(f, " · tris n/a")?,
        }
        match self.memory_mb {
            Some(mb) => write!(f, " · {mb:.1} MB"),
            None => write!(f, " · mem n/a"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PerfMonitor {
    window_ms: f64,
    window_start: Option<f64>,
    frame_count: u32,
    last_draw: Option<DrawStats>,
    latest: Option<PerfSample>,
}

impl Default for PerfMonitor {
    fn default() -> Self {
        Self::new(PERF_WINDOW_MS)
    }
}

impl PerfMonitor {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            window_start: None,
            frame_count: 0,
            last_draw: None,
            latest: None,
        }
    }

    /// Count one tick at `now_ms`. The first tick only opens the window.
    /// When the window has spanned `window_ms`, returns the finished sample;
    /// `heap_bytes` is only consulted then. Non-finite timestamps are ignored.
    pub fn record_frame(
        &mut self,
        now_ms: f64,
        draw: Option<DrawStats>,
        heap_bytes: impl FnOnce() -> Option<u64>,
    ) -> Option<PerfSample> {
        if !now_ms.is_finite() {
            return None;
        }
        let Some(start) = self.window_start else {
            self.window_start = Some(now_ms);
            self.last_draw = draw;
            return None;
        };
        self.frame_count += 1;
        if draw.is_some() {
            self.last_draw = draw;
        }
        let span = (now_ms - start).max(0.0);
        if span < self.window_ms {
            return None;
        }
        let sample = PerfSample {
            fps: (self.frame_count as f64 * 1000.0 / span).round() as u32,
            triangle_count: self.last_draw.map(|d| d.triangles),
            memory_mb: heap_bytes().map(|b| b as f64 / BYTES_PER_MB),
        };
        self.window_start = Some(now_ms);
        self.frame_count = 0;
        self.last_draw = None;
        self.latest = Some(sample);
        Some(sample)
    }

    pub fn latest(&self) -> Option<PerfSample> {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_marks_missing_sources() {
        let s = PerfSample {
            fps: 58,
            triangle_count: None,
            memory_mb: None,
        };
        assert_eq!(s.to_string(), "58 fps · tris n/a · mem n/a");
        let s = PerfSample {
            fps: 60,
            triangle_count: Some(1200),
            memory_mb: Some(42.3),
        };
        assert_eq!(s.to_string(), "60 fps · 1200 tris · 42.3 MB");
    }

    #[test]
    fn heap_is_only_read_when_a_window_closes() {
        let mut m = PerfMonitor::default();
        let mut reads = 0;
        m.record_frame(0.0, None, || {
            reads += 1;
            None
        });
        m.record_frame(500.0, None, || {
            reads += 1;
            None
        });
        assert_eq!(reads, 0);
        m.record_frame(1000.0, None, || {
            reads += 1;
            Some(0)
        });
        assert_eq!(reads, 1);
    }
}
