/// Elapsed-time accumulator fed by host timestamps (milliseconds).
///
/// A timestamp earlier than the last one yields `dt = 0` and does not move
/// the reference point back, so `elapsed` never decreases.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    elapsed_ms: f64,
    last_timestamp: Option<f64>,
}

impl FrameClock {
    /// Advance to `now_ms`, returning `dt` in milliseconds. The first call
    /// only establishes the reference point.
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_timestamp {
            Some(last) if now_ms.is_finite() => (now_ms - last).max(0.0),
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_timestamp = Some(self.last_timestamp.map_or(now_ms, |l| l.max(now_ms)));
        }
        self.elapsed_ms += dt;
        dt
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backwards_timestamp_is_clamped() {
        let mut c = FrameClock::default();
        assert_eq!(c.advance(100.0), 0.0);
        assert_eq!(c.advance(116.0), 16.0);
        assert_eq!(c.advance(90.0), 0.0);
        assert_eq!(c.advance(132.0), 16.0);
        assert_eq!(c.elapsed_ms(), 32.0);
    }

    #[test]
    fn non_finite_timestamp_is_ignored() {
        let mut c = FrameClock::default();
        c.advance(10.0);
        assert_eq!(c.advance(f64::NAN), 0.0);
        assert_eq!(c.last_timestamp(), Some(10.0));
    }
}
