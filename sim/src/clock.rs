//! Frame timing.

/// Clamp a raw frame delta into `[min, max]`.
///
/// NaN is treated as the minimum; infinities clamp to the nearest bound.
#[inline]
pub fn clamp_delta_time(raw: f32, min: f32, max: f32) -> f32 {
    if raw.is_nan() {
        return min;
    }
    raw.clamp(min, max)
}

/// Turns absolute render timestamps into per-tick deltas.
///
/// The first sample has no predecessor and yields a zero raw delta, which the clamp
/// turns into the minimum tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    previous: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw seconds since the previous sample.
    pub fn sample(&mut self, now: f64) -> f32 {
        let raw = match self.previous {
            Some(prev) => (now - prev) as f32,
            None => 0.0,
        };
        self.previous = Some(now);
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_DELTA_TIME, MIN_DELTA_TIME};

    #[test]
    fn deltas_outside_range_snap_to_bounds() {
        assert_eq!(clamp_delta_time(0.001, MIN_DELTA_TIME, MAX_DELTA_TIME), MIN_DELTA_TIME);
        assert_eq!(clamp_delta_time(-3.0, MIN_DELTA_TIME, MAX_DELTA_TIME), MIN_DELTA_TIME);
        assert_eq!(clamp_delta_time(4.0, MIN_DELTA_TIME, MAX_DELTA_TIME), MAX_DELTA_TIME);
        assert_eq!(clamp_delta_time(f32::NAN, MIN_DELTA_TIME, MAX_DELTA_TIME), MIN_DELTA_TIME);
        assert_eq!(clamp_delta_time(f32::INFINITY, MIN_DELTA_TIME, MAX_DELTA_TIME), MAX_DELTA_TIME);
        assert_eq!(clamp_delta_time(f32::NEG_INFINITY, MIN_DELTA_TIME, MAX_DELTA_TIME), MIN_DELTA_TIME);
        assert_eq!(clamp_delta_time(0.5, MIN_DELTA_TIME, MAX_DELTA_TIME), 0.5);
    }

    #[test]
    fn clock_measures_time_between_samples() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.sample(10.0), 0.0);
        assert!((clock.sample(10.25) - 0.25).abs() < 1.0e-6);
        assert!((clock.sample(10.5) - 0.25).abs() < 1.0e-6);
    }
}
