/// Render tick metadata.
///
/// One `Frame` is produced per host animation callback; `dt_s` is the real
/// elapsed time since the previous tick, so it varies from frame to frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Seconds since the previous frame.
    pub dt_s: f64,
    /// Accumulated seconds at the start of this frame.
    pub time_s: f64,
}

impl Frame {
    pub fn first() -> Self {
        Self {
            index: 0,
            dt_s: 0.0,
            time_s: 0.0,
        }
    }

    /// The frame following `self` after `dt_s` seconds. Negative deltas clamp to zero.
    pub fn advance(self, dt_s: f64) -> Self {
        let dt_s = if dt_s.is_finite() { dt_s.max(0.0) } else { 0.0 };
        Self {
            index: self.index + 1,
            dt_s,
            time_s: self.time_s + dt_s,
        }
    }

    /// Build the next frame from host timestamps in milliseconds.
    pub fn from_timestamp_ms(self, previous_ms: f64, now_ms: f64) -> Self {
        self.advance((now_ms - previous_ms) / 1000.0)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::first()
    }
}
