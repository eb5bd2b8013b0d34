//! Drift-free animation time.

/// Start timestamp captured on the first frame after (re)entering view.
///
/// Phases are always `(now - start) mod cycle`; nothing is accumulated
/// frame-to-frame, so dropped frames never skew an animation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationClock {
    start: Option<f64>,
}

impl AnimationClock {
    pub const fn new() -> Self {
        Self { start: None }
    }

    pub fn start(&self) -> Option<f64> {
        self.start
    }

    /// Milliseconds since start; the first call fixes the start at `now`.
    pub fn elapsed(&mut self, now: f64) -> f64 {
        let start = *self.start.get_or_insert(now);
        (now - start).max(0.0)
    }

    /// Normalized position in [0, 1) within a cycle of `cycle_ms`.
    pub fn phase(&mut self, now: f64, cycle_ms: f64) -> f64 {
        cycle_phase(self.elapsed(now), cycle_ms)
    }

    /// Forget the start; the next frame begins at zero.
    pub fn reset(&mut self) {
        self.start = None;
    }

    /// Pretend the clock started at `start`.
    pub fn restart_at(&mut self, start: f64) {
        self.start = Some(start);
    }
}

/// `elapsed mod cycle`, normalized to [0, 1). Degenerate cycles give 0.
pub fn cycle_phase(elapsed_ms: f64, cycle_ms: f64) -> f64 {
    if cycle_ms.is_nan() || cycle_ms <= 0.0 || !elapsed_ms.is_finite() {
        return 0.0;
    }
    let p = elapsed_ms.rem_euclid(cycle_ms) / cycle_ms;
    if p >= 1.0 {
        0.0
    } else {
        p
    }
}
