//! Exponential growth circles: three nested rings whose radii track a
//! headcount stepping 4 → 5 → 6 → 7 and back to 4.

use crate::controller::Visual;
use crate::easing::{clamp01, ease_in_out_cubic};

pub const MIN_STATE: u8 = 4;
pub const MAX_STATE: u8 = 7;

/// Inner, middle and outer radius for each headcount.
const RADII: [[f64; 3]; 4] = [
    [14.0, 24.0, 34.0],
    [18.0, 31.0, 44.0],
    [22.0, 38.0, 54.0],
    [26.0, 45.0, 64.0],
];

/// Ring radii for a headcount; values outside 4..=7 clamp to the range.
pub fn state_radii(state: u8) -> [f64; 3] {
    let s = state.clamp(MIN_STATE, MAX_STATE);
    RADII[(s - MIN_STATE) as usize]
}

/// Cubic-eased radius between two endpoints.
///
/// Progress is clamped to [0, 1] first and the result is clamped to the
/// endpoint range, so the ring never rubber-bands past either size.
pub fn interpolate_radius(from: f64, to: f64, progress: f64) -> f64 {
    let e = ease_in_out_cubic(clamp01(progress));
    let r = from + (to - from) * e;
    r.clamp(from.min(to), from.max(to))
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthParams {
    /// Time each state is held before transitioning.
    pub hold_ms: f64,
    /// Length of one transition.
    pub transition_ms: f64,
    /// Progress at which the label switches to the new value.
    pub label_switch: f64,
    /// States visited in order; the last wraps back to the first.
    pub sequence: Vec<u8>,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            hold_ms: 1000.0,
            transition_ms: 1500.0,
            label_switch: 0.3,
            sequence: vec![4, 5, 6, 7],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthPose {
    pub radii: [f64; 3],
    /// Headcount currently displayed.
    pub label: u8,
    pub label_opacity: f64,
    pub from: u8,
    pub to: u8,
    /// Transition progress in [0, 1]; 0 while holding.
    pub progress: f64,
}

impl GrowthPose {
    fn steady(state: u8) -> Self {
        Self {
            radii: state_radii(state),
            label: state,
            label_opacity: 1.0,
            from: state,
            to: state,
            progress: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GrowthCircles {
    params: GrowthParams,
}

impl GrowthCircles {
    pub fn new(params: GrowthParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GrowthParams {
        &self.params
    }

    pub fn cycle_ms(&self) -> f64 {
        (self.params.hold_ms + self.params.transition_ms) * self.params.sequence.len() as f64
    }

    /// Pose `elapsed_ms` into a transition from `from` to `to`.
    pub fn transition_pose(&self, from: u8, to: u8, elapsed_ms: f64) -> GrowthPose {
        let p = &self.params;
        let progress = if p.transition_ms > 0.0 {
            clamp01(elapsed_ms / p.transition_ms)
        } else {
            1.0
        };

        let a = state_radii(from);
        let b = state_radii(to);
        let radii = [
            interpolate_radius(a[0], b[0], progress),
            interpolate_radius(a[1], b[1], progress),
            interpolate_radius(a[2], b[2], progress),
        ];

        // Old label fades out, then the new one fades in from zero.
        let switch = p.label_switch.clamp(0.0, 1.0);
        let (label, label_opacity) = if progress < switch {
            (from, 1.0 - progress / switch)
        } else if switch < 1.0 {
            (to, clamp01((progress - switch) / (1.0 - switch)))
        } else {
            (to, 1.0)
        };

        GrowthPose {
            radii,
            label,
            label_opacity,
            from,
            to,
            progress,
        }
    }
}

impl Visual for GrowthCircles {
    type Pose = GrowthPose;

    fn pose_at(&self, elapsed_ms: f64) -> GrowthPose {
        let p = &self.params;
        let Some(&first) = p.sequence.first() else {
            return self.rest_pose();
        };
        let step = p.hold_ms + p.transition_ms;
        if step <= 0.0 {
            return GrowthPose::steady(first);
        }

        let n = p.sequence.len();
        let t = elapsed_ms.rem_euclid(self.cycle_ms());
        let idx = ((t / step) as usize).min(n - 1);
        let local = t - idx as f64 * step;
        let from = p.sequence[idx];
        let to = p.sequence[(idx + 1) % n];

        if local < p.hold_ms {
            GrowthPose::steady(from)
        } else {
            self.transition_pose(from, to, local - p.hold_ms)
        }
    }

    /// Largest state, fully labelled.
    fn rest_pose(&self) -> GrowthPose {
        GrowthPose::steady(MAX_STATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_state_table_clamps() {
        assert_eq!(state_radii(2), state_radii(4));
        assert_eq!(state_radii(9), state_radii(7));
        assert!(state_radii(5)[2] > state_radii(4)[2]);
    }

    #[test]
    fn test_interpolation_never_overshoots() {
        let pairs = [(14.0, 18.0), (64.0, 34.0), (22.0, 22.0)];
        for (from, to) in pairs {
            for i in -20..=140 {
                let progress = i as f64 / 100.0;
                let r = interpolate_radius(from, to, progress);
                assert!(r >= f64::min(from, to) && r <= f64::max(from, to));
            }
        }
        assert_eq!(interpolate_radius(10.0, 20.0, 5.0), 20.0);
        assert_eq!(interpolate_radius(10.0, 20.0, -1.0), 10.0);
    }

    #[test]
    fn test_label_switches_at_thirty_percent() {
        let g = GrowthCircles::default();
        let before = g.transition_pose(4, 5, 449.0);
        assert_eq!(before.label, 4);
        assert!(before.label_opacity > 0.0);

        let at = g.transition_pose(4, 5, 450.0);
        assert_eq!(at.label, 5);
        assert_eq!(at.label_opacity, 0.0);

        let after = g.transition_pose(4, 5, 600.0);
        assert_eq!(after.label, 5);
        assert!(after.label_opacity > 0.0);
        assert_relative_eq!(g.transition_pose(4, 5, 1500.0).label_opacity, 1.0);
    }

    #[test]
    fn test_sequence_timing() {
        let g = GrowthCircles::default();
        assert_relative_eq!(g.cycle_ms(), 10_000.0);
        assert_eq!(g.pose_at(500.0), GrowthPose::steady(4));
        let mid = g.pose_at(1750.0);
        assert_eq!((mid.from, mid.to), (4, 5));
        assert_relative_eq!(mid.progress, 0.5);
        assert_eq!(g.pose_at(2600.0), GrowthPose::steady(5));
        // 7 shrinks back to 4.
        let wrap = g.pose_at(8500.0);
        assert_eq!((wrap.from, wrap.to), (7, 4));
        assert_eq!(g.pose_at(10_500.0), GrowthPose::steady(4));
    }

    #[test]
    fn test_transition_ends_on_target() {
        let g = GrowthCircles::default();
        let end = g.transition_pose(6, 7, 1500.0);
        assert_eq!(end.radii, state_radii(7));
        let over = g.transition_pose(6, 7, 4000.0);
        assert_eq!(over.radii, state_radii(7));
    }

    #[test]
    fn test_rest_is_largest() {
        let pose = GrowthCircles::default().rest_pose();
        assert_eq!(pose.label, 7);
        assert_eq!(pose.radii, state_radii(7));
        assert_eq!(pose.label_opacity, 1.0);
    }
}
