//! Pointer drag state and release-velocity estimation.

use std::collections::VecDeque;

use crate::node::NodeId;
use crate::{Vec2, FRAME_MS};

/// Only pointer samples this recent feed the release velocity.
pub const SAMPLE_WINDOW_MS: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct Drag {
    node: NodeId,
    /// Node center minus the pointer at grab time.
    grab_offset: Vec2,
    samples: VecDeque<(f64, Vec2)>,
}

impl Drag {
    pub fn new(node: NodeId, grab_offset: Vec2, now_ms: f64, pointer: Vec2) -> Self {
        let mut samples = VecDeque::new();
        samples.push_back((now_ms, pointer));
        Self {
            node,
            grab_offset,
            samples,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Where the dragged node's center should sit for `pointer`.
    pub fn target(&self, pointer: Vec2) -> Vec2 {
        pointer + self.grab_offset
    }

    pub fn record(&mut self, now_ms: f64, pointer: Vec2) {
        self.samples.push_back((now_ms, pointer));
        while let Some(&(t, _)) = self.samples.front() {
            if now_ms - t > SAMPLE_WINDOW_MS && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Recent pointer velocity in px/ms. Zero if the pointer rested for
    /// longer than the sample window before `now_ms`.
    pub fn pointer_velocity(&self, now_ms: f64) -> Vec2 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.front(), self.samples.back()) else {
            return Vec2::zeros();
        };
        let dt = t1 - t0;
        if dt <= 0.0 || now_ms - t1 > SAMPLE_WINDOW_MS {
            return Vec2::zeros();
        }
        (p1 - p0) / dt
    }

    /// Node velocity (px/tick) on release, scaled by `inertia`.
    pub fn release_velocity(&self, now_ms: f64, inertia: f64) -> Vec2 {
        self.pointer_velocity(now_ms) * FRAME_MS * inertia
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_velocity_from_recent_samples() {
        let mut d = Drag::new(NodeId(0), Vec2::zeros(), 0.0, Vec2::new(0.0, 0.0));
        d.record(16.0, Vec2::new(8.0, 0.0));
        d.record(32.0, Vec2::new(16.0, 4.0));
        let v = d.pointer_velocity(32.0);
        assert_relative_eq!(v.x, 0.5);
        assert_relative_eq!(v.y, 0.125);
        assert_relative_eq!(d.release_velocity(32.0, 1.0).x, 0.5 * FRAME_MS);
    }

    #[test]
    fn test_old_samples_are_dropped() {
        let mut d = Drag::new(NodeId(0), Vec2::zeros(), 0.0, Vec2::new(-500.0, 0.0));
        for i in 1..=20 {
            let t = 200.0 + i as f64 * 10.0;
            d.record(t, Vec2::new(i as f64, 0.0));
        }
        assert_relative_eq!(d.pointer_velocity(400.0).x, 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_still_pointer_releases_with_no_velocity() {
        let mut d = Drag::new(NodeId(0), Vec2::zeros(), 0.0, Vec2::zeros());
        d.record(16.0, Vec2::new(10.0, 0.0));
        assert_eq!(d.release_velocity(500.0, 0.8), Vec2::zeros());
    }

    #[test]
    fn test_grab_offset_is_preserved() {
        let d = Drag::new(NodeId(2), Vec2::new(3.0, -2.0), 0.0, Vec2::zeros());
        assert_eq!(d.target(Vec2::new(10.0, 10.0)), Vec2::new(13.0, 8.0));
        assert_eq!(d.node(), NodeId(2));
    }
}
