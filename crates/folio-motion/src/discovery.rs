//! Discovery-cycle dot: a marker that inflates, orbits once, springs into
//! place, deflates and rests.
//!
//! Phase boundaries are cumulative millisecond offsets, so the order and
//! exact durations below define the cycle.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::controller::Visual;
use crate::easing::{damped_spring, ease_in_out_cosine, smootherstep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryPhase {
    Grow,
    Travel,
    Settle,
    Deflate,
    Pause,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryParams {
    pub grow_ms: f64,
    pub travel_ms: f64,
    pub settle_ms: f64,
    pub deflate_ms: f64,
    pub pause_ms: f64,
    /// Orbit center in SVG units.
    pub center: (f64, f64),
    pub orbit_radius: f64,
    /// Fully inflated dot radius.
    pub dot_radius: f64,
    /// Angle of the start/finish point (radians, SVG orientation).
    pub start_angle: f64,
    /// Peak angular overshoot of the settle spring, in degrees.
    pub spring_offset_deg: f64,
    /// Stage markers spaced evenly around the orbit.
    pub stages: usize,
    /// Angular distance over which a stage marker glows.
    pub glow_width: f64,
}

impl Default for DiscoveryParams {
    fn default() -> Self {
        Self {
            grow_ms: 600.0,
            travel_ms: 1800.0,
            settle_ms: 900.0,
            deflate_ms: 500.0,
            pause_ms: 1200.0,
            center: (60.0, 60.0),
            orbit_radius: 40.0,
            dot_radius: 5.0,
            start_angle: -FRAC_PI_2,
            spring_offset_deg: 3.0,
            stages: 4,
            glow_width: PI / 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryPose {
    pub phase: DiscoveryPhase,
    /// Orbit angle of the dot (radians, unwrapped).
    pub angle: f64,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub opacity: f64,
    /// Glow in [0, 1] for each stage marker.
    pub stage_glow: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct DiscoveryDot {
    params: DiscoveryParams,
}

impl DiscoveryDot {
    pub fn new(params: DiscoveryParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DiscoveryParams {
        &self.params
    }

    pub fn cycle_ms(&self) -> f64 {
        let p = &self.params;
        p.grow_ms + p.travel_ms + p.settle_ms + p.deflate_ms + p.pause_ms
    }

    /// Phase and local progress in [0, 1] for a time within one cycle.
    pub fn phase_at(&self, t_ms: f64) -> (DiscoveryPhase, f64) {
        let p = &self.params;
        let phases = [
            (DiscoveryPhase::Grow, p.grow_ms),
            (DiscoveryPhase::Travel, p.travel_ms),
            (DiscoveryPhase::Settle, p.settle_ms),
            (DiscoveryPhase::Deflate, p.deflate_ms),
            (DiscoveryPhase::Pause, p.pause_ms),
        ];

        let mut offset = 0.0;
        for (phase, duration) in phases {
            let end = offset + duration;
            if t_ms < end {
                let local = if duration > 0.0 {
                    (t_ms - offset) / duration
                } else {
                    1.0
                };
                return (phase, local.clamp(0.0, 1.0));
            }
            offset = end;
        }
        (DiscoveryPhase::Pause, 1.0)
    }

    /// Stage marker angles, starting at the start angle.
    pub fn stage_angles(&self) -> Vec<f64> {
        let p = &self.params;
        let n = p.stages.max(1);
        (0..p.stages)
            .map(|k| p.start_angle + TAU * k as f64 / n as f64)
            .collect()
    }

    fn pose_for(&self, phase: DiscoveryPhase, angle: f64, size: f64) -> DiscoveryPose {
        let p = &self.params;
        let (cx, cy) = p.center;
        let stage_glow = self
            .stage_angles()
            .into_iter()
            .map(|a| {
                let d = angular_distance(angle, a);
                (1.0 - d / p.glow_width).max(0.0) * size
            })
            .collect();

        DiscoveryPose {
            phase,
            angle,
            x: cx + p.orbit_radius * angle.cos(),
            y: cy + p.orbit_radius * angle.sin(),
            radius: p.dot_radius * size,
            opacity: size,
            stage_glow,
        }
    }
}

impl Visual for DiscoveryDot {
    type Pose = DiscoveryPose;

    fn pose_at(&self, elapsed_ms: f64) -> DiscoveryPose {
        let p = &self.params;
        let cycle = self.cycle_ms();
        let t = if cycle > 0.0 {
            elapsed_ms.rem_euclid(cycle)
        } else {
            0.0
        };
        let (phase, x) = self.phase_at(t);
        let start = p.start_angle;

        let (angle, size) = match phase {
            DiscoveryPhase::Grow => (start, ease_in_out_cosine(x)),
            DiscoveryPhase::Travel => (start + TAU * smootherstep(x), 1.0),
            DiscoveryPhase::Settle => {
                let overshoot = p.spring_offset_deg.to_radians() * damped_spring(x);
                (start + TAU + overshoot, 1.0)
            }
            DiscoveryPhase::Deflate => (start + TAU, 1.0 - ease_in_out_cosine(x)),
            DiscoveryPhase::Pause => (start + TAU, 0.0),
        };
        self.pose_for(phase, angle, size)
    }

    fn rest_pose(&self) -> DiscoveryPose {
        self.pose_for(DiscoveryPhase::Pause, self.params.start_angle, 1.0)
    }
}

/// Shortest angular distance between two angles, in [0, π].
fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}
