//! Shared lifecycle for every animated visual.

use log::trace;

use crate::clock::AnimationClock;
use crate::visibility::{Transition, VisibilityGate};

/// A visual whose appearance is a closed-form function of time.
pub trait Visual {
    /// Per-frame geometry handed to the presentation layer.
    type Pose: Clone;

    /// Pose `elapsed_ms` after the visual last became visible.
    fn pose_at(&self, elapsed_ms: f64) -> Self::Pose;

    /// The steady state shown instead of animating under reduced motion.
    fn rest_pose(&self) -> Self::Pose;
}

/// What a controller wants drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame<P> {
    /// Mid-animation pose.
    Animate(P),
    /// Terminal pose; the frame loop may stop afterwards.
    Rest(P),
    /// Nothing to draw.
    Idle,
}

impl<P> Frame<P> {
    pub fn into_pose(self) -> Option<P> {
        match self {
            Frame::Animate(p) | Frame::Rest(p) => Some(p),
            Frame::Idle => None,
        }
    }
}

/// Wraps a [`Visual`] with its clock, visibility and motion preference.
///
/// State machine: Hidden → Visible(animating) → Hidden, transitioned only by
/// [`Controller::observe`]. Entering view restarts the clock; there is no
/// paused state that remembers progress.
#[derive(Debug, Clone)]
pub struct Controller<V: Visual> {
    visual: V,
    clock: AnimationClock,
    gate: VisibilityGate,
    reduced_motion: bool,
    rest_delivered: bool,
}

impl<V: Visual> Controller<V> {
    pub fn new(visual: V) -> Self {
        Self {
            visual,
            clock: AnimationClock::new(),
            gate: VisibilityGate::new(),
            reduced_motion: false,
            rest_delivered: false,
        }
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.set_reduced_motion(reduced);
        self
    }

    fn set_reduced_motion(&mut self, reduced: bool) {
        if reduced != self.reduced_motion {
            self.reduced_motion = reduced;
            self.rest_delivered = false;
            self.clock.reset();
        }
    }

    /// Feed an intersection ratio.
    pub fn observe(&mut self, ratio: f64) -> Transition {
        let transition = self.gate.observe(ratio);
        if transition != Transition::Unchanged {
            trace!("visibility {transition:?} at ratio {ratio:.2}");
        }
        match transition {
            Transition::Entered => {
                self.clock.reset();
                self.rest_delivered = false;
            }
            Transition::Exited => self.clock.reset(),
            Transition::Unchanged => {}
        }
        transition
    }

    /// Whether the binding should keep a frame loop scheduled.
    pub fn is_running(&self) -> bool {
        if self.reduced_motion {
            !self.rest_delivered
        } else {
            self.gate.is_visible()
        }
    }

    /// Compute this frame. `now` is a monotonic timestamp in milliseconds.
    pub fn frame(&mut self, now: f64) -> Frame<V::Pose> {
        if self.reduced_motion {
            if self.rest_delivered {
                return Frame::Idle;
            }
            self.rest_delivered = true;
            return Frame::Rest(self.visual.rest_pose());
        }
        if !self.gate.is_visible() {
            return Frame::Idle;
        }
        let elapsed = self.clock.elapsed(now);
        Frame::Animate(self.visual.pose_at(elapsed))
    }
}
