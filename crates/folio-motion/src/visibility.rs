//! Viewport visibility lifecycle.

/// Fraction of the container that must intersect the viewport.
pub const VISIBILITY_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

/// Result of feeding an intersection ratio to a [`VisibilityGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Entered,
    Exited,
    Unchanged,
}

/// Hidden/Visible state driven solely by intersection callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityGate {
    state: Visibility,
    threshold: f64,
}

impl VisibilityGate {
    pub fn new() -> Self {
        Self::with_threshold(VISIBILITY_THRESHOLD)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            state: Visibility::Hidden,
            threshold,
        }
    }

    pub fn state(&self) -> Visibility {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == Visibility::Visible
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Feed an intersection ratio in [0, 1].
    pub fn observe(&mut self, ratio: f64) -> Transition {
        let next = if ratio >= self.threshold {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        let transition = match (self.state, next) {
            (Visibility::Hidden, Visibility::Visible) => Transition::Entered,
            (Visibility::Visible, Visibility::Hidden) => Transition::Exited,
            _ => Transition::Unchanged,
        };
        self.state = next;
        transition
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_inclusive() {
        let mut gate = VisibilityGate::new();
        assert_eq!(gate.observe(0.19), Transition::Unchanged);
        assert!(!gate.is_visible());
        assert_eq!(gate.observe(0.2), Transition::Entered);
        assert!(gate.is_visible());
    }

    #[test]
    fn test_enter_exit_cycle() {
        let mut gate = VisibilityGate::new();
        assert_eq!(gate.observe(1.0), Transition::Entered);
        assert_eq!(gate.observe(0.6), Transition::Unchanged);
        assert_eq!(gate.observe(0.0), Transition::Exited);
        assert_eq!(gate.observe(0.05), Transition::Unchanged);
        assert_eq!(gate.observe(0.5), Transition::Entered);
    }
}
