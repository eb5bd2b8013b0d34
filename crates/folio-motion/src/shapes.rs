//! Three clickable decorative shapes that swap places on every click.
//!
//! Each shuffle is a derangement: no shape stays in its slot, so the change
//! is always visible.

use rand::Rng;

use crate::easing::{clamp01, ease_in_out_cubic, lerp};

pub const SHAPE_COUNT: usize = 3;

/// Random derangement of `order` (`order[slot]` is the shape in that slot).
///
/// With three items the only derangements are the two rotations, picked with
/// equal probability.
pub fn derange<R: Rng + ?Sized>(order: [usize; SHAPE_COUNT], rng: &mut R) -> [usize; SHAPE_COUNT] {
    let mut next = order;
    if rng.gen_bool(0.5) {
        next.rotate_left(1);
    } else {
        next.rotate_right(1);
    }
    next
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeShuffleParams {
    /// Slot centers in SVG units.
    pub slots: [(f64, f64); SHAPE_COUNT],
    pub duration_ms: f64,
    /// Lift applied mid-flight so shapes pass over each other.
    pub arc_height: f64,
}

impl Default for ShapeShuffleParams {
    fn default() -> Self {
        Self {
            slots: [(20.0, 30.0), (50.0, 30.0), (80.0, 30.0)],
            duration_ms: 700.0,
            arc_height: 10.0,
        }
    }
}

/// Slot assignment plus the in-flight move, if any.
#[derive(Debug, Clone)]
pub struct ShapeShuffle {
    params: ShapeShuffleParams,
    from: [usize; SHAPE_COUNT],
    to: [usize; SHAPE_COUNT],
    started_at: Option<f64>,
}

impl ShapeShuffle {
    pub fn new(params: ShapeShuffleParams) -> Self {
        Self {
            params,
            from: [0, 1, 2],
            to: [0, 1, 2],
            started_at: None,
        }
    }

    /// Current (or destination) slot order.
    pub fn order(&self) -> [usize; SHAPE_COUNT] {
        self.to
    }

    /// Start a shuffle at `now`. A click mid-flight deranges the destination.
    pub fn trigger<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> [usize; SHAPE_COUNT] {
        self.from = self.to;
        self.to = derange(self.to, rng);
        self.started_at = Some(now);
        self.to
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.started_at
            .is_some_and(|s| now - s < self.params.duration_ms)
    }

    /// Center of each shape (indexed by shape, not slot).
    pub fn positions(&self, now: f64) -> [(f64, f64); SHAPE_COUNT] {
        let progress = match self.started_at {
            Some(s) if self.params.duration_ms > 0.0 => clamp01((now - s) / self.params.duration_ms),
            _ => 1.0,
        };
        self.positions_at(progress)
    }

    /// Destination positions, for reduced motion.
    pub fn settled_positions(&self) -> [(f64, f64); SHAPE_COUNT] {
        self.positions_at(1.0)
    }

    fn positions_at(&self, progress: f64) -> [(f64, f64); SHAPE_COUNT] {
        let e = ease_in_out_cubic(progress);
        let lift = self.params.arc_height * (std::f64::consts::PI * e).sin();
        let slot_of = |order: &[usize; SHAPE_COUNT], shape: usize| {
            order.iter().position(|&s| s == shape).unwrap_or(shape)
        };

        std::array::from_fn(|shape| {
            let a = self.params.slots[slot_of(&self.from, shape)];
            let b = self.params.slots[slot_of(&self.to, shape)];
            let moving = if a == b { 0.0 } else { lift };
            (lerp(a.0, b.0, e), lerp(a.1, b.1, e) - moving)
        })
    }
}

impl Default for ShapeShuffle {
    fn default() -> Self {
        Self::new(ShapeShuffleParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_derangement_moves_every_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut order = [0, 1, 2];
        for _ in 0..50 {
            let next = derange(order, &mut rng);
            for slot in 0..SHAPE_COUNT {
                assert_ne!(next[slot], order[slot]);
            }
            let mut sorted = next;
            sorted.sort_unstable();
            assert_eq!(sorted, [0, 1, 2]);
            order = next;
        }
    }

    #[test]
    fn test_both_rotations_occur() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            seen.insert(derange([0, 1, 2], &mut rng));
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_shuffle_animates_then_settles() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut shuffle = ShapeShuffle::default();
        let start = shuffle.positions(0.0);
        assert_eq!(start, shuffle.settled_positions());

        let order = shuffle.trigger(1000.0, &mut rng);
        assert!(shuffle.is_animating(1200.0));
        assert!(!shuffle.is_animating(1700.0));

        let end = shuffle.positions(1700.0);
        for shape in 0..SHAPE_COUNT {
            let slot = order.iter().position(|&s| s == shape).unwrap();
            assert_relative_eq!(end[shape].0, shuffle.params.slots[slot].0, epsilon = 1e-9);
            assert_relative_eq!(end[shape].1, shuffle.params.slots[slot].1, epsilon = 1e-9);
        }
        // Mid-flight shapes are lifted off the baseline.
        let mid = shuffle.positions(1350.0);
        assert!(mid[0].1 < 30.0);
    }
}
