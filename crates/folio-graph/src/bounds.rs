//! Padded canvas bounds with damped reflection.

use crate::node::Node;
use crate::Vec2;

/// Fraction of velocity kept (and reversed) when a node hits an edge.
pub const DEFAULT_RESTITUTION: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub restitution: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
            restitution: DEFAULT_RESTITUTION,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Allowed `[lo, hi]` for a node of `radius` along an axis of `extent`.
    /// Collapses to the midpoint when the canvas is too small.
    pub fn axis_range(&self, extent: f64, radius: f64) -> (f64, f64) {
        let lo = self.padding + radius;
        let hi = extent - self.padding - radius;
        if hi < lo {
            let mid = extent / 2.0;
            (mid, mid)
        } else {
            (lo, hi)
        }
    }

    /// Clamp a point so a node of `radius` centered there is inside.
    pub fn clamp_point(&self, p: Vec2, radius: f64) -> Vec2 {
        let (x0, x1) = self.axis_range(self.width, radius);
        let (y0, y1) = self.axis_range(self.height, radius);
        let x = if p.x.is_finite() { p.x.clamp(x0, x1) } else { self.width / 2.0 };
        let y = if p.y.is_finite() { p.y.clamp(y0, y1) } else { self.height / 2.0 };
        Vec2::new(x, y)
    }

    pub fn contains(&self, node: &Node) -> bool {
        let (x0, x1) = self.axis_range(self.width, node.size);
        let (y0, y1) = self.axis_range(self.height, node.size);
        (x0..=x1).contains(&node.pos.x) && (y0..=y1).contains(&node.pos.y)
    }

    /// Pull a node back inside, reflecting and damping velocity on contact.
    /// Returns whether it touched an edge.
    pub fn contain(&self, node: &mut Node) -> bool {
        if !node.pos.x.is_finite() || !node.pos.y.is_finite() {
            node.pos = self.center();
            node.vel = Vec2::zeros();
            return true;
        }
        if !node.vel.x.is_finite() || !node.vel.y.is_finite() {
            node.vel = Vec2::zeros();
        }

        let (x0, x1) = self.axis_range(self.width, node.size);
        let (y0, y1) = self.axis_range(self.height, node.size);
        let hit_x = reflect(&mut node.pos.x, &mut node.vel.x, x0, x1, self.restitution);
        let hit_y = reflect(&mut node.pos.y, &mut node.vel.y, y0, y1, self.restitution);
        hit_x || hit_y
    }
}

fn reflect(pos: &mut f64, vel: &mut f64, lo: f64, hi: f64, restitution: f64) -> bool {
    if *pos < lo {
        *pos = lo;
        *vel = vel.abs() * restitution;
        true
    } else if *pos > hi {
        *pos = hi;
        *vel = -vel.abs() * restitution;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn node_at(x: f64, y: f64, vx: f64, vy: f64) -> Node {
        let mut n = Node::new("n", "n", Vec2::new(x, y), 10.0);
        n.vel = Vec2::new(vx, vy);
        n
    }

    #[test]
    fn test_inside_untouched() {
        let b = Bounds::new(200.0, 100.0, 5.0);
        let mut n = node_at(50.0, 50.0, 1.0, -1.0);
        assert!(!b.contain(&mut n));
        assert_eq!(n.vel, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_reflects_with_restitution() {
        let b = Bounds::new(200.0, 100.0, 5.0);
        let mut n = node_at(250.0, 2.0, 4.0, -5.0);
        assert!(b.contain(&mut n));
        assert_relative_eq!(n.pos.x, 185.0);
        assert_relative_eq!(n.pos.y, 15.0);
        assert_relative_eq!(n.vel.x, -2.4);
        assert_relative_eq!(n.vel.y, 3.0);
    }

    #[test]
    fn test_non_finite_resets_to_center() {
        let b = Bounds::new(200.0, 100.0, 5.0);
        let mut n = node_at(f64::NAN, 3.0, 1.0, 1.0);
        b.contain(&mut n);
        assert_eq!(n.pos, b.center());
        assert_eq!(n.vel, Vec2::zeros());
    }

    #[test]
    fn test_tiny_canvas_collapses_to_midpoint() {
        let b = Bounds::new(10.0, 10.0, 5.0);
        let mut n = node_at(0.0, 9.0, 0.0, 0.0);
        b.contain(&mut n);
        assert_eq!(n.pos, Vec2::new(5.0, 5.0));
        assert!(b.contains(&n));
    }
}
