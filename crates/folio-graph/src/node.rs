//! Node and edge records stored in the simulation arena.

use crate::Vec2;

/// Index of a node in its simulation's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Per-node oscillator driving the wander force, randomized once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WanderPhase {
    /// Phase offsets (radians) for x and y.
    pub phase: Vec2,
    /// Frequencies (Hz) for x and y.
    pub freq: Vec2,
}

impl Default for WanderPhase {
    fn default() -> Self {
        Self {
            phase: Vec2::zeros(),
            freq: Vec2::new(0.1, 0.1),
        }
    }
}

/// A labelled node.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub label: String,
    /// Position (SVG units).
    pub pos: Vec2,
    /// Velocity (SVG units per tick).
    pub vel: Vec2,
    /// Visual radius; also the hit-test radius.
    pub size: f64,
    pub base_opacity: f64,
    /// Pinned position while dragged.
    pub fixed: Option<Vec2>,
    pub wander: WanderPhase,
}

impl Node {
    /// Create a node at rest at `pos`.
    pub fn new(id: impl Into<String>, label: impl Into<String>, pos: Vec2, size: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            pos,
            vel: Vec2::zeros(),
            size,
            base_opacity: 1.0,
            fixed: None,
            wander: WanderPhase::default(),
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }

    /// Pin at `p` and stop.
    pub fn fix(&mut self, p: Vec2) {
        self.fixed = Some(p);
        self.pos = p;
        self.vel = Vec2::zeros();
    }

    pub fn release(&mut self) {
        self.fixed = None;
    }
}

/// Undirected edge between two arena indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }
}
