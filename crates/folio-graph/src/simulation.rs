//! The force-directed simulation.

use std::f64::consts::TAU;

use log::{debug, trace};
use rand::Rng;

use crate::bounds::Bounds;
use crate::drag::Drag;
use crate::error::{GraphError, Result};
use crate::force::{default_forces, Force, TickEnv};
use crate::node::{Edge, Node, NodeId, WanderPhase};
use crate::Vec2;

/// Tuning for layout, cooling and interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub restitution: f64,

    pub alpha_decay: f64,
    /// Alpha never cools below this, so structural forces keep acting.
    pub alpha_target: f64,
    pub velocity_decay: f64,
    /// Alpha after a drag release, at least.
    pub reheat_alpha: f64,
    /// Fraction of the pointer's release velocity handed to the node.
    pub inertia: f64,

    pub link_distance: f64,
    pub link_size_scale: f64,
    pub charge: f64,
    pub center_strength: f64,
    pub collide_padding: f64,
    pub wander_amplitude: f64,
    pub pointer_radius: f64,
    pub pointer_strength: f64,

    /// Initial placement radius as a fraction of the shorter side.
    pub spread: f64,
    /// Random offset added to each initial position.
    pub jitter: f64,
}

impl SimulationParams {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            padding: 12.0,
            restitution: 0.6,
            // 1 − 0.001^(1/300): cools to 0.001 in about 300 ticks.
            alpha_decay: 0.0228,
            alpha_target: 0.02,
            velocity_decay: 0.4,
            reheat_alpha: 0.3,
            inertia: 0.8,
            link_distance: 40.0,
            link_size_scale: 1.5,
            charge: -160.0,
            center_strength: 0.05,
            collide_padding: 6.0,
            wander_amplitude: 0.03,
            pointer_radius: 120.0,
            pointer_strength: 0.004,
            spread: 0.3,
            jitter: 6.0,
        }
    }
}

pub struct Simulation {
    params: SimulationParams,
    bounds: Bounds,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    forces: Vec<Box<dyn Force>>,
    alpha: f64,
    pointer: Option<Vec2>,
    drag: Option<Drag>,
    ticks: u64,
}

impl Simulation {
    /// Empty simulation with the default force stack.
    pub fn new(params: SimulationParams) -> Self {
        let forces = default_forces(&params);
        Self::with_forces(params, forces)
    }

    pub fn with_forces(params: SimulationParams, forces: Vec<Box<dyn Force>>) -> Self {
        let mut bounds = Bounds::new(params.width, params.height, params.padding);
        bounds.restitution = params.restitution;
        Self {
            params,
            bounds,
            nodes: Vec::new(),
            edges: Vec::new(),
            forces,
            alpha: 1.0,
            pointer: None,
            drag: None,
            ticks: 0,
        }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.id == id).map(NodeId)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Place a node at a random spot around the center.
    pub fn add_node<R: Rng + ?Sized>(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        size: f64,
        rng: &mut R,
    ) -> Result<NodeId> {
        let id = id.into();
        if !(size.is_finite() && size > 0.0) {
            return Err(GraphError::InvalidSize { id, size });
        }
        if self.find(&id).is_some() {
            return Err(GraphError::DuplicateNode(id));
        }

        let c = self.bounds.center();
        let r = self.params.width.min(self.params.height) * self.params.spread * rng.gen::<f64>().sqrt();
        let theta = rng.gen_range(0.0..TAU);
        let j = self.params.jitter;
        let jitter = if j > 0.0 {
            Vec2::new(rng.gen_range(-j..j), rng.gen_range(-j..j))
        } else {
            Vec2::zeros()
        };
        let pos = self.bounds.clamp_point(c + Vec2::new(theta.cos(), theta.sin()) * r + jitter, size);

        let mut node = Node::new(id, label, pos, size);
        node.wander = WanderPhase {
            phase: Vec2::new(rng.gen_range(0.0..TAU), rng.gen_range(0.0..TAU)),
            freq: Vec2::new(rng.gen_range(0.05..0.15), rng.gen_range(0.05..0.15)),
        };
        self.nodes.push(node);
        Ok(NodeId(self.nodes.len() - 1))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<()> {
        for id in [source, target] {
            if id.0 >= self.nodes.len() {
                return Err(GraphError::UnknownIndex(id.0));
            }
        }
        if source == target {
            return Err(GraphError::SelfLoop(self.nodes[source.0].id.clone()));
        }
        self.edges.push(Edge::new(source, target));
        Ok(())
    }

    /// Raise alpha to at least `alpha`.
    pub fn reheat(&mut self, alpha: f64) {
        self.alpha = self.alpha.max(alpha.min(1.0));
    }

    /// Adopt a new canvas size and pull every node inside it.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.params.width = width;
        self.params.height = height;
        self.bounds.width = width;
        self.bounds.height = height;
        for node in &mut self.nodes {
            if let Some(fix) = node.fixed {
                node.fixed = Some(self.bounds.clamp_point(fix, node.size));
            }
            self.bounds.contain(node);
        }
        self.reheat(self.params.reheat_alpha);
        debug!("graph resized to {width}x{height}");
    }

    /// Advance one frame. `time_s` is wall-clock seconds and drives wander.
    pub fn tick(&mut self, time_s: f64) {
        self.alpha += (self.params.alpha_target - self.alpha) * self.params.alpha_decay;
        for node in &mut self.nodes {
            if !node.pos.x.is_finite() || !node.pos.y.is_finite() {
                self.bounds.contain(node);
            }
        }

        let env = TickEnv {
            alpha: self.alpha,
            time_s,
            pointer: self.pointer,
            dragging: self.drag.is_some(),
            center: self.bounds.center(),
        };
        for force in &mut self.forces {
            force.apply(&mut self.nodes, &self.edges, &env);
        }

        let keep = 1.0 - self.params.velocity_decay;
        for node in &mut self.nodes {
            match node.fixed {
                Some(fix) => {
                    node.pos = fix;
                    node.vel = Vec2::zeros();
                }
                None => {
                    node.vel *= keep;
                    node.pos += node.vel;
                }
            }
            self.bounds.contain(node);
        }
        self.ticks += 1;
        trace!("tick {} alpha {:.4}", self.ticks, self.alpha);
    }

    /// Topmost node whose disc contains `p`.
    pub fn hit_test(&self, p: Vec2) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, n)| (n.pos - p).norm() <= n.size)
            .map(|(i, _)| NodeId(i))
    }

    pub fn dragging(&self) -> Option<NodeId> {
        self.drag.as_ref().map(Drag::node)
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Grab the node under `p`, if any.
    pub fn pointer_down(&mut self, p: Vec2, now_ms: f64) -> Option<NodeId> {
        self.pointer = Some(p);
        let id = self.hit_test(p)?;
        let node = &mut self.nodes[id.0];
        let offset = node.pos - p;
        node.fix(node.pos);
        self.drag = Some(Drag::new(id, offset, now_ms, p));
        debug!("drag start on {}", node.id);
        Some(id)
    }

    pub fn pointer_move(&mut self, p: Vec2, now_ms: f64) {
        self.pointer = Some(p);
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.record(now_ms, p);
        let target = drag.target(p);
        let node = &mut self.nodes[drag.node().0];
        node.fix(self.bounds.clamp_point(target, node.size));
    }

    /// Release the dragged node with inertia and reheat.
    pub fn pointer_up(&mut self, now_ms: f64) -> Option<NodeId> {
        let drag = self.drag.take()?;
        let v = drag.release_velocity(now_ms, self.params.inertia);
        let node = &mut self.nodes[drag.node().0];
        node.release();
        node.vel = if v.x.is_finite() && v.y.is_finite() { v } else { Vec2::zeros() };
        debug!("drag end on {} with velocity ({:.2}, {:.2})", node.id, v.x, v.y);
        self.reheat(self.params.reheat_alpha);
        Some(drag.node())
    }

    /// Pointer left the canvas; an active drag is released.
    pub fn pointer_leave(&mut self, now_ms: f64) {
        self.pointer_up(now_ms);
        self.pointer = None;
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .field("forces", &self.forces.iter().map(|x| x.name()).collect::<Vec<_>>())
            .field("alpha", &self.alpha)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chain(n: usize, seed: u64) -> Simulation {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut sim = Simulation::new(SimulationParams::new(300.0, 200.0));
        for i in 0..n {
            sim.add_node(format!("n{i}"), format!("N{i}"), 6.0 + i as f64, &mut rng)
                .unwrap();
        }
        for i in 1..n {
            sim.add_edge(NodeId(i - 1), NodeId(i)).unwrap();
        }
        sim
    }

    #[test]
    fn test_seeded_placement_is_reproducible() {
        let a = chain(6, 11);
        let b = chain(6, 11);
        for (x, y) in a.nodes().iter().zip(b.nodes()) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.wander, y.wander);
        }
    }

    #[test]
    fn test_nodes_start_inside() {
        let sim = chain(10, 5);
        assert!(sim.nodes().iter().all(|n| sim.bounds().contains(n)));
    }

    #[test]
    fn test_add_node_rejects_bad_input() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut sim = Simulation::new(SimulationParams::default());
        sim.add_node("a", "A", 5.0, &mut rng).unwrap();
        assert!(matches!(
            sim.add_node("a", "A", 5.0, &mut rng),
            Err(GraphError::DuplicateNode(_))
        ));
        assert!(matches!(
            sim.add_node("b", "B", 0.0, &mut rng),
            Err(GraphError::InvalidSize { .. })
        ));
        assert!(matches!(
            sim.add_edge(NodeId(0), NodeId(0)),
            Err(GraphError::SelfLoop(_))
        ));
        assert!(matches!(
            sim.add_edge(NodeId(0), NodeId(7)),
            Err(GraphError::UnknownIndex(7))
        ));
    }

    #[test]
    fn test_alpha_cools_toward_target() {
        let mut sim = chain(4, 1);
        let mut last = sim.alpha();
        for i in 0..600 {
            sim.tick(i as f64 / 60.0);
            assert!(sim.alpha() < last);
            last = sim.alpha();
        }
        assert!(sim.alpha() > sim.params().alpha_target);
        assert!(sim.alpha() < 0.03);
    }

    #[test]
    fn test_bounds_hold_under_random_kicks() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut sim = chain(8, seed);
            for frame in 0..200 {
                if frame % 17 == 0 {
                    for node in &mut sim.nodes {
                        node.vel = Vec2::new(rng.gen_range(-400.0..400.0), rng.gen_range(-400.0..400.0));
                    }
                }
                sim.tick(frame as f64 / 60.0);
                for node in sim.nodes() {
                    assert!(sim.bounds().contains(node), "seed {seed} frame {frame}: {:?}", node.pos);
                }
            }
        }
    }

    #[test]
    fn test_drag_fixes_then_releases_with_inertia() {
        let mut sim = chain(3, 2);
        let start = sim.nodes()[1].pos;

        let id = sim.pointer_down(start, 0.0).unwrap();
        assert_eq!(sim.dragging(), Some(id));
        let origin = sim.nodes()[id.0].pos;
        sim.pointer_move(start + Vec2::new(5.0, 0.0), 16.0);
        sim.pointer_move(start + Vec2::new(10.0, 0.0), 32.0);
        sim.tick(0.5);
        assert_relative_eq!(sim.nodes()[id.0].pos.x, origin.x + 10.0, epsilon = 1e-9);
        assert_relative_eq!(sim.nodes()[id.0].pos.y, origin.y, epsilon = 1e-9);
        assert_eq!(sim.nodes()[id.0].vel, Vec2::zeros());

        for _ in 0..200 {
            sim.tick(1.0);
        }
        let cooled = sim.alpha();
        assert_eq!(sim.pointer_up(40.0), Some(id));
        assert!(sim.dragging().is_none());
        assert!(!sim.nodes()[id.0].is_fixed());
        // 10 px over 32 ms, scaled to a frame and by inertia.
        assert_relative_eq!(sim.nodes()[id.0].vel.x, 10.0 / 32.0 * crate::FRAME_MS * 0.8, epsilon = 1e-9);
        assert!(sim.alpha() >= 0.3 && cooled < 0.3);
    }

    #[test]
    fn test_drag_is_clamped_to_canvas() {
        let mut sim = chain(2, 3);
        let p = sim.nodes()[0].pos;
        let id = sim.pointer_down(p, 0.0).unwrap();
        sim.pointer_move(Vec2::new(-1000.0, 5000.0), 16.0);
        let node = &sim.nodes()[id.0];
        assert!(sim.bounds().contains(node));
    }

    #[test]
    fn test_pointer_down_on_empty_space() {
        let mut sim = chain(2, 4);
        assert_eq!(sim.pointer_down(Vec2::new(-50.0, -50.0), 0.0), None);
        assert!(sim.dragging().is_none());
        assert!(sim.pointer().is_some());
        sim.pointer_leave(10.0);
        assert!(sim.pointer().is_none());
    }

    #[test]
    fn test_resize_pulls_nodes_in() {
        let mut sim = chain(6, 9);
        for _ in 0..50 {
            sim.tick(0.0);
        }
        sim.resize(80.0, 60.0);
        assert!(sim.nodes().iter().all(|n| sim.bounds().contains(n)));
    }

    #[test]
    fn test_non_finite_node_recovers() {
        let mut sim = chain(3, 6);
        sim.nodes[0].pos = Vec2::new(f64::INFINITY, 1.0);
        sim.tick(0.0);
        assert!(sim.nodes().iter().all(|n| n.pos.x.is_finite() && n.pos.y.is_finite()));
        assert!(sim.nodes().iter().all(|n| sim.bounds().contains(n)));
    }
}
