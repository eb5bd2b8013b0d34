//! Forces applied to the node arena each tick.
//!
//! Forces only touch velocities; the simulation integrates positions after
//! every force has run.

use std::f64::consts::TAU;

use crate::node::{Edge, Node};
use crate::simulation::SimulationParams;
use crate::Vec2;

/// Per-tick inputs shared by all forces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickEnv {
    pub alpha: f64,
    /// Wall-clock seconds since the simulation was mounted.
    pub time_s: f64,
    pub pointer: Option<Vec2>,
    pub dragging: bool,
    pub center: Vec2,
}

/// A velocity contribution over the whole arena.
pub trait Force {
    fn name(&self) -> &'static str;

    fn apply(&mut self, nodes: &mut [Node], edges: &[Edge], env: &TickEnv);
}

/// Small deterministic offset for coincident nodes.
fn jiggle(i: usize, j: usize) -> Vec2 {
    let k = (j as f64 - i as f64).max(1.0);
    Vec2::new(1e-3 * k, -1e-3 * k)
}

/// Spring along each edge toward a size-dependent rest length.
#[derive(Debug, Clone)]
pub struct Link {
    pub base_distance: f64,
    /// Extra rest length per unit of combined node size.
    pub size_scale: f64,
    pub iterations: usize,
}

impl Link {
    pub fn new(base_distance: f64, size_scale: f64) -> Self {
        Self {
            base_distance,
            size_scale,
            iterations: 1,
        }
    }

    pub fn rest_length(&self, a: &Node, b: &Node) -> f64 {
        self.base_distance + (a.size + b.size) * self.size_scale
    }
}

impl Force for Link {
    fn name(&self) -> &'static str {
        "link"
    }

    fn apply(&mut self, nodes: &mut [Node], edges: &[Edge], env: &TickEnv) {
        let mut degree = vec![0usize; nodes.len()];
        for e in edges {
            degree[e.source.0] += 1;
            degree[e.target.0] += 1;
        }

        for _ in 0..self.iterations {
            for e in edges {
                let (s, t) = (e.source.0, e.target.0);
                if s == t {
                    continue;
                }
                let (ds, dt) = (degree[s] as f64, degree[t] as f64);
                let strength = 1.0 / ds.min(dt);
                // Low-degree endpoints move more.
                let bias = ds / (ds + dt);

                let mut d = (nodes[t].pos + nodes[t].vel) - (nodes[s].pos + nodes[s].vel);
                if d.norm_squared() == 0.0 {
                    d = jiggle(s, t);
                }
                let l = d.norm();
                let rest = self.rest_length(&nodes[s], &nodes[t]);
                let k = (l - rest) / l * env.alpha * strength;
                let delta = d * k;

                nodes[t].vel -= delta * bias;
                nodes[s].vel += delta * (1.0 - bias);
            }
        }
    }
}

/// Pairwise repulsion (negative strength) or attraction.
#[derive(Debug, Clone)]
pub struct ManyBody {
    pub strength: f64,
    pub distance_min: f64,
    pub distance_max: f64,
}

impl ManyBody {
    pub fn new(strength: f64) -> Self {
        Self {
            strength,
            distance_min: 1.0,
            distance_max: f64::INFINITY,
        }
    }
}

impl Force for ManyBody {
    fn name(&self) -> &'static str {
        "many-body"
    }

    fn apply(&mut self, nodes: &mut [Node], _edges: &[Edge], env: &TickEnv) {
        let n = nodes.len();
        let min2 = self.distance_min * self.distance_min;
        let max2 = self.distance_max * self.distance_max;

        for i in 0..n {
            for j in i + 1..n {
                let mut d = nodes[j].pos - nodes[i].pos;
                if d.norm_squared() == 0.0 {
                    d = jiggle(i, j);
                }
                let l2 = d.norm_squared().max(min2);
                if l2 >= max2 {
                    continue;
                }
                let w = self.strength * env.alpha / l2;
                nodes[i].vel += d * w;
                nodes[j].vel -= d * w;
            }
        }
    }
}

/// Weak pull toward the canvas center.
#[derive(Debug, Clone)]
pub struct Center {
    pub strength: f64,
}

impl Force for Center {
    fn name(&self) -> &'static str {
        "center"
    }

    fn apply(&mut self, nodes: &mut [Node], _edges: &[Edge], env: &TickEnv) {
        for node in nodes.iter_mut() {
            node.vel += (env.center - node.pos) * self.strength * env.alpha;
        }
    }
}

/// Keeps node discs (plus padding) from overlapping.
#[derive(Debug, Clone)]
pub struct Collide {
    pub padding: f64,
    pub strength: f64,
}

impl Force for Collide {
    fn name(&self) -> &'static str {
        "collide"
    }

    fn apply(&mut self, nodes: &mut [Node], _edges: &[Edge], _env: &TickEnv) {
        let n = nodes.len();
        for i in 0..n {
            for j in i + 1..n {
                let ri = nodes[i].size + self.padding;
                let rj = nodes[j].size + self.padding;
                let r = ri + rj;

                let mut d = (nodes[i].pos + nodes[i].vel) - (nodes[j].pos + nodes[j].vel);
                if d.norm_squared() == 0.0 {
                    d = jiggle(i, j);
                }
                let l2 = d.norm_squared();
                if l2 >= r * r {
                    continue;
                }
                let l = l2.sqrt();
                let push = d * ((r - l) / l * self.strength);
                // Smaller nodes give way to larger ones.
                let share = (rj * rj) / (ri * ri + rj * rj);
                nodes[i].vel += push * share;
                nodes[j].vel -= push * (1.0 - share);
            }
        }
    }
}

/// Slow per-node drift so the layout never fully freezes.
#[derive(Debug, Clone)]
pub struct Wander {
    /// Peak velocity added per tick.
    pub amplitude: f64,
}

impl Force for Wander {
    fn name(&self) -> &'static str {
        "wander"
    }

    fn apply(&mut self, nodes: &mut [Node], _edges: &[Edge], env: &TickEnv) {
        for node in nodes.iter_mut().filter(|n| !n.is_fixed()) {
            let w = &node.wander;
            let ax = TAU * w.freq.x * env.time_s + w.phase.x;
            let ay = TAU * w.freq.y * env.time_s + w.phase.y;
            node.vel += Vec2::new(ax.sin(), ay.cos()) * self.amplitude;
        }
    }
}

/// Gentle attraction toward a hovering pointer.
#[derive(Debug, Clone)]
pub struct PointerAttraction {
    pub radius: f64,
    pub strength: f64,
}

impl Force for PointerAttraction {
    fn name(&self) -> &'static str {
        "pointer"
    }

    fn apply(&mut self, nodes: &mut [Node], _edges: &[Edge], env: &TickEnv) {
        let Some(pointer) = env.pointer else {
            return;
        };
        if env.dragging {
            return;
        }
        for node in nodes.iter_mut().filter(|n| !n.is_fixed()) {
            let d = pointer - node.pos;
            let dist = d.norm();
            if dist > 1e-6 && dist < self.radius {
                node.vel += d * (self.strength * (1.0 - dist / self.radius));
            }
        }
    }
}

/// Link, many-body, center, collide, wander, pointer.
pub fn default_forces(params: &SimulationParams) -> Vec<Box<dyn Force>> {
    vec![
        Box::new(Link::new(params.link_distance, params.link_size_scale)),
        Box::new(ManyBody::new(params.charge)),
        Box::new(Center {
            strength: params.center_strength,
        }),
        Box::new(Collide {
            padding: params.collide_padding,
            strength: 0.7,
        }),
        Box::new(Wander {
            amplitude: params.wander_amplitude,
        }),
        Box::new(PointerAttraction {
            radius: params.pointer_radius,
            strength: params.pointer_strength,
        }),
    ]
}
