//! Force-directed layout for the network visual.
//!
//! A [`Simulation`] owns an index-addressed arena of [`Node`]s, a fixed edge
//! list and an ordered list of [`Force`]s applied every tick:
//! link → many-body → center → collide → wander → pointer.
//!
//! Nodes never leave the padded canvas: overshoot is clamped and the
//! velocity reflected with a restitution factor. Drag fixes a node under the
//! pointer; releasing it hands the pointer's recent velocity back to the
//! node and reheats the simulation.
//!
//! # Example
//!
//! ```
//! use folio_graph::{GraphData, SimulationParams};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(3);
//! let mut sim = GraphData::portfolio()
//!     .build(SimulationParams::new(400.0, 300.0), &mut rng)
//!     .unwrap();
//!
//! for frame in 0..120 {
//!     sim.tick(frame as f64 / 60.0);
//! }
//! assert!(sim.nodes().iter().all(|n| sim.bounds().contains(n)));
//! ```

pub mod bounds;
pub mod data;
pub mod drag;
pub mod error;
pub mod force;
pub mod node;
pub mod simulation;

pub use bounds::Bounds;
pub use data::{GraphData, LinkSpec, NodeSpec};
pub use drag::Drag;
pub use error::{GraphError, Result};
pub use force::{
    default_forces, Center, Collide, Force, Link, ManyBody, PointerAttraction, TickEnv, Wander,
};
pub use node::{Edge, Node, NodeId, WanderPhase};
pub use simulation::{Simulation, SimulationParams};

use nalgebra as na;

/// 2D vector alias.
pub type Vec2 = na::Vector2<f64>;

/// Nominal frame length used to turn px/ms into px/tick.
pub const FRAME_MS: f64 = 1000.0 / 60.0;
