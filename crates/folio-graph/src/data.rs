//! Graph description as embedded in the page.
//!
//! ```json
//! {
//!   "nodes": [{ "id": "rust", "label": "Rust", "size": 14, "opacity": 0.9 }],
//!   "links": [{ "source": "rust", "target": "wasm" }]
//! }
//! ```

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::simulation::{Simulation, SimulationParams};

fn default_size() -> f64 {
    10.0
}

fn default_opacity() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    /// Falls back to the id.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_size")]
    pub size: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
}

impl GraphData {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Topic graph shown when the page embeds none.
    pub fn portfolio() -> Self {
        let node = |id: &str, label: &str, size: f64| NodeSpec {
            id: id.to_string(),
            label: Some(label.to_string()),
            size,
            opacity: default_opacity(),
        };
        let nodes = vec![
            node("me", "Me", 16.0),
            node("research", "Research", 12.0),
            node("software", "Software", 12.0),
            node("writing", "Writing", 10.0),
            node("teaching", "Teaching", 9.0),
            node("rust", "Rust", 8.0),
            node("web", "Web", 8.0),
            node("data", "Data", 8.0),
            node("design", "Design", 7.0),
            node("music", "Music", 7.0),
            node("climbing", "Climbing", 6.0),
        ];
        let links = [
            ("me", "research"),
            ("me", "software"),
            ("me", "writing"),
            ("me", "teaching"),
            ("me", "music"),
            ("me", "climbing"),
            ("software", "rust"),
            ("software", "web"),
            ("research", "data"),
            ("research", "writing"),
            ("web", "design"),
            ("data", "rust"),
            ("teaching", "writing"),
        ]
        .into_iter()
        .map(|(s, t)| LinkSpec {
            source: s.to_string(),
            target: t.to_string(),
        })
        .collect();
        Self { nodes, links }
    }

    /// Instantiate a simulation with randomized initial placement.
    pub fn build<R: Rng + ?Sized>(&self, params: SimulationParams, rng: &mut R) -> Result<Simulation> {
        let mut sim = Simulation::new(params);
        for spec in &self.nodes {
            let label = spec.label.clone().unwrap_or_else(|| spec.id.clone());
            let id = sim.add_node(spec.id.clone(), label, spec.size, rng)?;
            if let Some(node) = sim.node_mut(id) {
                node.base_opacity = spec.opacity.clamp(0.0, 1.0);
            }
        }
        for link in &self.links {
            let source = sim
                .find(&link.source)
                .ok_or_else(|| GraphError::UnknownNode(link.source.clone()))?;
            let target = sim
                .find(&link.target)
                .ok_or_else(|| GraphError::UnknownNode(link.target.clone()))?;
            sim.add_edge(source, target)?;
        }
        info!(
            "graph built: {} nodes, {} links",
            sim.nodes().len(),
            sim.edges().len()
        );
        Ok(sim)
    }
}

impl Default for GraphData {
    fn default() -> Self {
        Self::portfolio()
    }
}
