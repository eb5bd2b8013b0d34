//! Error types for folio-graph.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("node index {0} out of range")]
    UnknownIndex(usize),

    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("self-loop on node: {0}")]
    SelfLoop(String),

    #[error("invalid size {size} for node {id}")]
    InvalidSize { id: String, size: f64 },
}

pub type Result<T> = std::result::Result<T, GraphError>;
