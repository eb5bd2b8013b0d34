//! Error types for folio-theme.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("empty color value")]
    Empty,

    #[error("invalid hex color: {0}")]
    InvalidHex(String),

    #[error("invalid color component: {0}")]
    InvalidComponent(String),

    #[error("expected 3 or 4 components, found {0}")]
    ComponentCount(usize),

    #[error("unsupported color syntax: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, ColorError>;
