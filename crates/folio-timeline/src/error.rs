//! Error types for folio-timeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid year range {start}..{end}")]
    InvalidRange { start: f64, end: f64 },

    #[error("period {id}: invalid range {start}..{end}")]
    InvalidPeriod { id: String, start: f64, end: f64 },

    #[error("duplicate period id: {0}")]
    DuplicatePeriod(String),

    #[error("milestone {label}: invalid year {year}")]
    InvalidMilestone { label: String, year: f64 },
}

pub type Result<T> = std::result::Result<T, TimelineError>;
