//! Error types for planning and provider calls.

use thiserror::Error;

/// Failure reported by a duration or geometry provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("routing service error: {code} - {message}")]
    Api { code: String, message: String },

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Failure of a whole optimization call.
///
/// Input errors are raised before any provider is contacted.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid time of day for {field}: {value:?}")]
    InvalidTime { field: String, value: String },

    #[error("{role} anchor {id} is not in the stop list")]
    UnknownAnchor { role: AnchorRole, id: String },

    #[error("start and end anchor are the same stop in a multi-stop request")]
    ConflictingAnchors,

    #[error("duration matrix unavailable: {0}")]
    Matrix(#[from] ProviderError),

    #[error("duration matrix has {rows} rows (short row: {short_row:?}), expected {expected}x{expected}")]
    MatrixShape {
        expected: usize,
        rows: usize,
        short_row: Option<usize>,
    },
}

/// Which end of the tour an anchor pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorRole {
    Start,
    End,
}

impl std::fmt::Display for AnchorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnchorRole::Start => f.write_str("start"),
            AnchorRole::End => f.write_str("end"),
        }
    }
}
