//! Error types for Stratum operations.
//!
//! This module provides the main error type [`StratumError`] which covers
//! every condition a layout call can reject. Degenerate input (no nodes),
//! cyclic graphs and missing sizes are not errors.

use thiserror::Error;

/// The main error type for Stratum operations.
///
/// Layout calls are atomic: when one of these is returned, no result was
/// built and the caller's nodes and edges are untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StratumError {
    /// An edge names a node id that is not part of the node collection.
    #[error("Edge `{edge}` references unknown node `{node}`")]
    UnknownNode { edge: String, node: String },

    /// Two nodes share the same id.
    #[error("Duplicate node id `{0}`")]
    DuplicateNode(String),

    #[error("Invalid layout options: {0}")]
    InvalidOptions(String),

    #[error("Layout error: {0}")]
    Layout(String),
}

impl StratumError {
    /// Returns true for errors caused by the graph topology rather than the options.
    pub fn is_graph_error(&self) -> bool {
        matches!(self, Self::UnknownNode { .. } | Self::DuplicateNode(_))
    }
}
