//! Error types for Voronoi diagram construction

use thiserror::Error;

/// Errors that can occur while building, clipping or querying a diagram
///
/// Degenerate geometry (collinear triples, diverging breakpoints, circle
/// events already passed by the sweep) is not an error: those cases simply
/// produce no event. The variants marked as invariant violations indicate a
/// bug in the sweep rather than bad input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoronoiError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A site has a NaN or infinite coordinate
    #[error("invalid site ({x}, {y}): coordinates must be finite")]
    InvalidSite { x: f64, y: f64 },

    /// A bounding box is empty, inverted or not finite
    #[error("invalid bounding box [{min_x}, {max_x}] x [{min_y}, {max_y}]")]
    InvalidBoundingBox {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },

    /// Sites can only be added before the first event is processed
    #[error("cannot add sites after the sweep has started")]
    SweepAlreadyStarted,

    /// The operation needs a finished sweep but events are still pending
    #[error("sweep is incomplete: {0} events still pending")]
    SweepIncomplete(usize),

    /// Invariant violation: the beach line is non-empty but no arc covers x
    #[error("no arc above site ({x}, {y}) on a non-empty beach line")]
    NoArcAbove { x: f64, y: f64 },

    /// Invariant violation: an edge was closed twice
    #[error("edge {0} is already closed")]
    EdgeAlreadyClosed(usize),

    /// Invariant violation: an edge with an endpoint inside the box missed it
    #[error("edge {0} starts inside the bounding box but clipping rejected it")]
    UnexpectedClipMiss(usize),

    /// Requested face ID does not exist
    #[error("face not found: {0}")]
    FaceNotFound(usize),
}

/// Result type alias for voronoi operations
pub type Result<T> = std::result::Result<T, VoronoiError>;
