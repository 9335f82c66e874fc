//! Diagram edges and their growth state

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{EdgeId, SiteId, VertexId};

/// Geometric state of an edge
///
/// The sweep creates edges as `Open` rays (or, between sites sharing the
/// topmost height, as `Unbounded` lines) and closes each one at most once.
/// Box clipping turns every surviving edge into a `Closed` segment.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeState {
    /// Starts at `start` and still grows along `direction`
    Open { start: DVec2, direction: DVec2 },
    /// Infinite line through `anchor`, growing along `direction`
    Unbounded { anchor: DVec2, direction: DVec2 },
    /// Comes in from infinity against `direction` and stops at `end`
    ReverseRay { end: DVec2, direction: DVec2 },
    /// Finite segment
    Closed { start: DVec2, end: DVec2 },
    /// Removed by clipping; lies entirely outside the box
    Dropped,
}

/// Parametric form `origin + t * direction` for `t` in `[t_min, t_max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametricLine {
    pub origin: DVec2,
    pub direction: DVec2,
    pub t_min: f64,
    pub t_max: f64,
}

impl ParametricLine {
    #[inline]
    pub fn at(&self, t: f64) -> DVec2 {
        self.origin + self.direction * t
    }
}

/// Boundary between the Voronoi regions of two sites
///
/// `left` and `right` are the sites whose arcs lay left and right of the
/// breakpoint that traced the edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub left: SiteId,
    pub right: SiteId,
    /// The opposite half of a bisector split off by the same site event
    pub twin: Option<EdgeId>,
    /// Diagram vertex at the start, if the start is a circle-event vertex
    pub start_vertex: Option<VertexId>,
    /// Diagram vertex at the end, once closed by a circle event
    pub end_vertex: Option<VertexId>,
    pub(crate) state: EdgeState,
}

impl Edge {
    pub fn new(left: SiteId, right: SiteId, state: EdgeState) -> Self {
        Self {
            left,
            right,
            twin: None,
            start_vertex: None,
            end_vertex: None,
            state,
        }
    }

    #[inline]
    pub fn state(&self) -> EdgeState {
        self.state
    }

    pub fn start(&self) -> Option<DVec2> {
        match self.state {
            EdgeState::Open { start, .. } | EdgeState::Closed { start, .. } => Some(start),
            _ => None,
        }
    }

    pub fn end(&self) -> Option<DVec2> {
        match self.state {
            EdgeState::ReverseRay { end, .. } | EdgeState::Closed { end, .. } => Some(end),
            _ => None,
        }
    }

    /// Growth direction of an edge that is still unbounded on some side
    pub fn direction(&self) -> Option<DVec2> {
        match self.state {
            EdgeState::Open { direction, .. }
            | EdgeState::Unbounded { direction, .. }
            | EdgeState::ReverseRay { direction, .. } => Some(direction),
            _ => None,
        }
    }

    /// Both endpoints as a segment, for closed edges
    pub fn segment(&self) -> Option<[DVec2; 2]> {
        match self.state {
            EdgeState::Closed { start, end } => Some([start, end]),
            _ => None,
        }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self.state, EdgeState::Closed { .. })
    }

    #[inline]
    pub fn is_dropped(&self) -> bool {
        matches!(self.state, EdgeState::Dropped)
    }

    /// Whether either end still extends to infinity
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        matches!(
            self.state,
            EdgeState::Open { .. } | EdgeState::Unbounded { .. } | EdgeState::ReverseRay { .. }
        )
    }

    /// Fix the growing end at `end`
    ///
    /// Returns `false` (leaving the edge untouched) if the edge has no growing
    /// end left, which means it was already closed.
    pub(crate) fn close(&mut self, end: DVec2) -> bool {
        self.state = match self.state {
            EdgeState::Open { start, .. } => EdgeState::Closed { start, end },
            EdgeState::Unbounded { direction, .. } => EdgeState::ReverseRay { end, direction },
            _ => return false,
        };
        true
    }

    /// Parametric form used by the box clipper
    pub fn parametric(&self) -> Option<ParametricLine> {
        let line = match self.state {
            EdgeState::Open { start, direction } => ParametricLine {
                origin: start,
                direction,
                t_min: 0.0,
                t_max: f64::INFINITY,
            },
            EdgeState::Unbounded { anchor, direction } => ParametricLine {
                origin: anchor,
                direction,
                t_min: f64::NEG_INFINITY,
                t_max: f64::INFINITY,
            },
            EdgeState::ReverseRay { end, direction } => ParametricLine {
                origin: end,
                direction,
                t_min: f64::NEG_INFINITY,
                t_max: 0.0,
            },
            EdgeState::Closed { start, end } => ParametricLine {
                origin: start,
                direction: end - start,
                t_min: 0.0,
                t_max: 1.0,
            },
            EdgeState::Dropped => return None,
        };
        Some(line)
    }

    /// The site across this edge from `site`
    pub fn other_side(&self, site: SiteId) -> Option<SiteId> {
        if self.left == site {
            Some(self.right)
        } else if self.right == site {
            Some(self.left)
        } else {
            None
        }
    }
}
