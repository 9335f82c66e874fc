//! Planar subdivision produced by the sweep
//!
//! Vertices, edges and faces live in flat arenas and refer to each other by
//! index. Faces are created one per site, in site order, so a `SiteId` is also
//! the `FaceId` of that site's cell.

pub mod edge;
mod clip;
mod face;

pub use edge::{Edge, EdgeState, ParametricLine};
pub use face::Face;

use glam::DVec2;

use crate::config::BoundingBox;
use crate::error::{Result, VoronoiError};

/// Index of an input site
pub type SiteId = usize;

/// Index of a face; equal to the index of its site
pub type FaceId = usize;

/// Stable handle of a diagram vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

/// Stable handle of a diagram edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// A Voronoi vertex: circle-event center where three or more cells meet
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub position: DVec2,
    pub incident_edges: Vec<EdgeId>,
}

/// Vertices, edges and faces of one diagram
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    bounds: Option<BoundingBox>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the face of a new site; the returned id equals the site id
    pub fn add_face(&mut self, site: DVec2) -> FaceId {
        let id = self.faces.len();
        self.faces.push(Face::new(id, site));
        id
    }

    pub fn add_vertex(&mut self, position: DVec2) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            position,
            incident_edges: Vec::new(),
        });
        id
    }

    /// Add an edge between two faces and register it on both
    pub fn add_edge(&mut self, left: SiteId, right: SiteId, state: EdgeState) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(left, right, state));
        self.faces[left].add_incident_edge(id);
        self.faces[right].add_incident_edge(id);
        id
    }

    /// Record `a` and `b` as the two halves of one bisector
    pub fn set_twins(&mut self, a: EdgeId, b: EdgeId) {
        self.edges[a.0].twin = Some(b);
        self.edges[b.0].twin = Some(a);
    }

    /// Anchor the start of an edge at an existing vertex
    pub fn attach_start(&mut self, edge: EdgeId, vertex: VertexId) {
        self.edges[edge.0].start_vertex = Some(vertex);
        self.vertices[vertex.0].incident_edges.push(edge);
    }

    /// Fix the growing end of `edge` at `vertex`
    ///
    /// The vertex becomes a corner of both faces the edge separates. Closing
    /// an edge twice is an internal-consistency error.
    pub fn close_edge(&mut self, edge: EdgeId, vertex: VertexId) -> Result<()> {
        let position = self.vertices[vertex.0].position;
        let target = &mut self.edges[edge.0];
        if !target.close(position) {
            return Err(VoronoiError::EdgeAlreadyClosed(edge.0));
        }
        target.end_vertex = Some(vertex);
        let (left, right) = (target.left, target.right);

        self.vertices[vertex.0].incident_edges.push(edge);
        self.faces[left].add_corner(position);
        self.faces[right].add_corner(position);
        Ok(())
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id)
    }

    /// Box the diagram was last clipped to, if any
    #[inline]
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Edges that survived clipping (or every edge before clipping)
    pub fn live_edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_dropped())
            .map(|(i, e)| (EdgeId(i), e))
    }

    /// Fill `Face::neighbors` from the edges each face borders
    ///
    /// Dropped edges and closed edges of zero length do not make two faces
    /// neighbours. Neighbour lists come out sorted and without duplicates.
    pub fn link_faces(&mut self) {
        for face in &mut self.faces {
            face.neighbors.clear();
        }
        for edge in &self.edges {
            if edge.is_dropped() || edge.left == edge.right {
                continue;
            }
            if let Some([start, end]) = edge.segment() {
                if start.distance_squared(end) < f64::EPSILON {
                    continue;
                }
            }
            self.faces[edge.left].neighbors.push(edge.right);
            self.faces[edge.right].neighbors.push(edge.left);
        }
        for face in &mut self.faces {
            face.neighbors.sort_unstable();
            face.neighbors.dedup();
        }
    }

    /// Move every site to the centroid of its face; returns the largest move
    pub fn relax_faces(&mut self) -> f64 {
        self.faces
            .iter_mut()
            .map(Face::relax)
            .fold(0.0, f64::max)
    }

    /// Current site of every face, in face order
    pub fn face_sites(&self) -> Vec<DVec2> {
        self.faces.iter().map(Face::site).collect()
    }
}
