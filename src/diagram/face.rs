//! Voronoi Face Structure
//!
//! One face per input site: its incident edges, neighbours, and the corner
//! points that bound its (clipped) cell.

use glam::DVec2;

use super::{EdgeId, FaceId};

/// Corners closer than this are treated as the same point
pub(crate) const CORNER_TOLERANCE: f64 = 1e-7;

/// The Voronoi cell of a single site
///
/// Corners accumulate during the sweep (circle-event vertices) and during box
/// clipping (edge/box intersections and box corners). The boundary polygon is
/// derived on demand by sorting the corners by angle around their mean, which
/// lies inside the convex cell even when the site sits on the cell boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Index of this face, equal to the index of its site
    pub id: FaceId,

    site: DVec2,

    /// Edges bounding this face (including dropped ones)
    pub incident_edges: Vec<EdgeId>,

    /// Faces sharing an edge with this one; filled by `Diagram::link_faces`
    pub neighbors: Vec<FaceId>,

    corners: Vec<DVec2>,
}

impl Face {
    pub fn new(id: FaceId, site: DVec2) -> Self {
        Self {
            id,
            site,
            incident_edges: Vec::new(),
            neighbors: Vec::new(),
            corners: Vec::new(),
        }
    }

    /// Current site position (moved by `relax`)
    #[inline]
    pub fn site(&self) -> DVec2 {
        self.site
    }

    /// Corner points in insertion order
    #[inline]
    pub fn corners(&self) -> &[DVec2] {
        &self.corners
    }

    /// Add a corner unless an equal one is already present
    pub fn add_corner(&mut self, corner: DVec2) -> bool {
        if self
            .corners
            .iter()
            .any(|c| c.distance_squared(corner) < CORNER_TOLERANCE * CORNER_TOLERANCE)
        {
            return false;
        }
        self.corners.push(corner);
        true
    }

    pub(crate) fn retain_corners(&mut self, keep: impl FnMut(&DVec2) -> bool) {
        self.corners.retain(keep);
    }

    pub(crate) fn add_incident_edge(&mut self, edge: EdgeId) {
        if !self.incident_edges.contains(&edge) {
            self.incident_edges.push(edge);
        }
    }

    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    #[inline]
    pub fn is_neighbor_of(&self, other: FaceId) -> bool {
        self.neighbors.contains(&other)
    }

    /// Boundary polygon: corners sorted counter-clockwise around their mean
    ///
    /// A site on the box border or corner is itself a corner of its clipped
    /// cell, so the angular sort cannot be centred on the site.
    pub fn as_polygon(&self) -> Vec<DVec2> {
        if self.corners.is_empty() {
            return Vec::new();
        }
        let center = self.corners.iter().copied().sum::<DVec2>() / self.corners.len() as f64;
        let mut with_angles: Vec<(DVec2, f64)> = self
            .corners
            .iter()
            .map(|&c| {
                let d = c - center;
                (c, d.y.atan2(d.x))
            })
            .collect();
        with_angles.sort_by(|a, b| a.1.total_cmp(&b.1));
        with_angles.into_iter().map(|(c, _)| c).collect()
    }

    /// Signed area of the boundary polygon (positive, since it is CCW)
    pub fn area(&self) -> f64 {
        let polygon = self.as_polygon();
        if polygon.len() < 3 {
            return 0.0;
        }
        shoelace(&polygon) * 0.5
    }

    /// Area centroid of the boundary polygon
    ///
    /// Falls back to the mean of the corners when the polygon has no area,
    /// and to `None` when the face has no corners at all.
    pub fn centroid(&self) -> Option<DVec2> {
        if self.corners.is_empty() {
            return None;
        }
        let polygon = self.as_polygon();
        let twice_area = shoelace(&polygon);
        if polygon.len() < 3 || twice_area.abs() < f64::EPSILON {
            let sum: DVec2 = polygon.iter().copied().sum();
            return Some(sum / polygon.len() as f64);
        }

        let mut acc = DVec2::ZERO;
        for (i, &a) in polygon.iter().enumerate() {
            let b = polygon[(i + 1) % polygon.len()];
            acc += (a + b) * a.perp_dot(b);
        }
        Some(acc / (3.0 * twice_area))
    }

    /// Move the site to the centroid of the current corners
    ///
    /// This is one Lloyd relaxation step for a single cell. Returns how far
    /// the site moved; 0.0 if the face has no corners.
    pub fn relax(&mut self) -> f64 {
        match self.centroid() {
            Some(centroid) => {
                let displacement = self.site.distance(centroid);
                self.site = centroid;
                displacement
            }
            None => 0.0,
        }
    }

    /// Euclidean distance between the sites of two faces
    #[inline]
    pub fn distance_to(&self, other: &Face) -> f64 {
        self.site.distance(other.site)
    }
}

/// Twice the signed area of a closed polygon
fn shoelace(polygon: &[DVec2]) -> f64 {
    polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(a, b)| a.perp_dot(*b))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_face() -> Face {
        let mut face = Face::new(0, DVec2::new(1.0, 1.0));
        // Deliberately out of angular order
        for c in [
            DVec2::new(2.0, 2.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 2.0),
            DVec2::new(2.0, 0.0),
        ] {
            face.add_corner(c);
        }
        face
    }

    #[test]
    fn test_face_creation() {
        let mut face = Face::new(3, DVec2::new(5.0, 5.0));
        face.neighbors = vec![1, 2];
        assert_eq!(face.id, 3);
        assert_eq!(face.neighbor_count(), 2);
        assert!(face.is_neighbor_of(1));
        assert!(!face.is_neighbor_of(9));
        assert!(face.as_polygon().is_empty());
        assert_eq!(face.centroid(), None);
    }

    #[test]
    fn test_add_corner_deduplicates() {
        let mut face = Face::new(0, DVec2::ZERO);
        assert!(face.add_corner(DVec2::new(1.0, 1.0)));
        assert!(!face.add_corner(DVec2::new(1.0, 1.0 + 1e-9)));
        assert_eq!(face.corners().len(), 1);
    }

    #[test]
    fn test_as_polygon_is_counter_clockwise() {
        let polygon = square_face().as_polygon();
        assert_eq!(
            polygon,
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(2.0, 0.0),
                DVec2::new(2.0, 2.0),
                DVec2::new(0.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_polygon_with_site_on_a_corner() {
        // Clipped cell of a site sitting on the box corner (0, 0)
        let mut face = Face::new(0, DVec2::new(0.0, 0.0));
        for c in [
            DVec2::new(50.0, 0.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(50.0, 50.0),
            DVec2::new(0.0, 50.0),
        ] {
            face.add_corner(c);
        }
        assert_eq!(
            face.as_polygon(),
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(50.0, 0.0),
                DVec2::new(50.0, 50.0),
                DVec2::new(0.0, 50.0),
            ]
        );
        assert!((face.area() - 2500.0).abs() < 1e-9);

        face.relax();
        assert!((face.site() - DVec2::new(25.0, 25.0)).length() < 1e-9);
    }

    #[test]
    fn test_area_and_centroid() {
        let face = square_face();
        assert!((face.area() - 4.0).abs() < 1e-12);
        let centroid = face.centroid().unwrap();
        assert!((centroid - DVec2::new(1.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_relax_moves_site_to_centroid() {
        let mut face = Face::new(0, DVec2::new(0.5, 0.5));
        for c in [
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 2.0),
            DVec2::new(0.0, 2.0),
        ] {
            face.add_corner(c);
        }
        let moved = face.relax();
        assert!((face.site() - DVec2::new(2.0, 1.0)).length() < 1e-12);
        assert!((moved - DVec2::new(0.5, 0.5).distance(DVec2::new(2.0, 1.0))).abs() < 1e-12);

        // Already centred: a second pass barely moves it
        assert!(face.relax() < 1e-12);
    }

    #[test]
    fn test_relax_without_corners() {
        let mut face = Face::new(0, DVec2::new(3.0, 4.0));
        assert_eq!(face.relax(), 0.0);
        assert_eq!(face.site(), DVec2::new(3.0, 4.0));
    }

    #[test]
    fn test_distance_to() {
        let a = Face::new(0, DVec2::new(0.0, 0.0));
        let b = Face::new(1, DVec2::new(3.0, 4.0));
        assert_eq!(a.distance_to(&b), 5.0);
    }
}
