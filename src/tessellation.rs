//! VoronoiTessellation: a finished, clipped and linked diagram

use glam::DVec2;
use std::collections::HashSet;

use crate::config::{BoundingBox, DiagramConfig};
use crate::diagram::{Diagram, Face, FaceId};
use crate::error::{Result, VoronoiError};
use crate::fortune::FortuneProcessor;
use crate::generation::generate_sites;
use crate::terrain::{assign_attributes, FaceAttributes, HeightSampler};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A Voronoi tessellation of a rectangle
///
/// Holds the diagram after the sweep, box clipping and face linking, ready
/// for rendering and adjacency queries.
///
/// # Examples
///
/// ```
/// use fortune_voronoi::*;
///
/// let config = DiagramConfigBuilder::new()
///     .seed(42)
///     .site_count(150)
///     .unwrap()
///     .lloyd_iterations(2)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let tessellation = VoronoiTessellation::generate(config).unwrap();
/// println!("Generated {} faces", tessellation.face_count());
///
/// if let Some(face) = tessellation.face(0) {
///     println!("Face 0 has {} neighbours", face.neighbor_count());
/// }
/// ```
#[derive(Clone)]
pub struct VoronoiTessellation {
    config: DiagramConfig,
    diagram: Diagram,

    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl VoronoiTessellation {
    /// Generate sites from `config`, relax them and build the tessellation
    pub fn generate(config: DiagramConfig) -> Result<Self> {
        let sites = generate_sites(&config)?;
        Self::build(config, sites)
    }

    /// Build the tessellation of a given site set inside `bounds`
    ///
    /// No relaxation is applied. The stored configuration records the bounds
    /// and the number of distinct sites.
    pub fn from_sites(sites: &[DVec2], bounds: BoundingBox) -> Result<Self> {
        let config = DiagramConfig {
            site_count: sites.len(),
            bounds,
            lloyd_iterations: 0,
            ..DiagramConfig::default()
        };
        Self::build(config, sites.to_vec())
    }

    fn build(mut config: DiagramConfig, sites: Vec<DVec2>) -> Result<Self> {
        let mut processor = FortuneProcessor::with_sites(sites)?;
        processor.compute()?;
        processor.bind_to_box(config.bounds)?;
        processor.link_faces()?;

        let diagram = processor.into_diagram();
        config.site_count = diagram.faces().len();

        #[cfg(feature = "spatial-index")]
        let spatial_index = SpatialIndex::new(&diagram.face_sites());

        Ok(Self {
            config,
            diagram,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    #[inline]
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    #[inline]
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    #[inline]
    pub fn bounds(&self) -> BoundingBox {
        self.config.bounds
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.diagram.faces().len()
    }

    /// Get a face by ID, `None` if out of range
    #[inline]
    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.diagram.face(id)
    }

    /// Like `face`, but reports a missing face as an error
    pub fn try_face(&self, id: FaceId) -> Result<&Face> {
        self.face(id).ok_or(VoronoiError::FaceNotFound(id))
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        self.diagram.faces()
    }

    /// Neighbour IDs of a face; empty for an invalid ID
    pub fn neighbors(&self, id: FaceId) -> &[FaceId] {
        self.diagram
            .face(id)
            .map(|f| f.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Faces reachable from `center` in at most `hops` steps (BFS)
    ///
    /// The result includes `center` itself and is empty for an invalid ID.
    pub fn find_faces_within_hops(&self, center: FaceId, hops: usize) -> Vec<FaceId> {
        if center >= self.face_count() {
            return vec![];
        }

        let mut visited = HashSet::new();
        let mut frontier = vec![center];
        visited.insert(center);

        for _ in 0..hops {
            let mut next = Vec::new();
            for &face in &frontier {
                for &neighbor in self.neighbors(face) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        let mut faces: Vec<FaceId> = visited.into_iter().collect();
        faces.sort_unstable();
        faces
    }

    /// Face containing `position` (nearest site), via the KD-tree
    #[cfg(feature = "spatial-index")]
    pub fn find_face_at(&self, position: DVec2) -> FaceId {
        self.spatial_index.find_nearest(position)
    }

    /// Sample a height per face and classify it
    pub fn attributes<S: HeightSampler + ?Sized>(&self, sampler: &S) -> Vec<FaceAttributes> {
        assign_attributes(&self.diagram, sampler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiagramConfigBuilder;

    fn small_tessellation() -> VoronoiTessellation {
        let config = DiagramConfigBuilder::new()
            .seed(42)
            .site_count(60)
            .unwrap()
            .lloyd_iterations(2)
            .unwrap()
            .build()
            .unwrap();
        VoronoiTessellation::generate(config).unwrap()
    }

    #[test]
    fn test_generation() {
        let tessellation = small_tessellation();
        assert_eq!(tessellation.face_count(), 60);
        assert_eq!(tessellation.config().seed, 42);
        assert!(tessellation.diagram().bounds().is_some());
    }

    #[test]
    fn test_face_lookup() {
        let tessellation = small_tessellation();
        assert!(tessellation.face(0).is_some());
        assert!(tessellation.face(tessellation.face_count()).is_none());
        assert_eq!(
            tessellation.try_face(1000).err(),
            Some(VoronoiError::FaceNotFound(1000))
        );
    }

    #[test]
    fn test_neighbors_are_symmetric() {
        let tessellation = small_tessellation();
        for face in tessellation.faces() {
            assert!(!face.neighbors.is_empty());
            for &n in &face.neighbors {
                assert!(tessellation.neighbors(n).contains(&face.id));
            }
        }
        assert!(tessellation.neighbors(999_999).is_empty());
    }

    #[test]
    fn test_find_faces_within_hops() {
        let tessellation = small_tessellation();

        assert_eq!(tessellation.find_faces_within_hops(0, 0), vec![0]);

        let one = tessellation.find_faces_within_hops(0, 1);
        assert_eq!(one.len(), 1 + tessellation.neighbors(0).len());

        let two = tessellation.find_faces_within_hops(0, 2);
        assert!(two.len() > one.len());

        // The adjacency graph of a tessellation is connected
        let all = tessellation.find_faces_within_hops(0, tessellation.face_count());
        assert_eq!(all.len(), tessellation.face_count());

        assert!(tessellation.find_faces_within_hops(999_999, 3).is_empty());
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_face_at() {
        let tessellation = small_tessellation();
        for face in tessellation.faces().iter().take(10) {
            assert_eq!(tessellation.find_face_at(face.site()), face.id);
        }
    }

    #[test]
    fn test_faces_cover_the_box() {
        let tessellation = small_tessellation();
        let bounds = tessellation.bounds();
        let total: f64 = tessellation.faces().iter().map(Face::area).sum();
        let expected = bounds.width() * bounds.height();
        assert!((total - expected).abs() / expected < 1e-6);
    }

    #[test]
    fn test_from_sites() {
        let sites = [DVec2::new(1.0, 1.0), DVec2::new(3.0, 3.0), DVec2::new(1.0, 1.0)];
        let bounds = BoundingBox::new(0.0, 0.0, 4.0, 4.0).unwrap();
        let tessellation = VoronoiTessellation::from_sites(&sites, bounds).unwrap();
        assert_eq!(tessellation.face_count(), 2);
        assert_eq!(tessellation.config().site_count, 2);
        assert_eq!(tessellation.neighbors(0), &[1]);
    }
}
