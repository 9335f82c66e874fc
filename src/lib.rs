//! Planar Voronoi diagrams with Fortune's sweep-line algorithm
//!
//! Builds the Voronoi diagram of a finite 2D site set, clips it to a
//! rectangle and exposes the result as vertices, edges and faces. The sweep
//! can run in one call or one event at a time for animation.
//!
//! # Quick Start
//!
//! ```rust
//! use fortune_voronoi::*;
//!
//! // Low level: drive the sweep yourself
//! let mut processor = FortuneProcessor::new();
//! for site in [DVec2::new(120.0, 80.0), DVec2::new(400.0, 350.0), DVec2::new(600.0, 90.0)] {
//!     processor.add_site(site).unwrap();
//! }
//! processor.compute().unwrap();
//! processor.bind_to_box(BoundingBox::default()).unwrap();
//! assert_eq!(processor.diagram().faces().len(), 3);
//!
//! // High level: seeded sites, relaxation, clipping and adjacency in one go
//! let config = DiagramConfigBuilder::new()
//!     .seed(42)
//!     .site_count(100)
//!     .unwrap()
//!     .lloyd_iterations(3)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! let tessellation = VoronoiTessellation::generate(config).unwrap();
//! println!("{} faces", tessellation.face_count());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): O(log n) point-to-face lookups using a KD-tree
//! - `serde`: serialization support for configuration, edge states and terrain

// Modules
pub mod config;
pub mod diagram;
pub mod error;
pub mod fortune;
pub mod generation;
pub mod geometry;
pub mod terrain;
pub mod tessellation;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use config::{BoundingBox, DiagramConfig, DiagramConfigBuilder};
pub use diagram::{Diagram, Edge, EdgeId, EdgeState, Face, FaceId, SiteId, Vertex, VertexId};
pub use error::{Result, VoronoiError};
pub use fortune::{Event, EventKind, FortuneProcessor};
pub use generation::{lloyd_relaxation, random_sites, LloydOptions};
pub use geometry::{circumcircle, find_intersection, orientation, Circle, Orientation};
pub use terrain::{
    assign_attributes, BasicColorMapper, ColorMapper, CustomColorMapper, FaceAttributes,
    GridHeightSampler, HeightSampler, TerrainClass, TerrainColor,
};
pub use tessellation::VoronoiTessellation;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
