//! Diagram Configuration and Builder
//!
//! This module provides the clipping rectangle and the configuration types for
//! deterministic, seeded diagram generation.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};

/// Axis-aligned rectangle used to bound the diagram
///
/// `min_y` is the bottom and `max_y` the top in the sweep's coordinate
/// convention; a screen-space caller with y pointing down can use the same
/// values unchanged, since clipping is symmetric.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a validated bounding box
    ///
    /// # Errors
    ///
    /// Returns `InvalidBoundingBox` if any bound is not finite or the box has
    /// zero or negative extent on either axis.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        let finite = [min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite());
        if !finite || min_x >= max_x || min_y >= max_y {
            return Err(VoronoiError::InvalidBoundingBox {
                min_x,
                min_y,
                max_x,
                max_y,
            });
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    /// Length of the box diagonal
    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }

    /// Check whether a point lies inside the box, allowing `tolerance` slack
    #[inline]
    pub fn contains(&self, p: DVec2, tolerance: f64) -> bool {
        p.x >= self.min_x - tolerance
            && p.x <= self.max_x + tolerance
            && p.y >= self.min_y - tolerance
            && p.y <= self.max_y + tolerance
    }

    /// The four corners, counter-clockwise from (min_x, min_y)
    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::new(self.min_x, self.min_y),
            DVec2::new(self.max_x, self.min_y),
            DVec2::new(self.max_x, self.max_y),
            DVec2::new(self.min_x, self.max_y),
        ]
    }

    /// Project a point onto the box
    #[inline]
    pub fn clamp(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            p.x.clamp(self.min_x, self.max_x),
            p.y.clamp(self.min_y, self.max_y),
        )
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 700.0,
            max_y: 700.0,
        }
    }
}

/// Configuration for deterministic diagram generation
///
/// The same configuration always produces the identical site set, relaxation
/// and diagram.
///
/// # Example
///
/// ```rust
/// use fortune_voronoi::*;
///
/// let config = DiagramConfigBuilder::new()
///     .seed(42)
///     .site_count(200)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: DiagramConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramConfig {
    /// Random seed for site placement
    pub seed: u64,

    /// Number of sites scattered inside `bounds`
    pub site_count: usize,

    /// Rectangle the sites are drawn from and the diagram is clipped to
    pub bounds: BoundingBox,

    /// Number of Lloyd relaxation passes
    ///
    /// - 0: raw random cells
    /// - 2-5: visibly more regular cells
    pub lloyd_iterations: usize,

    /// Early-exit threshold for relaxation, as a fraction of the box diagonal
    ///
    /// Relaxation stops once no site moves further than
    /// `lloyd_convergence * bounds.diagonal()`. 0.0 disables early exit.
    pub lloyd_convergence: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            site_count: 100,
            bounds: BoundingBox::default(),
            lloyd_iterations: 0,
            lloyd_convergence: 0.001,
        }
    }
}

/// Builder for creating DiagramConfig with validation
///
/// # Example
///
/// ```rust
/// use fortune_voronoi::*;
///
/// let config = DiagramConfigBuilder::new()
///     .seed(12345)
///     .bounds(BoundingBox::new(0.0, 0.0, 100.0, 50.0).unwrap())
///     .lloyd_iterations(3)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.lloyd_iterations, 3);
/// ```
#[derive(Debug, Clone)]
pub struct DiagramConfigBuilder {
    seed: Option<u64>,
    site_count: usize,
    bounds: BoundingBox,
    lloyd_iterations: usize,
    lloyd_convergence: f64,
}

impl DiagramConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: random (from thread_rng)
    /// - site_count: 100
    /// - bounds: 700 x 700 box at the origin
    /// - lloyd_iterations: 0
    /// - lloyd_convergence: 0.001
    pub fn new() -> Self {
        let defaults = DiagramConfig::default();
        Self {
            seed: None,
            site_count: defaults.site_count,
            bounds: defaults.bounds,
            lloyd_iterations: defaults.lloyd_iterations,
            lloyd_convergence: defaults.lloyd_convergence,
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of sites
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `count` is zero
    pub fn site_count(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(VoronoiError::InvalidConfig(
                "site count must be at least 1".to_string(),
            ));
        }
        self.site_count = count;
        Ok(self)
    }

    pub fn bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the number of Lloyd relaxation passes
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations > 50
    pub fn lloyd_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations > 50 {
            return Err(VoronoiError::InvalidConfig(format!(
                "Lloyd iterations must be <= 50 (got {})",
                iterations
            )));
        }
        self.lloyd_iterations = iterations;
        Ok(self)
    }

    /// Set the relaxation convergence threshold (fraction of box diagonal)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if threshold is negative or not finite
    pub fn lloyd_convergence(mut self, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(VoronoiError::InvalidConfig(format!(
                "Lloyd convergence threshold must be >= 0 (got {})",
                threshold
            )));
        }
        self.lloyd_convergence = threshold;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    /// Bounds are re-validated since the struct fields are public.
    pub fn build(self) -> Result<DiagramConfig> {
        let b = self.bounds;
        let bounds = BoundingBox::new(b.min_x, b.min_y, b.max_x, b.max_y)?;
        let seed = self.seed.unwrap_or_else(rand::random);

        Ok(DiagramConfig {
            seed,
            site_count: self.site_count,
            bounds,
            lloyd_iterations: self.lloyd_iterations,
            lloyd_convergence: self.lloyd_convergence,
        })
    }
}

impl Default for DiagramConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_validation() {
        assert!(BoundingBox::new(0.0, 0.0, 10.0, 10.0).is_ok());
        assert!(BoundingBox::new(10.0, 0.0, 0.0, 10.0).is_err());
        assert!(BoundingBox::new(0.0, 5.0, 10.0, 5.0).is_err());
        assert!(BoundingBox::new(0.0, 0.0, f64::INFINITY, 10.0).is_err());
        assert!(BoundingBox::new(f64::NAN, 0.0, 1.0, 10.0).is_err());
    }

    #[test]
    fn test_bounding_box_geometry() {
        let b = BoundingBox::new(-1.0, -2.0, 3.0, 1.0).unwrap();
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 3.0);
        assert_eq!(b.diagonal(), 5.0);
        assert_eq!(b.center(), DVec2::new(1.0, -0.5));
        assert!(b.contains(DVec2::new(0.0, 0.0), 0.0));
        assert!(!b.contains(DVec2::new(3.1, 0.0), 0.0));
        assert!(b.contains(DVec2::new(3.1, 0.0), 0.2));
        assert_eq!(b.corners()[2], DVec2::new(3.0, 1.0));
        assert_eq!(b.clamp(DVec2::new(10.0, -10.0)), DVec2::new(3.0, -2.0));
    }

    #[test]
    fn test_builder_defaults() {
        let config = DiagramConfigBuilder::new().build().unwrap();
        assert_eq!(config.site_count, 100);
        assert_eq!(config.lloyd_iterations, 0);
        assert_eq!(config.bounds, BoundingBox::default());
    }

    #[test]
    fn test_builder_custom() {
        let config = DiagramConfigBuilder::new()
            .seed(42)
            .site_count(12)
            .unwrap()
            .lloyd_iterations(4)
            .unwrap()
            .lloyd_convergence(0.0)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.site_count, 12);
        assert_eq!(config.lloyd_iterations, 4);
        assert_eq!(config.lloyd_convergence, 0.0);
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        assert!(DiagramConfigBuilder::new().site_count(0).is_err());
        assert!(DiagramConfigBuilder::new().lloyd_iterations(51).is_err());
        assert!(DiagramConfigBuilder::new().lloyd_convergence(-0.5).is_err());
        assert!(DiagramConfigBuilder::new().lloyd_convergence(f64::NAN).is_err());

        let inverted = BoundingBox {
            min_x: 5.0,
            min_y: 0.0,
            max_x: 1.0,
            max_y: 1.0,
        };
        assert!(DiagramConfigBuilder::new().bounds(inverted).build().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = DiagramConfigBuilder::new().seed(7).build().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let restored: DiagramConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
