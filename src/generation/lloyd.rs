//! Lloyd's Relaxation for uniform site distribution
//!
//! Lloyd's Relaxation iteratively improves the uniformity of a site set by
//! moving each site to the centroid of its clipped Voronoi cell.

use glam::DVec2;
use std::time::Instant;

use crate::config::BoundingBox;
use crate::error::Result;
use crate::fortune::FortuneProcessor;

/// Options for Lloyd's relaxation algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LloydOptions {
    /// Maximum number of iterations to run
    pub max_iterations: usize,
    /// Stop once the largest displacement falls below this fraction of the
    /// box diagonal. Set to 0.0 to always run `max_iterations`.
    pub convergence_threshold: f64,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            convergence_threshold: 0.001,
        }
    }
}

/// Apply Lloyd's Relaxation to a site set
///
/// # Algorithm
///
/// For each iteration:
/// 1. Run the sweep over the current sites
/// 2. Clip the diagram to `bounds`
/// 3. Move every site to the area centroid of its cell
///
/// Sites that coincide with an earlier one are dropped by the sweep, so the
/// result can be shorter than the input when it contains duplicates.
///
/// # Errors
///
/// Propagates any invariant violation reported by the sweep or the clipper.
pub fn lloyd_relaxation(
    sites: Vec<DVec2>,
    bounds: &BoundingBox,
    options: LloydOptions,
) -> Result<Vec<DVec2>> {
    let threshold = options.convergence_threshold * bounds.diagonal();
    let total_start = Instant::now();

    log::info!(
        "lloyd: starting with {} sites, max {} iterations, threshold {:.4} (abs {:.4})",
        sites.len(),
        options.max_iterations,
        options.convergence_threshold,
        threshold
    );

    let mut sites = sites;
    let mut iterations_run = 0;
    let mut converged = false;

    for iteration in 0..options.max_iterations {
        let iter_start = Instant::now();

        let mut processor = FortuneProcessor::with_sites(sites.iter().copied())?;
        processor.compute()?;
        let sweep_time = iter_start.elapsed();

        processor.bind_to_box(*bounds)?;
        let max_displacement = processor.relax_faces();
        sites = processor.face_sites();
        iterations_run = iteration + 1;

        log::debug!(
            "lloyd: iter {}: sweep={:?}, total={:?}, max_disp={:.4}",
            iteration + 1,
            sweep_time,
            iter_start.elapsed(),
            max_displacement
        );

        if threshold > 0.0 && max_displacement < threshold {
            converged = true;
            break;
        }
    }

    log::info!(
        "lloyd: finished {} iterations (of max {}), converged={}, total={:?}",
        iterations_run,
        options.max_iterations,
        converged,
        total_start.elapsed()
    );

    Ok(sites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::random_sites;

    #[test]
    fn test_lloyd_relaxation_keeps_sites_in_box() {
        let bounds = BoundingBox::default();
        let sites = random_sites(60, &bounds, 42);
        let options = LloydOptions {
            max_iterations: 3,
            convergence_threshold: 0.0,
        };
        let relaxed = lloyd_relaxation(sites, &bounds, options).unwrap();

        assert_eq!(relaxed.len(), 60);
        for site in &relaxed {
            assert!(bounds.contains(*site, 1e-6));
        }
    }

    #[test]
    fn test_lloyd_relaxation_determinism() {
        let bounds = BoundingBox::default();
        let options = LloydOptions::default();
        let a = lloyd_relaxation(random_sites(40, &bounds, 12345), &bounds, options).unwrap();
        let b = lloyd_relaxation(random_sites(40, &bounds, 12345), &bounds, options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_lloyd_relaxation_evens_out_spacing() {
        let bounds = BoundingBox::default();
        let sites = random_sites(80, &bounds, 3);

        let min_gap = |points: &[DVec2]| {
            let mut best = f64::INFINITY;
            for (i, a) in points.iter().enumerate() {
                for b in &points[i + 1..] {
                    best = best.min(a.distance(*b));
                }
            }
            best
        };

        let before = min_gap(&sites);
        let options = LloydOptions {
            max_iterations: 10,
            convergence_threshold: 0.0,
        };
        let relaxed = lloyd_relaxation(sites, &bounds, options).unwrap();
        assert!(min_gap(&relaxed) > before);
    }

    #[test]
    fn test_lloyd_zero_iterations_is_identity() {
        let bounds = BoundingBox::default();
        let sites = random_sites(10, &bounds, 5);
        let options = LloydOptions {
            max_iterations: 0,
            ..Default::default()
        };
        assert_eq!(lloyd_relaxation(sites.clone(), &bounds, options).unwrap(), sites);
    }

    #[test]
    fn test_lloyd_options_default() {
        let options = LloydOptions::default();
        assert_eq!(options.max_iterations, 5);
        assert!((options.convergence_threshold - 0.001).abs() < 1e-12);
    }
}
