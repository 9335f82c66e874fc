//! Site generation
//!
//! Seeded random site placement and Lloyd relaxation toward a centroidal
//! diagram.

mod lloyd;
mod points;

pub use lloyd::{lloyd_relaxation, LloydOptions};
pub use points::random_sites;

use glam::DVec2;

use crate::config::DiagramConfig;
use crate::error::Result;

/// Generate the final site set for a configuration
///
/// Draws `site_count` random sites from the seed, then relaxes them if the
/// configuration asks for Lloyd iterations.
pub fn generate_sites(config: &DiagramConfig) -> Result<Vec<DVec2>> {
    let sites = random_sites(config.site_count, &config.bounds, config.seed);

    if config.lloyd_iterations == 0 {
        return Ok(sites);
    }
    let options = LloydOptions {
        max_iterations: config.lloyd_iterations,
        convergence_threshold: config.lloyd_convergence,
    };
    lloyd_relaxation(sites, &config.bounds, options)
}
