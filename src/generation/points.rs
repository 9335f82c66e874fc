//! Seeded random site placement

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::BoundingBox;

/// Generate `count` sites uniformly distributed inside `bounds`
///
/// The same seed always yields the same sites. Coordinates are drawn from the
/// half-open ranges `[min, max)` so no site lands on the top or right edge.
///
/// # Example
///
/// ```rust
/// use fortune_voronoi::{generation::random_sites, BoundingBox};
///
/// let sites = random_sites(50, &BoundingBox::default(), 7);
/// assert_eq!(sites.len(), 50);
/// assert_eq!(sites, random_sites(50, &BoundingBox::default(), 7));
/// ```
pub fn random_sites(count: usize, bounds: &BoundingBox, seed: u64) -> Vec<DVec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            DVec2::new(
                rng.gen_range(bounds.min_x..bounds.max_x),
                rng.gen_range(bounds.min_y..bounds.max_y),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_sites_count_and_bounds() {
        let bounds = BoundingBox::new(-5.0, 10.0, 5.0, 30.0).unwrap();
        let sites = random_sites(200, &bounds, 1);
        assert_eq!(sites.len(), 200);
        for site in &sites {
            assert!(bounds.contains(*site, 0.0));
        }
    }

    #[test]
    fn test_random_sites_empty() {
        assert!(random_sites(0, &BoundingBox::default(), 1).is_empty());
    }

    #[test]
    fn test_random_sites_determinism() {
        let bounds = BoundingBox::default();
        assert_eq!(random_sites(20, &bounds, 99), random_sites(20, &bounds, 99));
        assert_ne!(random_sites(20, &bounds, 99), random_sites(20, &bounds, 100));
    }
}
