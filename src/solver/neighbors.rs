//! Neighbor discovery and density accumulation
//!
//! One pass over every unordered pair `(i, j)` with `i < j`. Each pair within
//! the neighbor radius writes to two particle slots: both density
//! accumulators receive the pair's weight, but only the lower index records
//! the pair in its neighbor list. Later stages walk "particle -> recorded
//! neighbors" and apply their effect to both sides explicitly.
//!
//! Brute force O(n²). A uniform grid keyed by cells of size `R`, scanning
//! the 3x3 surrounding cells, is the upgrade path for large particle counts.

use crate::config::SimulationParams;
use crate::core::Particle;
use crate::math::{Real, Vector};

/// Normalized closeness `q = 1 - d/R` of two positions, `None` at or beyond `R`.
#[inline]
pub fn closeness(a: Vector, b: Vector, radius: Real) -> Option<Real> {
    let distance = a.distance(b);
    (distance < radius).then(|| 1.0 - distance / radius)
}

/// Symmetric density update for one pair. Mutates slots `i` and `j`.
#[inline]
pub fn accumulate_pair_density(particles: &mut [Particle], i: usize, j: usize, q: Real) {
    debug_assert!(i < j);
    let q2 = q * q;
    let q3 = q2 * q;

    let first = &mut particles[i];
    first.density += q2;
    first.near_density += q3;
    first.neighbors.push(j);

    let second = &mut particles[j];
    second.density += q2;
    second.near_density += q3;
}

/// Accumulate density and near-density for every particle and rebuild the
/// neighbor lists. Returns the number of pairs found.
///
/// Expects step state to have been cleared by the integrator.
pub fn compute_density(particles: &mut [Particle], params: &SimulationParams) -> usize {
    let radius = params.radius;
    let mut pairs = 0;

    for i in 0..particles.len() {
        let position = particles[i].position;
        for j in (i + 1)..particles.len() {
            if let Some(q) = closeness(position, particles[j].position, radius) {
                accumulate_pair_density(particles, i, j, q);
                pairs += 1;
            }
        }
    }

    pairs
}
