//! Pressure from density, and pairwise pressure forces.

use bevy::log::debug;

use crate::config::{MIN_PAIR_DISTANCE, SimulationParams};
use crate::core::Particle;
use crate::math::{Vector, zero_vector};

/// Equation of state for every particle. Pointwise, no neighbor traversal.
pub fn compute_pressures(particles: &mut [Particle], params: &SimulationParams) {
    for particle in particles.iter_mut() {
        particle.compute_pressure(params);
    }
}

/// Pressure force exerted on `neighbor` by `particle`, pointing from
/// `particle` toward `neighbor` when the combined pressure is repulsive.
///
/// Displacement and distance are re-derived here rather than cached from the
/// density pass. Returns `None` for coincident pairs, which have no direction.
#[inline]
pub fn pair_pressure_force(
    particle: &Particle,
    neighbor: &Particle,
    params: &SimulationParams,
) -> Option<Vector> {
    let displacement = neighbor.position - particle.position;
    let distance = displacement.length();
    if distance <= MIN_PAIR_DISTANCE {
        return None;
    }

    let q = 1.0 - distance / params.radius;
    let q2 = q * q;
    let magnitude = (particle.pressure + neighbor.pressure) * q2
        + (particle.near_pressure + neighbor.near_pressure) * q2 * q;

    Some(displacement * (magnitude / distance))
}

/// Apply pairwise pressure forces along every recorded neighbor pair.
///
/// Each neighbor receives `+force` immediately; the owning particle receives
/// the negated sum once its neighbor loop is done. Returns the number of
/// coincident pairs skipped.
pub fn apply_pressure_forces(particles: &mut [Particle], params: &SimulationParams) -> usize {
    let mut skipped = 0;

    for i in 0..particles.len() {
        let neighbors = std::mem::take(&mut particles[i].neighbors);
        let mut total = zero_vector();

        for &j in &neighbors {
            match pair_pressure_force(&particles[i], &particles[j], params) {
                Some(force) => {
                    particles[j].force += force;
                    total += force;
                }
                None => {
                    debug!("skipping coincident pressure pair ({i}, {j})");
                    skipped += 1;
                }
            }
        }

        let particle = &mut particles[i];
        particle.force -= total;
        particle.neighbors = neighbors;
    }

    skipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Real, vector};
    use crate::solver::neighbors::compute_density;

    fn prepared(positions: &[(Real, Real)], params: &SimulationParams) -> Vec<Particle> {
        let mut particles: Vec<Particle> = positions
            .iter()
            .map(|&(x, y)| Particle::new(vector(x, y), 0.0))
            .collect();
        compute_density(&mut particles, params);
        compute_pressures(&mut particles, params);
        particles
    }

    #[test]
    fn test_pressure_from_density() {
        let params = SimulationParams::default();
        let particles = prepared(&[(0.0, 0.0), (0.05, 0.0)], &params);
        let p = &particles[0];
        let expected = params.stiffness * (p.density - params.rest_density);
        assert!((p.pressure - expected).abs() < 1e-9);
        assert!((p.near_pressure - params.near_stiffness * p.near_density).abs() < 1e-9);
        // Two particles are far below rest density
        assert!(p.pressure < 0.0);
        assert!(p.near_pressure >= 0.0);
    }

    #[test]
    fn test_isolated_pair_forces_are_equal_and_opposite() {
        let params = SimulationParams::default();
        let mut particles = prepared(&[(0.0, 0.0), (0.03, 0.04)], &params);
        apply_pressure_forces(&mut particles, &params);

        let sum = particles[0].force + particles[1].force;
        assert!(sum.length() < 1e-9);
        assert!(particles[0].force.length() > 0.0);

        // Force acts along the pair axis
        let axis = (particles[1].position - particles[0].position).normalize();
        let along = particles[1].force.dot(axis).abs();
        assert!((along - particles[1].force.length()).abs() < 1e-7);
    }

    #[test]
    fn test_near_pressure_pushes_close_pair_apart() {
        // Dense enough that pressure is repulsive along the axis
        let params = SimulationParams::default().with_stiffness(0.0, 0.01);
        let mut particles = prepared(&[(0.0, 0.0), (0.01, 0.0)], &params);
        apply_pressure_forces(&mut particles, &params);

        assert!(particles[0].force.x < 0.0);
        assert!(particles[1].force.x > 0.0);
    }

    #[test]
    fn test_no_force_beyond_radius() {
        let params = SimulationParams::default();
        let mut particles = prepared(&[(0.0, 0.0), (0.2, 0.0)], &params);
        apply_pressure_forces(&mut particles, &params);
        assert_eq!(particles[0].force, vector(0.0, 0.0));
        assert_eq!(particles[1].force, vector(0.0, 0.0));
    }

    #[test]
    fn test_coincident_pair_is_skipped() {
        let params = SimulationParams::default();
        let mut particles = prepared(&[(0.1, 0.1), (0.1, 0.1)], &params);
        assert_eq!(particles[0].neighbors, vec![1]);

        let skipped = apply_pressure_forces(&mut particles, &params);
        assert_eq!(skipped, 1);
        assert!(particles.iter().all(|p| p.force == vector(0.0, 0.0)));
        assert_eq!(particles[0].neighbors, vec![1]);
    }

    #[test]
    fn test_neighbor_lists_survive_force_pass() {
        let params = SimulationParams::default();
        let mut particles = prepared(&[(0.0, 0.0), (0.03, 0.0), (0.06, 0.0)], &params);
        apply_pressure_forces(&mut particles, &params);
        assert_eq!(particles[0].neighbors, vec![1, 2]);
        assert_eq!(particles[1].neighbors, vec![2]);
    }
}
