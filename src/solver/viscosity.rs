//! Viscosity impulses along recorded neighbor pairs.
//!
//! Velocities are corrected in place and in particle order, so a particle
//! visited later already sees the corrections of earlier pairs.

use bevy::log::debug;

use crate::config::{MIN_PAIR_DISTANCE, SimulationParams};
use crate::core::Particle;
use crate::math::{Vector, zero_vector};

/// Impulse damping the approach of `particle` toward `neighbor`. Zero when the
/// pair is not approaching; `None` for coincident pairs, which have no direction.
#[inline]
pub fn pair_viscosity_impulse(
    particle: &Particle,
    neighbor: &Particle,
    params: &SimulationParams,
) -> Option<Vector> {
    let displacement = neighbor.position - particle.position;
    let distance = displacement.length();
    if distance <= MIN_PAIR_DISTANCE {
        return None;
    }

    let direction = displacement / distance;
    let approach_speed = (particle.velocity - neighbor.velocity).dot(direction);
    if approach_speed <= 0.0 {
        return Some(zero_vector());
    }

    let q = 1.0 - distance / params.radius;
    Some(direction * (q * params.viscosity * approach_speed))
}

/// Exchange momentum along every recorded neighbor pair, half of each
/// impulse per side. Returns the number of coincident pairs skipped.
pub fn apply_viscosity(particles: &mut [Particle], params: &SimulationParams) -> usize {
    let mut skipped = 0;

    for i in 0..particles.len() {
        let neighbors = std::mem::take(&mut particles[i].neighbors);

        for &j in &neighbors {
            match pair_viscosity_impulse(&particles[i], &particles[j], params) {
                Some(impulse) => {
                    let half = impulse * 0.5;
                    particles[i].velocity -= half;
                    particles[j].velocity += half;
                }
                None => {
                    debug!("skipping coincident viscosity pair ({i}, {j})");
                    skipped += 1;
                }
            }
        }

        particles[i].neighbors = neighbors;
    }

    skipped
}
