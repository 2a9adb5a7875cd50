use crate::core::Particle;
use crate::math::{Real, Vector, zero_vector};

/// Aggregate diagnostics over a particle slice.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimulationStats {
    pub particle_count: usize,
    /// Sum of velocities (unit mass)
    pub total_momentum: Vector,
    pub kinetic_energy: Real,
    pub max_speed: Real,
    pub mean_density: Real,
    pub max_density: Real,
    /// Pairs recorded in the current neighbor lists
    pub neighbor_pairs: usize,
}

impl SimulationStats {
    pub fn from_particles(particles: &[Particle]) -> Self {
        if particles.is_empty() {
            return Self::default();
        }

        let mut stats = Self {
            particle_count: particles.len(),
            total_momentum: zero_vector(),
            ..Self::default()
        };
        let mut density_sum = 0.0;

        for particle in particles {
            let speed_squared = particle.velocity.length_squared();
            stats.total_momentum += particle.velocity;
            stats.kinetic_energy += 0.5 * speed_squared;
            stats.max_speed = stats.max_speed.max(speed_squared.sqrt());
            stats.max_density = stats.max_density.max(particle.density);
            stats.neighbor_pairs += particle.neighbors.len();
            density_sum += particle.density;
        }

        stats.mean_density = density_sum / particles.len() as Real;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vector;

    #[test]
    fn test_empty_slice() {
        assert_eq!(SimulationStats::from_particles(&[]), SimulationStats::default());
    }

    #[test]
    fn test_momentum_and_energy() {
        let mut a = Particle::new(vector(0.0, 0.0), 0.0).with_velocity(vector(1.0, 0.0));
        let b = Particle::new(vector(1.0, 0.0), 0.0).with_velocity(vector(-1.0, 2.0));
        a.density = 2.0;
        a.neighbors.push(1);

        let stats = SimulationStats::from_particles(&[a, b]);
        assert_eq!(stats.particle_count, 2);
        assert_eq!(stats.total_momentum, vector(0.0, 2.0));
        assert!((stats.kinetic_energy - 3.0).abs() < 1e-6);
        assert!((stats.max_speed - 5.0_f32.sqrt()).abs() < 1e-6);
        assert!((stats.mean_density - 1.0).abs() < 1e-6);
        assert_eq!(stats.max_density, 2.0);
        assert_eq!(stats.neighbor_pairs, 1);
    }
}
