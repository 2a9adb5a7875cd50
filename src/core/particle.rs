//! Fluid particles for SPH simulation
//!
//! Particles carry physical position, a display-only visual position,
//! velocity, accumulated force and the step-scoped density state.

use crate::config::SimulationParams;
use crate::math::{Real, Vector, gravity_force, vector_is_finite, zero_vector};

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vector,
    pub previous_position: Vector,
    /// Display position, clamped at boundaries. Never read back by the solver.
    pub visual_position: Vector,
    pub velocity: Vector,
    pub force: Vector,

    // Step-scoped state, zeroed by the integrator before every density pass
    pub density: Real,
    pub near_density: Real,
    pub pressure: Real,
    pub near_pressure: Real,
    /// Higher-indexed particles within the neighbor radius, recorded on the
    /// lower index of each pair only.
    pub neighbors: Vec<usize>,
}

impl Particle {
    /// Particle at rest with the gravity-only force a fresh tick starts from.
    pub fn new(position: Vector, gravity: Real) -> Self {
        Self {
            position,
            previous_position: position,
            visual_position: position,
            velocity: zero_vector(),
            force: gravity_force(gravity),
            density: 0.0,
            near_density: 0.0,
            pressure: 0.0,
            near_pressure: 0.0,
            neighbors: Vec::new(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    /// Zero density accumulators and drop the neighbor list.
    #[inline]
    pub fn clear_step_state(&mut self) {
        self.density = 0.0;
        self.near_density = 0.0;
        self.neighbors.clear();
    }

    /// Pointwise equation of state; `pressure` goes negative below rest density.
    #[inline]
    pub fn compute_pressure(&mut self, params: &SimulationParams) {
        self.pressure = params.stiffness * (self.density - params.rest_density);
        self.near_pressure = params.near_stiffness * self.near_density;
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        vector_is_finite(self.position)
            && vector_is_finite(self.velocity)
            && vector_is_finite(self.force)
            && self.density.is_finite()
            && self.near_density.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vector;

    #[test]
    fn test_new_particle_starts_with_gravity_force() {
        let particle = Particle::new(vector(0.1, 0.2), 0.005);
        assert_eq!(particle.force, vector(0.0, -0.005));
        assert_eq!(particle.previous_position, particle.position);
        assert_eq!(particle.visual_position, particle.position);
        assert!(particle.neighbors.is_empty());
    }

    #[test]
    fn test_pressure_sign_follows_rest_density() {
        let params = SimulationParams::default();
        let mut particle = Particle::new(vector(0.0, 0.0), params.gravity);

        particle.density = params.rest_density * 0.5;
        particle.near_density = 0.25;
        particle.compute_pressure(&params);
        assert!(particle.pressure < 0.0);
        assert!(particle.near_pressure > 0.0);

        particle.density = params.rest_density * 2.0;
        particle.compute_pressure(&params);
        assert!(particle.pressure > 0.0);
    }

    #[test]
    fn test_clear_step_state_is_idempotent() {
        let mut particle = Particle::new(vector(0.0, 0.0), 0.005);
        particle.density = 1.5;
        particle.near_density = 0.5;
        particle.neighbors.push(3);

        particle.clear_step_state();
        let once = particle.clone();
        particle.clear_step_state();
        assert_eq!(particle, once);
        assert_eq!(particle.density, 0.0);
        assert!(particle.neighbors.is_empty());
    }
}
