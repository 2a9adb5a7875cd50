//! Particle state update
//!
//! Runs first in every tick, consuming the forces accumulated during the
//! previous tick:
//!
//! 1. remember the current position
//! 2. `velocity += force`, `position += velocity` (unit mass, unit timestep)
//! 3. reset force to gravity and re-derive velocity from the position delta
//! 4. damp runaway speeds
//! 5. add boundary springs to the fresh force, clamping the visual position
//! 6. clear the step-scoped density state

use crate::config::SimulationParams;
use crate::core::{DamState, Particle};
use crate::math::gravity_force;

/// Scale velocity by `velocity_damping` when speed exceeds `max_velocity`.
#[inline]
pub fn clamp_speed(particle: &mut Particle, params: &SimulationParams) {
    if particle.velocity.length_squared() > params.max_velocity * params.max_velocity {
        particle.velocity *= params.velocity_damping;
    }
}

/// Spring forces pulling escaped particles back inside the domain.
///
/// Each boundary is evaluated independently, in order: left wall, dam (only
/// while intact), right wall, floor. Physical position is never clamped, only
/// the visual one.
pub fn apply_boundary_springs(particle: &mut Particle, params: &SimulationParams, dam: DamState) {
    let half_width = params.half_width;
    let damping = params.wall_damping;
    let position = particle.position;

    if position.x < -half_width {
        particle.force.x -= (position.x + half_width) * damping;
        particle.visual_position.x = -half_width;
    }

    if dam.is_intact() && position.x > params.dam_x {
        particle.force.x -= (position.x - params.dam_x) * damping;
    }

    if position.x > half_width {
        particle.force.x -= (position.x - half_width) * damping;
        particle.visual_position.x = half_width;
    }

    if position.y < params.ground {
        // Spring reference is the half-width, not the ground level.
        particle.force.y -= (position.y - half_width) * damping;
        particle.visual_position.y = params.ground;
    }
}

/// Advance one particle by a tick and reset its per-step state.
pub fn integrate_particle(particle: &mut Particle, params: &SimulationParams, dam: DamState) {
    particle.previous_position = particle.position;

    particle.velocity += particle.force;
    particle.position += particle.velocity;
    particle.visual_position = particle.position;

    particle.force = gravity_force(params.gravity);
    particle.velocity = particle.position - particle.previous_position;

    clamp_speed(particle, params);
    apply_boundary_springs(particle, params, dam);
    particle.clear_step_state();
}

pub fn integrate_particles(particles: &mut [Particle], params: &SimulationParams, dam: DamState) {
    for particle in particles.iter_mut() {
        integrate_particle(particle, params, dam);
    }
}
