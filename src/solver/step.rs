//! Tick orchestration
//!
//! Fixed stage order per tick, each stage finishing for every particle
//! before the next begins:
//! integrate/reset -> density -> pressure -> pressure forces -> viscosity.

use bevy::prelude::*;

use crate::config::{STATS_LOG_PERIOD, SimulationParams};
use crate::core::{DamController, DamState, Particle, SphState};

use super::integrate::integrate_particles;
use super::neighbors::compute_density;
use super::pressure::{apply_pressure_forces, compute_pressures};
use super::viscosity::apply_viscosity;

/// Counters gathered while running one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub neighbor_pairs: usize,
    /// Coincident pairs left out, counted once per pass: a pair skipped by
    /// both the pressure and viscosity passes counts twice
    pub skipped_pairs: usize,
}

pub fn step_particles(
    particles: &mut [Particle],
    params: &SimulationParams,
    dam: DamState,
) -> StepReport {
    integrate_particles(particles, params, dam);
    let neighbor_pairs = compute_density(particles, params);
    compute_pressures(particles, params);
    let skipped_pairs =
        apply_pressure_forces(particles, params) + apply_viscosity(particles, params);

    StepReport {
        neighbor_pairs,
        skipped_pairs,
    }
}

/// Index of the first particle holding NaN or infinite state.
pub fn first_non_finite(particles: &[Particle]) -> Option<usize> {
    particles.iter().position(|particle| !particle.is_finite())
}

pub fn advance_dam_system(mut dam: ResMut<DamController>) {
    if dam.advance() {
        info!("breaking the dam at frame {}", dam.break_frame());
    }
}

pub fn step_simulation_system(mut state: ResMut<SphState>, dam: Res<DamController>) {
    if state.is_halted() {
        return;
    }

    if let Err(err) = state.step(dam.state()) {
        error!("simulation halted: {err}");
    }
}

pub fn log_simulation_stats(state: Res<SphState>) {
    let tick = state.tick();
    if state.is_halted() || tick % STATS_LOG_PERIOD != 0 {
        return;
    }

    let stats = state.stats();
    let report = state.last_report();
    info!(
        "[tick {:04}] particles={} pairs={} skipped={} max_speed={:.4} mean_density={:.3} max_density={:.3}",
        tick,
        stats.particle_count,
        report.neighbor_pairs,
        report.skipped_pairs,
        stats.max_speed,
        stats.mean_density,
        stats.max_density,
    );
}
