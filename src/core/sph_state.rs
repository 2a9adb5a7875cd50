use bevy::prelude::*;

use crate::config::SimulationParams;
use crate::error::SimulationError;
use crate::math::Point;
use crate::solver::step::{StepReport, first_non_finite, step_particles};

use super::dam::DamState;
use super::lattice::LatticeSpec;
use super::particle::Particle;
use super::stats::SimulationStats;

/// Aggregate simulation state for the solver.
///
/// Owns the particle array for the whole run; the count never changes.
/// Once a tick produces non-finite state the simulation is halted and every
/// later `step` reports the same failure without touching the particles.
#[derive(Resource, Clone, Debug)]
pub struct SphState {
    params: SimulationParams,
    particles: Vec<Particle>,
    tick: u64,
    last_report: StepReport,
    failure: Option<(usize, u64)>,
}

impl SphState {
    pub fn new(params: SimulationParams, particles: Vec<Particle>) -> Result<Self, SimulationError> {
        params.validate()?;
        if particles.len() != params.particle_count {
            return Err(SimulationError::ParticleCountMismatch {
                expected: params.particle_count,
                actual: particles.len(),
            });
        }

        Ok(Self {
            params,
            particles,
            tick: 0,
            last_report: StepReport::default(),
            failure: None,
        })
    }

    /// Column of fluid held behind the dam, filled by the default lattice.
    pub fn dam_break(params: SimulationParams) -> Result<Self, SimulationError> {
        params.validate()?;
        let particles = LatticeSpec::dam_break(&params).generate(params.gravity);
        Self::new(params, particles)
    }

    /// Run one tick. `dam` is owned by the caller and only read here.
    pub fn step(&mut self, dam: DamState) -> Result<StepReport, SimulationError> {
        if let Some((index, tick)) = self.failure {
            return Err(SimulationError::NonFinite { index, tick });
        }

        let report = step_particles(&mut self.particles, &self.params, dam);
        self.tick += 1;
        self.last_report = report;

        if let Some(index) = first_non_finite(&self.particles) {
            self.failure = Some((index, self.tick));
            return Err(SimulationError::NonFinite {
                index,
                tick: self.tick,
            });
        }

        Ok(report)
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Ticks completed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn is_halted(&self) -> bool {
        self.failure.is_some()
    }

    pub fn last_report(&self) -> StepReport {
        self.last_report
    }

    /// Display positions for the renderer, read after a tick.
    pub fn visual_positions(&self) -> Vec<Point> {
        self.particles.iter().map(|p| p.visual_position).collect()
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats::from_particles(&self.particles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParamsError;
    use crate::math::vector;

    #[test]
    fn test_dam_break_state() {
        let state = SphState::dam_break(SimulationParams::default()).unwrap();
        assert_eq!(state.particle_count(), 250);
        assert_eq!(state.tick(), 0);
        assert!(!state.is_halted());
        assert_eq!(state.visual_positions().len(), 250);
    }

    #[test]
    fn test_rejects_invalid_params() {
        let params = SimulationParams::default().with_spacing(-1.0);
        assert!(matches!(
            SphState::dam_break(params),
            Err(SimulationError::Params(ParamsError::NonPositive { .. }))
        ));
    }

    #[test]
    fn test_rejects_count_mismatch() {
        let params = SimulationParams::default().with_particle_count(3);
        let particles = vec![Particle::new(vector(0.0, 0.0), params.gravity)];
        assert!(matches!(
            SphState::new(params, particles),
            Err(SimulationError::ParticleCountMismatch { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_halts_on_non_finite_state() {
        let params = SimulationParams::default().with_particle_count(2);
        let particles = vec![
            Particle::new(vector(-0.4, 0.1), params.gravity),
            Particle::new(vector(-0.35, 0.1), params.gravity),
        ];
        let mut state = SphState::new(params, particles).unwrap();
        assert!(state.step(DamState::Intact).is_ok());

        state.particles_mut()[1].force.x = f32::NAN;
        assert!(matches!(
            state.step(DamState::Intact),
            Err(SimulationError::NonFinite { index: 1, tick: 2 })
        ));
        assert!(state.is_halted());

        let frozen = state.particles()[0].position;
        assert!(matches!(
            state.step(DamState::Intact),
            Err(SimulationError::NonFinite { index: 1, tick: 2 })
        ));
        assert_eq!(state.particles()[0].position, frozen);
        assert_eq!(state.tick(), 2);
    }
}
