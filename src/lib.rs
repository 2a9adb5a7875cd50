//! 2D SPH fluid simulation using double density relaxation.
//!
//! Every tick runs a fixed pipeline over the particle array: integrate the
//! previous tick's forces, accumulate density from neighbor proximity,
//! convert density into pressure, then propagate pressure forces and
//! viscosity impulses pairwise.

use std::time::Duration;

use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod error;
pub mod math;
pub mod solver;

// Public re-exports for clean API
pub use crate::config::SimulationParams;
pub use crate::core::{DamController, DamState, LatticeSpec, Particle, SimulationStats, SphState};
pub use crate::error::{ParamsError, SimulationError};
pub use crate::solver::StepReport;

use crate::solver::{advance_dam_system, log_simulation_stats, step_simulation_system};

/// Ticks the simulation at a fixed 60 Hz and breaks the dam on schedule.
pub struct SphPlugin {
    state: SphState,
}

impl SphPlugin {
    pub fn new(state: SphState) -> Self {
        Self { state }
    }

    pub fn dam_break(params: SimulationParams) -> Result<Self, SimulationError> {
        SphState::dam_break(params).map(Self::new)
    }
}

impl Plugin for SphPlugin {
    fn build(&self, app: &mut App) {
        let break_frame = self.state.params().dam_break_frame;
        app.insert_resource(self.state.clone())
            .insert_resource(DamController::new(break_frame))
            .insert_resource(Time::<Fixed>::from_duration(Duration::from_secs_f64(
                1.0 / 60.0,
            )))
            .add_systems(
                FixedUpdate,
                (
                    advance_dam_system,
                    step_simulation_system,
                    log_simulation_stats,
                )
                    .chain(),
            );
    }
}
