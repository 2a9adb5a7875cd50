pub mod dam;
pub mod lattice;
pub mod particle;
pub mod sph_state;
pub mod stats;

pub use dam::{DamController, DamState};
pub use lattice::LatticeSpec;
pub use particle::Particle;
pub use sph_state::SphState;
pub use stats::SimulationStats;
